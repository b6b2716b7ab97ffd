pub mod audit;
pub mod edits;

pub use audit::{compatibility_audit_system, CompatibilityStatus};
pub use edits::{apply_edit, apply_edits_system, EditOutcome, SessionLog};
