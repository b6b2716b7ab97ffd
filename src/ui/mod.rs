pub mod catalog_view;
pub mod handout;
pub mod summary;

pub use handout::{build_export_json, build_export_text, PLACEHOLDER, UNNAMED_CHARACTER};
pub use summary::render_summary;
