pub mod character;
pub mod config;
pub mod core;
pub mod data;
pub mod persistence;
pub mod rules;
pub mod systems;
pub mod ui;

// Expose the session wrapper and the pure core used by the binary
pub use crate::character::{normalize_character, CharacterRecord, PartialCharacterRecord, Slot};
pub use crate::config::{parse_args, CreatorConfig};
pub use crate::core::world::{EditIntent, Wizard, WizardSnapshot};
pub use crate::data::Catalogs;
pub use crate::rules::{is_class_allowed, RestrictionPolicy};
pub use crate::ui::{build_export_json, build_export_text, render_summary};
