pub mod normalize;
pub mod notes;
pub mod record;

pub use normalize::{
    normalize_character, normalize_with_rules, LegacyField, LegacyMatch, MigrationRule,
};
pub use notes::{append_note, available_hooks, FLAVOR_PROMPTS};
pub use record::{CharacterRecord, PartialCharacterRecord, Slot};
