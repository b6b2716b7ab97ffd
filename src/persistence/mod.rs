pub mod memory;
pub mod repository;
pub mod slots;
pub mod sqlite;

pub use memory::MemorySlotStore;
pub use repository::{slot_key, SlotStore};
pub use slots::{load_character, read_slot, save_character};
pub use sqlite::{SlotDb, SlotDbError};
