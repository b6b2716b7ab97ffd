use crate::character::record::Slot;

pub const SLOT_KEY_PREFIX: &str = "shanmei_char_";

pub fn slot_key(slot: &str) -> String {
    format!("{}{}", SLOT_KEY_PREFIX, slot)
}

/// Key-value storage for serialized character records, one value per slot.
pub trait SlotStore {
    fn get(&self, slot: &str) -> Result<Option<String>, Box<dyn std::error::Error>>;
    fn put(&mut self, slot: &str, payload: &str) -> Result<(), Box<dyn std::error::Error>>;

    /// Names of the slots that currently hold a value, sorted.
    fn occupied(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let mut slots = Vec::new();
        for slot in Slot::ALL {
            if self.get(slot.as_str())?.is_some() {
                slots.push(slot.as_str().to_string());
            }
        }
        Ok(slots)
    }
}
