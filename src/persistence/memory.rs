use std::collections::HashMap;

use crate::persistence::repository::{slot_key, SlotStore};

/// Process-local slot storage; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    values: HashMap<String, String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, slot: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        Ok(self.values.get(&slot_key(slot)).cloned())
    }

    fn put(&mut self, slot: &str, payload: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.values.insert(slot_key(slot), payload.to_string());
        Ok(())
    }
}
