use bevy_utils::tracing::{debug, info, warn};

use crate::character::normalize::normalize_character;
use crate::character::record::{CharacterRecord, PartialCharacterRecord};
use crate::persistence::repository::{slot_key, SlotStore};

/// Stored value for a slot, or `None` when the slot is empty, unreadable or
/// holds something that is not JSON. Failures are logged, never returned.
pub fn read_slot(store: &dyn SlotStore, slot: &str) -> Option<PartialCharacterRecord> {
    let raw = match store.get(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!("Failed to read {}: {}", slot_key(slot), err);
            return None;
        }
    };

    match PartialCharacterRecord::parse(&raw) {
        Ok(partial) => Some(partial),
        Err(err) => {
            warn!("Discarding unreadable {}: {}", slot_key(slot), err);
            None
        }
    }
}

pub fn load_character(store: &dyn SlotStore, slot: &str) -> CharacterRecord {
    let partial = read_slot(store, slot);
    let record = normalize_character(partial.as_ref(), slot);
    info!(
        "Loaded slot {} ({})",
        slot,
        if partial.is_some() { "stored" } else { "new" }
    );
    record
}

/// Writes the whole record under its own slot. Returns whether the write
/// landed; a failed write leaves the edit in memory only.
pub fn save_character(store: &mut dyn SlotStore, record: &CharacterRecord) -> bool {
    let payload = match serde_json::to_string(record) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Failed to serialize slot {}: {}", record.slot, err);
            return false;
        }
    };

    match store.put(&record.slot, &payload) {
        Ok(()) => {
            debug!("Saved {}", slot_key(&record.slot));
            true
        }
        Err(err) => {
            warn!("Failed to save {}: {}", slot_key(&record.slot), err);
            false
        }
    }
}
