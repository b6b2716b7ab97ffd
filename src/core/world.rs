use bevy_ecs::prelude::*;
use bevy_utils::tracing::{info, warn};

use crate::character::record::CharacterRecord;
use crate::core::ecs::{create_schedule, create_world};
use crate::data::Catalogs;
use crate::persistence::repository::SlotStore;
use crate::persistence::slots::{load_character, save_character};
use crate::rules::compatibility::RestrictionPolicy;
use crate::systems::audit::CompatibilityStatus;
use crate::systems::edits::SessionLog;
use crate::ui::handout::{build_export_json, build_export_text};
use crate::ui::summary::render_summary;

/// User edits fed into the ECS on each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    SetName(String),
    SetConcept(String),
    SetNotes(String),
    AppendNote(String),
    SetRace(String),
    SetFaction(String),
    PickClass(String),
    AddTrait(String),
    RemoveTrait(String),
    ClearTraits,
    SetGearKit(Option<String>),
}

#[derive(Resource, Default, Debug)]
pub struct EditQueue(pub Vec<EditIntent>);

/// The record being edited. `changed` is raised by the edit system and
/// cleared once the record has been handed to the store.
#[derive(Resource, Debug, Clone)]
pub struct ActiveCharacter {
    pub record: CharacterRecord,
    pub changed: bool,
}

impl ActiveCharacter {
    pub fn new(record: CharacterRecord) -> Self {
        Self {
            record,
            changed: false,
        }
    }
}

/// Data returned to the front end after each run.
#[derive(Debug, Clone)]
pub struct WizardSnapshot {
    pub record: CharacterRecord,
    pub compatibility: CompatibilityStatus,
    pub log: Vec<String>,
    /// False when a write was attempted and failed.
    pub persisted: bool,
}

/// Wrapper around the ECS world, its schedule and the slot store.
pub struct Wizard {
    world: World,
    schedule: Schedule,
    store: Box<dyn SlotStore>,
}

impl Wizard {
    /// Load `slot` from the store and save the normalized result straight back.
    pub fn open(
        catalogs: Catalogs,
        policy: RestrictionPolicy,
        store: Box<dyn SlotStore>,
        slot: &str,
    ) -> Self {
        let record = load_slot(store.as_ref(), slot);
        let world = create_world(catalogs, policy, record);
        let mut wizard = Self {
            world,
            schedule: create_schedule(),
            store,
        };
        wizard.settle();
        wizard
    }

    /// Run queued edits and persist the record if any of them changed it.
    pub fn apply(&mut self, intents: Vec<EditIntent>) -> WizardSnapshot {
        self.world.resource_mut::<EditQueue>().0 = intents;
        self.schedule.run(&mut self.world);

        let changed = std::mem::take(&mut self.world.resource_mut::<ActiveCharacter>().changed);
        let persisted = if changed { self.persist() } else { true };
        self.snapshot(persisted)
    }

    pub fn apply_one(&mut self, intent: EditIntent) -> WizardSnapshot {
        self.apply(vec![intent])
    }

    /// Replace the active record with the normalized contents of another slot.
    pub fn switch_slot(&mut self, slot: &str) -> WizardSnapshot {
        let record = load_slot(self.store.as_ref(), slot);
        self.world.insert_resource(ActiveCharacter::new(record));
        self.settle()
    }

    /// Slots with a saved record; empty when the store cannot be read.
    pub fn occupied_slots(&self) -> Vec<String> {
        self.store.occupied().unwrap_or_else(|err| {
            warn!("Failed to list saved slots: {}", err);
            Vec::new()
        })
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.world.resource::<ActiveCharacter>().record
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.world.resource::<Catalogs>()
    }

    pub fn compatibility(&self) -> &CompatibilityStatus {
        self.world.resource::<CompatibilityStatus>()
    }

    pub fn policy(&self) -> RestrictionPolicy {
        *self.world.resource::<RestrictionPolicy>()
    }

    pub fn set_policy(&mut self, policy: RestrictionPolicy) {
        info!("Restriction policy set to {}", policy.as_str());
        self.world.insert_resource(policy);
    }

    pub fn class_allowed(&self, class_id: &str) -> bool {
        self.catalogs()
            .class_allowed_for_faction(class_id, &self.record().faction_id)
    }

    pub fn export_text(&self) -> String {
        build_export_text(self.record(), self.catalogs())
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        build_export_json(self.record())
    }

    pub fn summary(&self) -> String {
        render_summary(self.record(), self.catalogs())
    }

    fn settle(&mut self) -> WizardSnapshot {
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<ActiveCharacter>().changed = false;
        let persisted = self.persist();
        self.snapshot(persisted)
    }

    fn persist(&mut self) -> bool {
        let record = &self.world.resource::<ActiveCharacter>().record;
        save_character(self.store.as_mut(), record)
    }

    fn snapshot(&self, persisted: bool) -> WizardSnapshot {
        WizardSnapshot {
            record: self.record().clone(),
            compatibility: self.compatibility().clone(),
            log: self.world.resource::<SessionLog>().0.clone(),
            persisted,
        }
    }
}

fn load_slot(store: &dyn SlotStore, slot: &str) -> CharacterRecord {
    let record = load_character(store, slot);
    if record.slot != slot {
        warn!(
            "Slot {} holds a record tagged for slot {}; edits will be saved under {}",
            slot, record.slot, record.slot
        );
    }
    record
}
