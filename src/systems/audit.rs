use bevy_ecs::prelude::*;

use crate::core::world::ActiveCharacter;
use crate::data::Catalogs;
use crate::systems::edits::SessionLog;

/// Whether the current class fits the current faction.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityStatus {
    pub class_id: String,
    pub faction_id: String,
    pub allowed: bool,
}

impl Default for CompatibilityStatus {
    fn default() -> Self {
        Self {
            class_id: String::new(),
            faction_id: String::new(),
            allowed: true,
        }
    }
}

/// Re-checks the class against the faction after edits; reports only when the
/// pairing changes into a mismatch.
pub fn compatibility_audit_system(
    catalogs: Res<Catalogs>,
    active: Res<ActiveCharacter>,
    mut status: ResMut<CompatibilityStatus>,
    mut log: ResMut<SessionLog>,
) {
    let record = &active.record;
    if status.class_id == record.class_id && status.faction_id == record.faction_id {
        return;
    }

    let allowed = catalogs.class_allowed_for_faction(&record.class_id, &record.faction_id);
    if !allowed {
        let class = catalogs
            .class(&record.class_id)
            .map(|class| class.name.as_str())
            .unwrap_or(record.class_id.as_str());
        let faction = catalogs
            .faction(&record.faction_id)
            .map(|faction| faction.display_name())
            .unwrap_or(record.faction_id.as_str());
        log.0.push(format!("Mismatch: {} does not fit {}.", class, faction));
    }

    *status = CompatibilityStatus {
        class_id: record.class_id.clone(),
        faction_id: record.faction_id.clone(),
        allowed,
    };
}
