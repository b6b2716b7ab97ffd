use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::character::record::CharacterRecord;
use crate::core::world::{ActiveCharacter, EditQueue};
use crate::data::Catalogs;
use crate::rules::compatibility::RestrictionPolicy;
use crate::systems::audit::{compatibility_audit_system, CompatibilityStatus};
use crate::systems::edits::{apply_edits_system, SessionLog};

/// Ordering for one pass over queued edits.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum EditSet {
    Apply,
    Audit,
}

/// Build the ECS world with the session's resources.
pub fn create_world(
    catalogs: Catalogs,
    policy: RestrictionPolicy,
    record: CharacterRecord,
) -> World {
    let mut world = World::new();
    world.insert_resource(catalogs);
    world.insert_resource(policy);
    world.insert_resource(ActiveCharacter::new(record));
    world.insert_resource(EditQueue::default());
    world.insert_resource(CompatibilityStatus::default());
    world.insert_resource(SessionLog::default());
    world
}

pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets((EditSet::Apply, EditSet::Audit).chain());

    schedule.add_systems((
        apply_edits_system.in_set(EditSet::Apply),
        compatibility_audit_system.in_set(EditSet::Audit),
    ));

    schedule
}
