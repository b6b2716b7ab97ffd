use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, warn};

use crate::character::notes::append_note;
use crate::character::record::CharacterRecord;
use crate::core::world::{ActiveCharacter, EditIntent, EditQueue};
use crate::data::Catalogs;
use crate::rules::compatibility::{evaluate_class_pick, ClassPick, RestrictionPolicy};

/// Messages produced by the latest schedule run, for the front end.
#[derive(Resource, Debug, Default)]
pub struct SessionLog(pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied {
        record: CharacterRecord,
        note: Option<String>,
    },
    Unchanged,
    Rejected(String),
}

/// Computes the record that results from one edit. The input is never
/// modified; a changed record comes back as a new value.
pub fn apply_edit(
    record: &CharacterRecord,
    intent: &EditIntent,
    catalogs: &Catalogs,
    policy: RestrictionPolicy,
) -> EditOutcome {
    let mut next = record.clone();
    let mut note = None;

    match intent {
        EditIntent::SetName(name) => next.name = name.clone(),
        EditIntent::SetConcept(concept) => next.concept = concept.clone(),
        EditIntent::SetNotes(notes) => next.notes = notes.clone(),
        EditIntent::AppendNote(line) => {
            if line.trim().is_empty() {
                return EditOutcome::Rejected("Nothing to append.".to_string());
            }
            next.notes = append_note(&record.notes, line);
        }
        EditIntent::SetRace(race_id) => {
            if !catalogs.races.contains(race_id) {
                note = Some(format!("Race '{}' is not in the catalog; kept as entered.", race_id));
            }
            next.race_id = race_id.clone();
        }
        EditIntent::SetFaction(faction_id) => {
            if !catalogs.factions.contains(faction_id) {
                note = Some(format!(
                    "Faction '{}' is not in the catalog; kept as entered.",
                    faction_id
                ));
            }
            next.faction_id = faction_id.clone();
        }
        EditIntent::PickClass(class_id) => {
            let faction_tags = catalogs.faction_tags(&record.faction_id);
            match evaluate_class_pick(&catalogs.classes, class_id, faction_tags, policy) {
                ClassPick::Unknown => {
                    return EditOutcome::Rejected(format!("Unknown class '{}'.", class_id));
                }
                ClassPick::Blocked => {
                    return EditOutcome::Rejected(format!(
                        "{} is restricted for {}.",
                        class_name(catalogs, class_id),
                        faction_name(catalogs, &record.faction_id)
                    ));
                }
                ClassPick::Selected { mismatch } => {
                    if mismatch {
                        warn!(
                            "Class {} picked under non-matching faction {}",
                            class_id, record.faction_id
                        );
                    }
                    next.class_id = class_id.clone();
                }
            }
        }
        EditIntent::AddTrait(value) => {
            let value = value.trim();
            if value.is_empty() {
                return EditOutcome::Rejected("Trait cannot be empty.".to_string());
            }
            if !next.traits.iter().any(|existing| existing == value) {
                next.traits.push(value.to_string());
            }
        }
        EditIntent::RemoveTrait(value) => {
            next.traits.retain(|existing| existing != value.trim());
        }
        EditIntent::ClearTraits => next.traits.clear(),
        EditIntent::SetGearKit(kit) => {
            next.gear_kit = kit
                .as_deref()
                .map(str::trim)
                .filter(|kit| !kit.is_empty())
                .map(str::to_string);
        }
    }

    if next == *record {
        EditOutcome::Unchanged
    } else {
        EditOutcome::Applied { record: next, note }
    }
}

pub fn apply_edits_system(
    mut queue: ResMut<EditQueue>,
    catalogs: Res<Catalogs>,
    policy: Res<RestrictionPolicy>,
    mut active: ResMut<ActiveCharacter>,
    mut log: ResMut<SessionLog>,
) {
    log.0.clear();

    for intent in std::mem::take(&mut queue.0) {
        match apply_edit(&active.record, &intent, &catalogs, *policy) {
            EditOutcome::Applied { record, note } => {
                debug!("Applied {:?}", intent);
                active.record = record;
                active.changed = true;
                if let Some(note) = note {
                    log.0.push(note);
                }
            }
            EditOutcome::Unchanged => {}
            EditOutcome::Rejected(reason) => log.0.push(reason),
        }
    }
}

fn class_name<'a>(catalogs: &'a Catalogs, class_id: &'a str) -> &'a str {
    catalogs
        .class(class_id)
        .map(|class| class.name.as_str())
        .unwrap_or(class_id)
}

fn faction_name<'a>(catalogs: &'a Catalogs, faction_id: &'a str) -> &'a str {
    catalogs
        .faction(faction_id)
        .map(|faction| faction.display_name())
        .unwrap_or(faction_id)
}
