use crate::character::record::{
    CharacterRecord, PartialCharacterRecord, DEFAULT_CLASS_ID, DEFAULT_FACTION_ID,
    DEFAULT_RACE_ID,
};

/// Free-text fields written by saves that predate catalog ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyField {
    Race,
    Faction,
    Clazz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyMatch {
    Exact(&'static str),
    Contains(&'static str),
}

impl LegacyMatch {
    pub fn matches(self, text: &str) -> bool {
        match self {
            LegacyMatch::Exact(expected) => text == expected,
            LegacyMatch::Contains(needle) => text.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationRule {
    pub field: LegacyField,
    pub matcher: LegacyMatch,
    pub mapped_id: &'static str,
}

/// Evaluated in order; the first matching rule for a field wins.
pub const LEGACY_MIGRATIONS: &[MigrationRule] = &[
    MigrationRule {
        field: LegacyField::Race,
        matcher: LegacyMatch::Exact("Celestial (Human)"),
        mapped_id: "celestial_human",
    },
    MigrationRule {
        field: LegacyField::Faction,
        matcher: LegacyMatch::Contains("Stone Sect"),
        mapped_id: "church_stone",
    },
    MigrationRule {
        field: LegacyField::Clazz,
        matcher: LegacyMatch::Exact("Fighter"),
        mapped_id: "fighter_garrison_blade",
    },
];

/// Builds a complete record from whatever a slot held. Never fails.
pub fn normalize_character(
    raw: Option<&PartialCharacterRecord>,
    fallback_slot: &str,
) -> CharacterRecord {
    normalize_with_rules(raw, fallback_slot, LEGACY_MIGRATIONS)
}

pub fn normalize_with_rules(
    raw: Option<&PartialCharacterRecord>,
    fallback_slot: &str,
    rules: &[MigrationRule],
) -> CharacterRecord {
    let defaults = CharacterRecord::default();
    let Some(raw) = raw else {
        return CharacterRecord {
            slot: fallback_slot.to_string(),
            ..defaults
        };
    };

    CharacterRecord {
        slot: raw
            .slot
            .clone()
            .unwrap_or_else(|| fallback_slot.to_string()),
        name: raw.name.clone().unwrap_or(defaults.name),
        concept: raw.concept.clone().unwrap_or(defaults.concept),
        race_id: resolve_id(raw, raw.race_id.as_deref(), LegacyField::Race, rules, DEFAULT_RACE_ID),
        faction_id: resolve_id(
            raw,
            raw.faction_id.as_deref(),
            LegacyField::Faction,
            rules,
            DEFAULT_FACTION_ID,
        ),
        class_id: resolve_id(
            raw,
            raw.class_id.as_deref(),
            LegacyField::Clazz,
            rules,
            DEFAULT_CLASS_ID,
        ),
        traits: raw.traits.clone().unwrap_or(defaults.traits),
        gear_kit: raw.gear_kit.clone().or(defaults.gear_kit),
        notes: raw.notes.clone().unwrap_or(defaults.notes),
    }
}

fn resolve_id(
    raw: &PartialCharacterRecord,
    explicit: Option<&str>,
    field: LegacyField,
    rules: &[MigrationRule],
    default_id: &str,
) -> String {
    if let Some(id) = explicit {
        return id.to_string();
    }
    legacy_text(raw, field)
        .and_then(|text| {
            rules
                .iter()
                .filter(|rule| rule.field == field)
                .find(|rule| rule.matcher.matches(text))
        })
        .map(|rule| rule.mapped_id)
        .unwrap_or(default_id)
        .to_string()
}

fn legacy_text(raw: &PartialCharacterRecord, field: LegacyField) -> Option<&str> {
    match field {
        LegacyField::Race => raw.race.as_deref(),
        LegacyField::Faction => raw.faction.as_deref(),
        LegacyField::Clazz => raw.clazz.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partial(value: serde_json::Value) -> PartialCharacterRecord {
        PartialCharacterRecord::from_json(&value)
    }

    #[test]
    fn missing_input_yields_defaults_in_requested_slot() {
        let record = normalize_character(None, "B");
        assert_eq!(
            record,
            CharacterRecord {
                slot: "B".to_string(),
                ..CharacterRecord::default()
            }
        );
    }

    #[test]
    fn empty_object_yields_defaults() {
        let record = normalize_character(Some(&partial(json!({}))), "A");
        assert_eq!(record, CharacterRecord::default());
    }

    #[test]
    fn stored_slot_wins_over_fallback() {
        let record = normalize_character(Some(&partial(json!({ "slot": "C" }))), "A");
        assert_eq!(
            record,
            CharacterRecord {
                slot: "C".to_string(),
                ..CharacterRecord::default()
            }
        );
    }

    #[test]
    fn explicit_nulls_fall_back_to_defaults() {
        let record = normalize_character(
            Some(&partial(json!({
                "slot": null,
                "name": null,
                "raceId": null,
                "traits": null,
                "gearKit": null
            }))),
            "B",
        );
        assert_eq!(record.slot, "B");
        assert_eq!(record.name, "");
        assert_eq!(record.race_id, DEFAULT_RACE_ID);
        assert!(record.traits.is_empty());
        assert_eq!(record.gear_kit, None);
    }

    #[test]
    fn overlays_present_fields() {
        let record = normalize_character(
            Some(&partial(json!({
                "name": "Lin Yao",
                "concept": "Exiled bell-ringer",
                "traits": ["stubborn", "devout"],
                "gearKit": "stone_warder",
                "notes": "Owes the Ledger Sect."
            }))),
            "A",
        );
        assert_eq!(record.name, "Lin Yao");
        assert_eq!(record.concept, "Exiled bell-ringer");
        assert_eq!(record.traits, vec!["stubborn", "devout"]);
        assert_eq!(record.gear_kit.as_deref(), Some("stone_warder"));
        assert_eq!(record.notes, "Owes the Ledger Sect.");
    }

    #[test]
    fn legacy_race_string_maps_to_race_id() {
        let record =
            normalize_character(Some(&partial(json!({ "race": "Celestial (Human)" }))), "A");
        assert_eq!(record.race_id, "celestial_human");

        let unknown = normalize_character(Some(&partial(json!({ "race": "Celestial" }))), "A");
        assert_eq!(unknown.race_id, DEFAULT_RACE_ID);
    }

    #[test]
    fn legacy_rules_discriminate_against_default() {
        const RULES: &[MigrationRule] = &[
            MigrationRule {
                field: LegacyField::Race,
                matcher: LegacyMatch::Exact("Celestial (Human)"),
                mapped_id: "celestial_human",
            },
            MigrationRule {
                field: LegacyField::Race,
                matcher: LegacyMatch::Exact("Henge"),
                mapped_id: "henge_shapeshifter",
            },
        ];
        let record =
            normalize_with_rules(Some(&partial(json!({ "race": "Henge" }))), "A", RULES);
        assert_eq!(record.race_id, "henge_shapeshifter");

        let miss =
            normalize_with_rules(Some(&partial(json!({ "race": "Half-Oni" }))), "A", RULES);
        assert_eq!(miss.race_id, DEFAULT_RACE_ID);
    }

    #[test]
    fn legacy_faction_matches_by_substring() {
        let record = normalize_character(
            Some(&partial(json!({ "faction": "Order of the Stone Sect chapter" }))),
            "A",
        );
        assert_eq!(record.faction_id, "church_stone");

        const RULES: &[MigrationRule] = &[MigrationRule {
            field: LegacyField::Faction,
            matcher: LegacyMatch::Contains("Magi"),
            mapped_id: "guild_magi",
        }];
        let mapped = normalize_with_rules(
            Some(&partial(json!({ "faction": "The Five Guilds: Magi" }))),
            "A",
            RULES,
        );
        assert_eq!(mapped.faction_id, "guild_magi");

        let unrelated =
            normalize_character(Some(&partial(json!({ "faction": "Unrelated Text" }))), "A");
        assert_eq!(unrelated.faction_id, DEFAULT_FACTION_ID);
    }

    #[test]
    fn explicit_id_beats_legacy_text() {
        let record = normalize_character(
            Some(&partial(json!({ "classId": "explicit_id", "clazz": "Fighter" }))),
            "A",
        );
        assert_eq!(record.class_id, "explicit_id");

        let legacy_only = normalize_character(Some(&partial(json!({ "clazz": "Fighter" }))), "A");
        assert_eq!(legacy_only.class_id, "fighter_garrison_blade");
    }

    #[test]
    fn dangling_ids_are_kept() {
        let record = normalize_character(
            Some(&partial(json!({ "factionId": "guild_nonexistent" }))),
            "A",
        );
        assert_eq!(record.faction_id, "guild_nonexistent");
    }

    #[test]
    fn normalizing_a_canonical_record_is_identity() {
        let record = CharacterRecord {
            slot: "C".to_string(),
            name: "Mei".to_string(),
            traits: vec!["wry".to_string()],
            gear_kit: Some("omen_reader".to_string()),
            ..CharacterRecord::default()
        };
        let again = normalize_character(Some(&PartialCharacterRecord::from(&record)), "A");
        assert_eq!(again, record);
    }
}
