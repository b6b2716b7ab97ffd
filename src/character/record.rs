use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SLOT: &str = "A";
pub const DEFAULT_RACE_ID: &str = "celestial_human";
pub const DEFAULT_FACTION_ID: &str = "church_stone";
pub const DEFAULT_CLASS_ID: &str = "fighter_garrison_blade";

/// Named storage partitions offered by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Slot {
    #[default]
    A,
    B,
    C,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::A, Slot::B, Slot::C];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
            Slot::C => "C",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Slot::A),
            "B" => Ok(Slot::B),
            "C" => Ok(Slot::C),
            other => Err(format!("unknown slot '{}' (expected A, B or C)", other)),
        }
    }
}

/// Canonical, fully populated character record as persisted per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    /// Kept as free text: older saves may carry slot names outside [`Slot`].
    pub slot: String,
    pub name: String,
    pub concept: String,
    pub race_id: String,
    pub faction_id: String,
    pub class_id: String,
    pub traits: Vec<String>,
    pub gear_kit: Option<String>,
    pub notes: String,
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_string(),
            name: String::new(),
            concept: String::new(),
            race_id: DEFAULT_RACE_ID.to_string(),
            faction_id: DEFAULT_FACTION_ID.to_string(),
            class_id: DEFAULT_CLASS_ID.to_string(),
            traits: Vec::new(),
            gear_kit: None,
            notes: String::new(),
        }
    }
}

impl CharacterRecord {
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Whatever a slot held, with every field optional. Also carries the
/// free-text fields older saves used before catalog ids existed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialCharacterRecord {
    pub slot: Option<String>,
    pub name: Option<String>,
    pub concept: Option<String>,
    pub race_id: Option<String>,
    pub faction_id: Option<String>,
    pub class_id: Option<String>,
    pub traits: Option<Vec<String>>,
    pub gear_kit: Option<String>,
    pub notes: Option<String>,
    pub race: Option<String>,
    pub faction: Option<String>,
    pub clazz: Option<String>,
}

impl PartialCharacterRecord {
    /// Reads a stored value field by field. Anything that is not an object
    /// yields an empty partial; fields of the wrong type count as absent.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            slot: text("slot"),
            name: text("name"),
            concept: text("concept"),
            race_id: text("raceId"),
            faction_id: text("factionId"),
            class_id: text("classId"),
            traits: object.get("traits").and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            gear_kit: text("gearKit"),
            notes: text("notes"),
            race: text("race"),
            faction: text("faction"),
            clazz: text("clazz"),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_json(&value))
    }
}

impl From<&CharacterRecord> for PartialCharacterRecord {
    fn from(record: &CharacterRecord) -> Self {
        Self {
            slot: Some(record.slot.clone()),
            name: Some(record.name.clone()),
            concept: Some(record.concept.clone()),
            race_id: Some(record.race_id.clone()),
            faction_id: Some(record.faction_id.clone()),
            class_id: Some(record.class_id.clone()),
            traits: Some(record.traits.clone()),
            gear_kit: record.gear_kit.clone(),
            notes: Some(record.notes.clone()),
            race: None,
            faction: None,
            clazz: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(CharacterRecord::default()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "slot": "A",
                "name": "",
                "concept": "",
                "raceId": "celestial_human",
                "factionId": "church_stone",
                "classId": "fighter_garrison_blade",
                "traits": [],
                "gearKit": null,
                "notes": ""
            })
        );
    }

    #[test]
    fn partial_treats_nulls_and_wrong_types_as_absent() {
        let partial = PartialCharacterRecord::from_json(&json!({
            "slot": "B",
            "name": null,
            "concept": 42,
            "traits": ["brave", 7, "quiet"],
            "clazz": "Fighter"
        }));
        assert_eq!(partial.slot.as_deref(), Some("B"));
        assert_eq!(partial.name, None);
        assert_eq!(partial.concept, None);
        assert_eq!(
            partial.traits,
            Some(vec!["brave".to_string(), "quiet".to_string()])
        );
        assert_eq!(partial.clazz.as_deref(), Some("Fighter"));
    }

    #[test]
    fn non_object_values_give_empty_partial() {
        assert_eq!(
            PartialCharacterRecord::from_json(&json!([1, 2, 3])),
            PartialCharacterRecord::default()
        );
        assert_eq!(
            PartialCharacterRecord::from_json(&Value::Null),
            PartialCharacterRecord::default()
        );
        assert!(PartialCharacterRecord::parse("{not json").is_err());
    }

    #[test]
    fn slot_parsing_is_case_insensitive() {
        assert_eq!("b".parse::<Slot>(), Ok(Slot::B));
        assert_eq!(" C ".parse::<Slot>(), Ok(Slot::C));
        assert!("D".parse::<Slot>().is_err());
        assert_eq!(Slot::A.to_string(), "A");
    }
}
