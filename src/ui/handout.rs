use crate::character::record::CharacterRecord;
use crate::data::Catalogs;

pub const PLACEHOLDER: &str = "—";
pub const UNNAMED_CHARACTER: &str = "Unnamed Character";

/// Plain-text handout for pasting into a table tool. Same inputs always
/// give the same bytes.
pub fn build_export_text(record: &CharacterRecord, catalogs: &Catalogs) -> String {
    let race = catalogs.race(&record.race_id);
    let faction = catalogs.faction(&record.faction_id);
    let class = catalogs.class(&record.class_id);

    let race_label = race
        .map(|race| race.name.clone())
        .unwrap_or_else(|| or_placeholder(&record.race_id).to_string());
    let faction_label = faction
        .map(|faction| faction.display_name().to_string())
        .unwrap_or_else(|| or_placeholder(&record.faction_id).to_string());
    let class_label = class
        .map(|class| format!("{} — {}", class.name, class.role_name))
        .unwrap_or_else(|| or_placeholder(&record.class_id).to_string());

    let lines = [
        format!("# {}", non_empty_or(&record.name, UNNAMED_CHARACTER)),
        String::new(),
        format!("**Concept:** {}", or_placeholder(&record.concept)),
        format!("**Race:** {}", race_label),
        format!("**Faction:** {}", faction_label),
        format!("**Class:** {}", class_label),
        format!("**Traits:** {}", join_or_placeholder(&record.traits)),
        String::new(),
        "---".to_string(),
        format!(
            "**Race Tags:** {}",
            join_or_placeholder(race.map(|race| race.tags.as_slice()).unwrap_or(&[]))
        ),
        format!(
            "**Faction Tags:** {}",
            join_or_placeholder(faction.map(|faction| faction.tags.as_slice()).unwrap_or(&[]))
        ),
        String::new(),
        "## Notes".to_string(),
        or_placeholder(&record.notes).to_string(),
    ];
    lines.join("\n")
}

pub fn build_export_json(record: &CharacterRecord) -> Result<String, serde_json::Error> {
    record.to_pretty_json()
}

pub(crate) fn or_placeholder(value: &str) -> &str {
    non_empty_or(value, PLACEHOLDER)
}

pub(crate) fn join_or_placeholder(values: &[String]) -> String {
    if values.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        values.join(", ")
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs::bundled().expect("bundled catalogs parse")
    }

    #[test]
    fn blank_record_renders_placeholders() {
        let text = build_export_text(&CharacterRecord::default(), &catalogs());
        let expected = "\
# Unnamed Character

**Concept:** —
**Race:** Celestial (Human)
**Faction:** Stone Sect
**Class:** Fighter — Garrison Blade
**Traits:** —

---
**Race Tags:** celestial
**Faction Tags:** church, stone_sect, mystic, shanmei_prefecture

## Notes
—";
        assert_eq!(text, expected);
    }

    #[test]
    fn filled_record_renders_every_section() {
        let record = CharacterRecord {
            name: "Lin Yao".to_string(),
            concept: "Exiled bell-ringer".to_string(),
            race_id: "henge_shapeshifter".to_string(),
            faction_id: "guild_magi".to_string(),
            class_id: "magus_tech_blade".to_string(),
            traits: vec!["stubborn".to_string(), "devout".to_string()],
            notes: "First line.\n\nSecond line.".to_string(),
            ..CharacterRecord::default()
        };
        let text = build_export_text(&record, &catalogs());
        let expected = "\
# Lin Yao

**Concept:** Exiled bell-ringer
**Race:** Henge (Shapeshifter)
**Faction:** Magi
**Class:** Magus — Tech-Blade Adept
**Traits:** stubborn, devout

---
**Race Tags:** henge, spirit_tuned
**Faction Tags:** guild, guild_magi, tech_access, survey_authority, shanmei_prefecture

## Notes
First line.

Second line.";
        assert_eq!(text, expected);
    }

    #[test]
    fn dangling_ids_render_raw_and_drop_tags() {
        let record = CharacterRecord {
            race_id: "lost_race".to_string(),
            faction_id: "guild_nonexistent".to_string(),
            class_id: "mystery_class".to_string(),
            ..CharacterRecord::default()
        };
        let text = build_export_text(&record, &catalogs());
        assert!(text.contains("**Race:** lost_race\n"));
        assert!(text.contains("**Faction:** guild_nonexistent\n"));
        assert!(text.contains("**Class:** mystery_class\n"));
        assert!(text.contains("**Race Tags:** —\n"));
        assert!(text.contains("**Faction Tags:** —\n"));
    }

    #[test]
    fn empty_ids_fall_through_to_placeholder() {
        let record = CharacterRecord {
            faction_id: String::new(),
            ..CharacterRecord::default()
        };
        let text = build_export_text(&record, &catalogs());
        assert!(text.contains("**Faction:** —\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let catalogs = catalogs();
        let record = CharacterRecord {
            name: "Mei".to_string(),
            traits: vec!["wry".to_string()],
            ..CharacterRecord::default()
        };
        assert_eq!(
            build_export_text(&record, &catalogs),
            build_export_text(&record, &catalogs)
        );
    }

    #[test]
    fn json_export_is_pretty_camel_case() {
        let json = build_export_json(&CharacterRecord::default()).expect("serialize");
        assert!(json.starts_with("{\n  \"slot\": \"A\",\n"));
        assert!(json.contains("\"raceId\": \"celestial_human\""));
        assert!(json.contains("\"gearKit\": null"));
    }
}
