use crate::character::record::CharacterRecord;
use crate::data::Catalogs;
use crate::ui::handout::{join_or_placeholder, or_placeholder};

/// Short status block shown after each edit.
pub fn render_summary(record: &CharacterRecord, catalogs: &Catalogs) -> String {
    let race = catalogs
        .race(&record.race_id)
        .map(|race| race.name.as_str())
        .unwrap_or_else(|| or_placeholder(&record.race_id));
    let faction = catalogs
        .faction(&record.faction_id)
        .map(|faction| faction.display_name())
        .unwrap_or_else(|| or_placeholder(&record.faction_id));
    let class = catalogs
        .class(&record.class_id)
        .map(|class| format!("{} ({})", class.name, class.role_name))
        .unwrap_or_else(|| or_placeholder(&record.class_id).to_string());

    let mut output = String::new();
    output.push_str(&format!("=== Character (slot {}) ===\n", record.slot));
    output.push_str(&format!("Name: {}\n", or_placeholder(&record.name)));
    output.push_str(&format!("Concept: {}\n", or_placeholder(&record.concept)));
    output.push_str(&format!("Race: {}\n", race));
    output.push_str(&format!("Faction: {}\n", faction));
    output.push_str(&format!("Class: {}\n", class));
    output.push_str(&format!("Traits: {}\n", join_or_placeholder(&record.traits)));
    if let Some(kit) = record.gear_kit.as_deref() {
        output.push_str(&format!("Gear kit: {}\n", kit));
    }
    output
}
