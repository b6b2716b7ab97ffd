use crate::character::record::CharacterRecord;
use crate::data::Catalogs;

pub const FLAVOR_PROMPTS: [&str; 4] = [
    "I saw something climb out at dawn and nobody believed me.",
    "I’m here because the shrine bell rang in my dreams.",
    "I’m hunting a rumor about planetfall relics.",
    "I owe someone in Héshì my life (and a debt).",
];

/// Paragraph-separated append; an empty note becomes just the new line.
pub fn append_note(notes: &str, line: &str) -> String {
    if notes.is_empty() {
        line.to_string()
    } else {
        format!("{}\n\n{}", notes, line)
    }
}

/// Faction starting hooks followed by class hooks for the current picks.
pub fn available_hooks<'a>(record: &CharacterRecord, catalogs: &'a Catalogs) -> Vec<&'a str> {
    let faction_hooks = catalogs
        .faction(&record.faction_id)
        .map(|faction| faction.starting_hooks.as_slice())
        .unwrap_or(&[]);
    let class_hooks = catalogs
        .class(&record.class_id)
        .map(|class| class.hooks.as_slice())
        .unwrap_or(&[]);
    faction_hooks
        .iter()
        .chain(class_hooks.iter())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_separates_paragraphs() {
        assert_eq!(append_note("", "First."), "First.");
        assert_eq!(append_note("First.", "Second."), "First.\n\nSecond.");
    }

    #[test]
    fn hooks_cover_faction_then_class() {
        let catalogs = Catalogs::bundled().expect("bundled catalogs parse");
        let hooks = available_hooks(&CharacterRecord::default(), &catalogs);
        assert_eq!(hooks.len(), 6);
        assert_eq!(hooks[0], "Caretaker of a shrine ward or keeper of rites.");

        let dangling = CharacterRecord {
            faction_id: "nowhere".to_string(),
            class_id: "nobody".to_string(),
            ..CharacterRecord::default()
        };
        assert!(available_hooks(&dangling, &catalogs).is_empty());
    }
}
