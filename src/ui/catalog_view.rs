use crate::data::{
    group_classes, group_factions, Catalogs, ClassDefinition, FactionDefinition, RaceDefinition,
};
use crate::ui::handout::join_or_placeholder;

pub const MISMATCH_SUFFIX: &str = " (mismatch)";

pub fn class_option_label(class: &ClassDefinition, allowed: bool) -> String {
    let mut label = format!("{} — {}", class.name, class.role_name);
    if !allowed {
        label.push_str(MISMATCH_SUFFIX);
    }
    label
}

pub fn render_race_list(catalogs: &Catalogs, current: &str) -> String {
    let mut output = String::from("=== Races ===\n");
    for race in catalogs.races.all() {
        output.push_str(&format!(
            "{} {} [{}]\n",
            marker(race.id == current),
            race.name,
            race.id
        ));
    }
    output
}

pub fn render_race_detail(race: &RaceDefinition) -> String {
    let mut output = format!("=== {} ===\n", race.name);
    if let Some(summary) = &race.summary {
        output.push_str(&format!("{}\n", summary));
    }
    if let Some(appearance) = &race.appearance {
        output.push_str(&format!("Appearance: {}\n", appearance));
    }
    let rules = &race.pf1;
    if let Some(kind) = &rules.creature_type {
        if rules.subtype.is_empty() {
            output.push_str(&format!("Type: {}\n", kind));
        } else {
            output.push_str(&format!("Type: {} ({})\n", kind, rules.subtype.join(", ")));
        }
    }
    if let Some(size) = &rules.size {
        output.push_str(&format!("Size: {}\n", size));
    }
    if let Some(speed) = rules.speed {
        match &rules.fly {
            Some(fly) => output.push_str(&format!(
                "Speed: {} ft, fly {} ft{}\n",
                speed,
                fly.speed,
                fly.maneuverability
                    .as_deref()
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            )),
            None => output.push_str(&format!("Speed: {} ft\n", speed)),
        }
    }
    output.push_str(&format!("Ability mods: {}\n", format_ability_mods(race)));
    if !rules.senses.is_empty() {
        output.push_str(&format!("Senses: {}\n", rules.senses.join(", ")));
    }
    output.push_str(&format!(
        "Languages: {}\n",
        join_or_placeholder(&rules.languages.automatic)
    ));
    if !rules.languages.bonus.is_empty() {
        output.push_str(&format!("Bonus languages: {}\n", rules.languages.bonus.join(", ")));
    }
    if !rules.racial_traits.is_empty() {
        output.push_str("Racial traits:\n");
        for racial in &rules.racial_traits {
            let uses = racial
                .uses
                .as_deref()
                .map(|uses| format!(", {}", uses))
                .unwrap_or_default();
            output.push_str(&format!(
                "  - {} [{}{}]: {}\n",
                racial.name, racial.kind, uses, racial.text
            ));
        }
    }
    if !rules.growth_stages.is_empty() {
        output.push_str("Growth stages:\n");
        for (idx, stage) in rules.growth_stages.iter().enumerate() {
            output.push_str(&format!("  {}. {}", idx + 1, stage.name));
            if let Some(size) = &stage.size {
                output.push_str(&format!(" ({})", size));
            }
            if let Some(notes) = &stage.notes {
                output.push_str(&format!(": {}", notes));
            }
            output.push('\n');
        }
    }
    if let Some(social) = &race.social {
        output.push_str(&format!("Legality: {}\n", social.legality));
        if let Some(view) = &social.common_view {
            output.push_str(&format!("Common view: {}\n", view));
        }
    }
    output.push_str(&format!("Tags: {}\n", join_or_placeholder(&race.tags)));
    output
}

pub fn render_faction_list(catalogs: &Catalogs, current: &str) -> String {
    let mut output = String::from("=== Factions ===\n");
    for (group, members) in group_factions(&catalogs.factions) {
        if members.is_empty() {
            continue;
        }
        output.push_str(&format!("{}\n", group.label()));
        for faction in members {
            output.push_str(&format!(
                "  {} {} [{}]\n",
                marker(faction.id == current),
                faction.name,
                faction.id
            ));
        }
    }
    output
}

pub fn render_faction_detail(faction: &FactionDefinition) -> String {
    let mut output = format!("=== {} ===\n", faction.name);
    if let Some(summary) = &faction.summary {
        output.push_str(&format!("{}\n", summary));
    }
    if let Some(view) = &faction.commoner_view {
        output.push_str(&format!("Commoners: {}\n", view));
    }
    if let Some(doctrine) = &faction.doctrine {
        output.push_str(&format!("Virtues: {}\n", join_or_placeholder(&doctrine.virtues)));
        output.push_str(&format!("Vices: {}\n", join_or_placeholder(&doctrine.vices)));
    }
    if let Some(authority) = &faction.authority {
        if let Some(legality) = &authority.legality_profile {
            output.push_str(&format!("Legality: {}\n", legality));
        }
        if let Some(stance) = &authority.tech_stance {
            output.push_str(&format!("Tech stance: {}\n", stance));
        }
    }
    output.push_str(&format!("Tags: {}\n", join_or_placeholder(&faction.tags)));
    numbered(&mut output, "Starting hooks", &faction.starting_hooks);
    output
}

/// Classes by group, flagging the ones the current faction does not match.
pub fn render_class_list(catalogs: &Catalogs, current_class: &str, faction_id: &str) -> String {
    let mut output = String::from("=== Classes ===\n");
    for (group, members) in group_classes(&catalogs.classes) {
        output.push_str(&format!("{}\n", group));
        for class in members {
            let allowed = catalogs.class_allowed_for_faction(&class.id, faction_id);
            output.push_str(&format!(
                "  {} {} [{}]\n",
                marker(class.id == current_class),
                class_option_label(class, allowed),
                class.id
            ));
        }
    }
    output
}

pub fn render_class_detail(class: &ClassDefinition, catalogs: &Catalogs) -> String {
    let mut output = format!("=== {} — {} ===\n", class.name, class.role_name);
    if let Some(base) = &class.pf1_class {
        output.push_str(&format!("Base class: {}\n", base));
    }
    if let Some(summary) = &class.summary {
        output.push_str(&format!("{}\n", summary));
    }
    let recommended: Vec<String> = class
        .recommended_factions
        .iter()
        .map(|id| {
            catalogs
                .faction(id)
                .map(|faction| faction.display_name().to_string())
                .unwrap_or_else(|| id.clone())
        })
        .collect();
    output.push_str(&format!("Recommended factions: {}\n", join_or_placeholder(&recommended)));
    output.push_str(&format!(
        "Allowed faction tags: {}\n",
        if class.is_restricted() {
            class.allowed_faction_tags.join(", ")
        } else {
            "any".to_string()
        }
    ));
    output.push_str(&format!(
        "Suggested race tags: {}\n",
        join_or_placeholder(&class.suggested_race_tags)
    ));
    if !class.starter_kit_hints.is_empty() {
        output.push_str(&format!("Starter kits: {}\n", class.starter_kit_hints.join(", ")));
    }
    numbered(&mut output, "Hooks", &class.hooks);
    numbered(&mut output, "Rules notes", &class.rules_hooks);
    output
}

/// `+2 Str, -2 Int`, or `none` for races without adjustments.
fn format_ability_mods(race: &RaceDefinition) -> String {
    if race.pf1.ability_mods.is_empty() {
        return "none".to_string();
    }
    race.pf1
        .ability_mods
        .iter()
        .map(|(ability, value)| format!("{:+} {}", value, capitalize(ability)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn numbered(output: &mut String, heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    output.push_str(&format!("{}:\n", heading));
    for (idx, line) in lines.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", idx + 1, line));
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "*"
    } else {
        "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs::bundled().expect("bundled catalogs parse")
    }

    #[test]
    fn mismatch_suffix_only_when_not_allowed() {
        let catalogs = catalogs();
        let cleric = catalogs.class("cleric_theurge").expect("cleric exists");
        assert_eq!(class_option_label(cleric, true), "Cleric — Theurge Priest");
        assert_eq!(
            class_option_label(cleric, false),
            "Cleric — Theurge Priest (mismatch)"
        );
    }

    #[test]
    fn class_list_flags_mismatches_for_current_faction() {
        let listing = render_class_list(&catalogs(), "fighter_garrison_blade", "guild_magi");
        assert!(listing.starts_with("=== Classes ===\nTheurges (Heaven + Spirits)\n"));
        assert!(listing.contains("  - Cleric — Theurge Priest (mismatch) [cleric_theurge]\n"));
        assert!(listing.contains("  - Magus — Tech-Blade Adept [magus_tech_blade]\n"));
        assert!(listing.contains("  * Fighter — Garrison Blade [fighter_garrison_blade]\n"));
    }

    #[test]
    fn faction_list_is_grouped() {
        let listing = render_faction_list(&catalogs(), "church_stone");
        let church = listing.find("United Church of Tian\n").expect("church group");
        let guilds = listing.find("The Five Guilds (Tech Mages)\n").expect("guild group");
        let local = listing.find("Independent / Local\n").expect("local group");
        assert!(church < guilds && guilds < local);
        assert!(listing.contains("  * United Church of Tian — Stone Sect [church_stone]\n"));
    }

    #[test]
    fn race_detail_shows_traits_and_mods() {
        let catalogs = catalogs();
        let human = catalogs.race("celestial_human").expect("human exists");
        let detail = render_race_detail(human);
        assert!(detail.contains("Type: humanoid (human)\n"));
        assert!(detail.contains("Ability mods: none\n"));
        assert!(detail.contains(
            "Bonus languages: Khamek Tongue, Guild Cant, Classical Script, Spirit Speech\n"
        ));
        assert!(detail.contains("  - Bonus Feat [feat]: Gain 1 extra feat at 1st level.\n"));
        assert!(detail.contains("  - Skilled [skill]: Gain +1 skill rank per level.\n"));

        let noble = catalogs.race("noble_nanite_blooded").expect("noble exists");
        let detail = render_race_detail(noble);
        assert!(detail.contains("Ability mods: +2 Cha, -2 Wis\n"));
        assert!(detail.contains("  - Particle Veil (Su) [active, 1/day]: "));

        let dragon = catalogs.race("dragon_hatchling").expect("dragon exists");
        let detail = render_race_detail(dragon);
        assert!(detail.contains("Speed: 20 ft, fly 40 ft (good)\n"));
        assert!(detail.contains("Growth stages:\n  1. Hatchling (Small): "));
    }

    #[test]
    fn class_detail_resolves_recommended_factions() {
        let catalogs = catalogs();
        let cleric = catalogs.class("cleric_theurge").expect("cleric exists");
        let detail = render_class_detail(cleric, &catalogs);
        assert!(detail.contains("Recommended factions: Stone Sect, Palm Sect, Ledger Sect, Hammer Sect\n"));
        assert!(detail.contains("Allowed faction tags: church\n"));
        assert!(detail.contains("Hooks:\n  1. "));
    }
}
