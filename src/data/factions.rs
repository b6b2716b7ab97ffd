use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{parse_document, read_document, Catalog, CatalogEntry, CatalogError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionCatalogFile {
    pub schema_version: u32,
    pub factions: Vec<FactionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub commoner_view: Option<String>,
    #[serde(default)]
    pub doctrine: Option<Doctrine>,
    #[serde(default)]
    pub authority: Option<Authority>,
    #[serde(default)]
    pub starting_hooks: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doctrine {
    #[serde(default)]
    pub virtues: Vec<String>,
    #[serde(default)]
    pub vices: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authority {
    #[serde(default)]
    pub legality_profile: Option<String>,
    #[serde(default)]
    pub tech_stance: Option<String>,
}

impl FactionDefinition {
    /// Short name when one is defined, full name otherwise.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|short| !short.is_empty())
            .unwrap_or(&self.name)
    }
}

impl CatalogEntry for FactionDefinition {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactionGroup {
    Church,
    Guilds,
    NobleHouses,
    Independent,
}

impl FactionGroup {
    pub const ORDER: [FactionGroup; 4] = [
        FactionGroup::Church,
        FactionGroup::Guilds,
        FactionGroup::NobleHouses,
        FactionGroup::Independent,
    ];

    pub fn for_id(id: &str) -> Self {
        if id.starts_with("church_") {
            FactionGroup::Church
        } else if id.starts_with("guild_") {
            FactionGroup::Guilds
        } else if id.starts_with("house_") {
            FactionGroup::NobleHouses
        } else {
            FactionGroup::Independent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FactionGroup::Church => "United Church of Tian",
            FactionGroup::Guilds => "The Five Guilds (Tech Mages)",
            FactionGroup::NobleHouses => "Noble Houses",
            FactionGroup::Independent => "Independent / Local",
        }
    }
}

/// Buckets factions by id prefix, keeping catalog order within each group.
pub fn group_factions(
    factions: &Catalog<FactionDefinition>,
) -> Vec<(FactionGroup, Vec<&FactionDefinition>)> {
    FactionGroup::ORDER
        .iter()
        .map(|group| {
            let members = factions
                .all()
                .iter()
                .filter(|faction| FactionGroup::for_id(&faction.id) == *group)
                .collect();
            (*group, members)
        })
        .collect()
}

pub fn parse_faction_catalog(
    raw: &str,
    origin: &str,
) -> Result<Catalog<FactionDefinition>, CatalogError> {
    let file: FactionCatalogFile = parse_document(raw, origin)?;
    Catalog::new("faction", file.factions)
}

pub fn load_faction_catalog(
    path: impl AsRef<Path>,
) -> Result<Catalog<FactionDefinition>, CatalogError> {
    let file: FactionCatalogFile = read_document(path.as_ref())?;
    Catalog::new("faction", file.factions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faction(id: &str, name: &str, short_name: Option<&str>) -> FactionDefinition {
        FactionDefinition {
            id: id.to_string(),
            name: name.to_string(),
            short_name: short_name.map(str::to_string),
            tags: Vec::new(),
            summary: None,
            commoner_view: None,
            doctrine: None,
            authority: None,
            starting_hooks: Vec::new(),
        }
    }

    #[test]
    fn display_name_prefers_short_name() {
        assert_eq!(
            faction("church_stone", "United Church of Tian — Stone Sect", Some("Stone Sect"))
                .display_name(),
            "Stone Sect"
        );
        assert_eq!(faction("x", "Full Name", None).display_name(), "Full Name");
        assert_eq!(faction("x", "Full Name", Some("")).display_name(), "Full Name");
    }

    #[test]
    fn groups_by_id_prefix() {
        let catalog = Catalog::new(
            "faction",
            vec![
                faction("guild_magi", "Magi", None),
                faction("church_ledger", "Ledger", None),
                faction("old_song_keepers", "Old Song", None),
                faction("house_jinyu_jade_mantle", "Jade Mantle", None),
                faction("church_palm", "Palm", None),
            ],
        )
        .expect("valid catalog");

        let groups = group_factions(&catalog);
        let ids: Vec<(FactionGroup, Vec<&str>)> = groups
            .iter()
            .map(|(group, members)| (*group, members.iter().map(|f| f.id.as_str()).collect()))
            .collect();
        assert_eq!(
            ids,
            vec![
                (FactionGroup::Church, vec!["church_ledger", "church_palm"]),
                (FactionGroup::Guilds, vec!["guild_magi"]),
                (FactionGroup::NobleHouses, vec!["house_jinyu_jade_mantle"]),
                (FactionGroup::Independent, vec!["old_song_keepers"]),
            ]
        );
    }
}
