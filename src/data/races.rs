use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{parse_document, read_document, Catalog, CatalogEntry, CatalogError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceCatalogFile {
    pub schema_version: u32,
    pub races: Vec<RaceDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default)]
    pub pf1: RaceRules,
    #[serde(default)]
    pub social: Option<SocialStanding>,
}

/// Pathfinder 1e statistics for a race.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceRules {
    #[serde(default)]
    pub creature_type: Option<String>,
    #[serde(default)]
    pub subtype: Vec<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub speed: Option<u32>,
    #[serde(default)]
    pub fly: Option<FlySpeed>,
    /// Keyed by ability abbreviation (`str`, `dex`, ...).
    #[serde(default)]
    pub ability_mods: BTreeMap<String, i32>,
    #[serde(default)]
    pub senses: Vec<String>,
    #[serde(default)]
    pub languages: Languages,
    #[serde(default)]
    pub racial_traits: Vec<RacialTrait>,
    #[serde(default)]
    pub growth_stages: Vec<GrowthStage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlySpeed {
    pub speed: u32,
    #[serde(default)]
    pub maneuverability: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Languages {
    #[serde(default)]
    pub automatic: Vec<String>,
    #[serde(default)]
    pub bonus: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RacialTrait {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub uses: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthStage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub unlocks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialStanding {
    pub legality: String,
    #[serde(default)]
    pub common_view: Option<String>,
}

impl RaceDefinition {
    pub fn racial_trait(&self, id: &str) -> Option<&RacialTrait> {
        self.pf1.racial_traits.iter().find(|racial| racial.id == id)
    }
}

impl CatalogEntry for RaceDefinition {
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

pub fn parse_race_catalog(raw: &str, origin: &str) -> Result<Catalog<RaceDefinition>, CatalogError> {
    let file: RaceCatalogFile = parse_document(raw, origin)?;
    Catalog::new("race", file.races)
}

pub fn load_race_catalog(path: impl AsRef<Path>) -> Result<Catalog<RaceDefinition>, CatalogError> {
    let file: RaceCatalogFile = read_document(path.as_ref())?;
    Catalog::new("race", file.races)
}
