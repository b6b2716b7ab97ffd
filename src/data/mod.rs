pub mod catalog;
pub mod classes;
pub mod factions;
pub mod races;

use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::{info, warn};

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use classes::{group_classes, ClassDefinition};
pub use factions::{group_factions, FactionDefinition, FactionGroup};
pub use races::RaceDefinition;

use crate::rules::compatibility::is_class_allowed;

pub const RACES_FILE: &str = "races.json";
pub const FACTIONS_FILE: &str = "factions.json";
pub const CLASSES_FILE: &str = "classes.json";

const BUNDLED_RACES: &str = include_str!("../../assets/data/races.json");
const BUNDLED_FACTIONS: &str = include_str!("../../assets/data/factions.json");
const BUNDLED_CLASSES: &str = include_str!("../../assets/data/classes.json");

/// The three reference tables, loaded once and never mutated.
#[derive(Resource, Debug, Clone, Default)]
pub struct Catalogs {
    pub races: Catalog<RaceDefinition>,
    pub factions: Catalog<FactionDefinition>,
    pub classes: Catalog<ClassDefinition>,
}

impl Catalogs {
    /// Tables compiled into the binary from `assets/data`.
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self {
            races: races::parse_race_catalog(BUNDLED_RACES, "bundled races.json")?,
            factions: factions::parse_faction_catalog(BUNDLED_FACTIONS, "bundled factions.json")?,
            classes: classes::parse_class_catalog(BUNDLED_CLASSES, "bundled classes.json")?,
        })
    }

    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        Ok(Self {
            races: races::load_race_catalog(dir.join(RACES_FILE))?,
            factions: factions::load_faction_catalog(dir.join(FACTIONS_FILE))?,
            classes: classes::load_class_catalog(dir.join(CLASSES_FILE))?,
        })
    }

    /// Never fails: a broken data directory falls back to the bundled tables,
    /// and broken bundled tables fall back to empty ones.
    pub fn load_or_bundled(dir: Option<&Path>) -> Self {
        if let Some(dir) = dir {
            match Self::load_dir(dir) {
                Ok(catalogs) => {
                    info!(
                        "Loaded catalogs from {} ({} races, {} factions, {} classes)",
                        dir.display(),
                        catalogs.races.len(),
                        catalogs.factions.len(),
                        catalogs.classes.len()
                    );
                    return catalogs;
                }
                Err(err) => {
                    warn!("Failed to load catalogs from {}: {}", dir.display(), err);
                }
            }
        }

        match Self::bundled() {
            Ok(catalogs) => catalogs,
            Err(err) => {
                warn!("Failed to load bundled catalogs: {}", err);
                Self::default()
            }
        }
    }

    pub fn race(&self, id: &str) -> Option<&RaceDefinition> {
        self.races.get(id)
    }

    pub fn faction(&self, id: &str) -> Option<&FactionDefinition> {
        self.factions.get(id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    pub fn race_has_tag(&self, race_id: &str, tag: &str) -> bool {
        self.races.has_tag(race_id, tag)
    }

    pub fn faction_has_tag(&self, faction_id: &str, tag: &str) -> bool {
        self.factions.has_tag(faction_id, tag)
    }

    /// Empty for factions absent from the table.
    pub fn faction_tags(&self, faction_id: &str) -> &[String] {
        self.faction(faction_id)
            .map(|faction| faction.tags.as_slice())
            .unwrap_or(&[])
    }

    pub fn class_allowed_for_faction(&self, class_id: &str, faction_id: &str) -> bool {
        is_class_allowed(&self.classes, class_id, self.faction_tags(faction_id))
    }
}
