use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{parse_document, read_document, Catalog, CatalogEntry, CatalogError};

pub const OTHER_GROUP: &str = "Other";

/// Display order for class groups; groups not listed here follow in first-seen order.
pub const CLASS_GROUP_ORDER: [&str; 5] = [
    "Theurges (Heaven + Spirits)",
    "Tech Mages",
    "Nobles / Wuxia Knights",
    "Wanderers",
    OTHER_GROUP,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalogFile {
    pub schema_version: u32,
    pub classes: Vec<ClassDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    #[serde(default)]
    pub pf1_class: Option<String>,
    pub name: String,
    pub role_name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub recommended_factions: Vec<String>,
    #[serde(default)]
    pub suggested_faction_tags: Vec<String>,
    /// Empty means unrestricted.
    #[serde(default)]
    pub allowed_faction_tags: Vec<String>,
    #[serde(default)]
    pub suggested_race_tags: Vec<String>,
    #[serde(default)]
    pub hooks: Vec<String>,
    #[serde(default)]
    pub starter_kit_hints: Vec<String>,
    #[serde(default)]
    pub rules_hooks: Vec<String>,
}

impl ClassDefinition {
    pub fn group_label(&self) -> &str {
        self.group
            .as_deref()
            .filter(|group| !group.is_empty())
            .unwrap_or(OTHER_GROUP)
    }

    pub fn is_restricted(&self) -> bool {
        !self.allowed_faction_tags.is_empty()
    }
}

impl CatalogEntry for ClassDefinition {
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

pub fn group_classes(classes: &Catalog<ClassDefinition>) -> Vec<(String, Vec<&ClassDefinition>)> {
    let mut groups: Vec<(String, Vec<&ClassDefinition>)> = Vec::new();
    for class in classes.all() {
        let label = class.group_label();
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, members)) => members.push(class),
            None => groups.push((label.to_string(), vec![class])),
        }
    }

    let mut ordered = Vec::with_capacity(groups.len());
    for key in CLASS_GROUP_ORDER {
        if let Some(pos) = groups.iter().position(|(name, _)| name == key) {
            ordered.push(groups.remove(pos));
        }
    }
    ordered.extend(groups);
    ordered
}

pub fn parse_class_catalog(
    raw: &str,
    origin: &str,
) -> Result<Catalog<ClassDefinition>, CatalogError> {
    let file: ClassCatalogFile = parse_document(raw, origin)?;
    Catalog::new("class", file.classes)
}

pub fn load_class_catalog(path: impl AsRef<Path>) -> Result<Catalog<ClassDefinition>, CatalogError> {
    let file: ClassCatalogFile = read_document(path.as_ref())?;
    Catalog::new("class", file.classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, group: Option<&str>) -> ClassDefinition {
        ClassDefinition {
            id: id.to_string(),
            pf1_class: None,
            name: id.to_string(),
            role_name: "Role".to_string(),
            group: group.map(str::to_string),
            tags: Vec::new(),
            summary: None,
            recommended_factions: Vec::new(),
            suggested_faction_tags: Vec::new(),
            allowed_faction_tags: Vec::new(),
            suggested_race_tags: Vec::new(),
            hooks: Vec::new(),
            starter_kit_hints: Vec::new(),
            rules_hooks: Vec::new(),
        }
    }

    #[test]
    fn groups_follow_fixed_order_then_first_seen() {
        let catalog = Catalog::new(
            "class",
            vec![
                class("drifter", Some("Homebrew")),
                class("ranger", Some("Wanderers")),
                class("oddity", None),
                class("magus", Some("Tech Mages")),
                class("bard", Some("Wanderers")),
                class("cleric", Some("Theurges (Heaven + Spirits)")),
            ],
        )
        .expect("valid catalog");

        let grouped: Vec<(String, Vec<&str>)> = group_classes(&catalog)
            .into_iter()
            .map(|(name, members)| (name, members.iter().map(|c| c.id.as_str()).collect()))
            .collect();

        assert_eq!(
            grouped,
            vec![
                ("Theurges (Heaven + Spirits)".to_string(), vec!["cleric"]),
                ("Tech Mages".to_string(), vec!["magus"]),
                ("Wanderers".to_string(), vec!["ranger", "bard"]),
                ("Other".to_string(), vec!["oddity"]),
                ("Homebrew".to_string(), vec!["drifter"]),
            ]
        );
    }
}
