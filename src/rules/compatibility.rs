use std::str::FromStr;

use bevy_ecs::prelude::*;

use crate::data::catalog::Catalog;
use crate::data::classes::ClassDefinition;

/// Fails open: unknown classes and classes without a restriction list are
/// always allowed. Restricted classes need one shared tag.
pub fn is_class_allowed(
    classes: &Catalog<ClassDefinition>,
    class_id: &str,
    faction_tags: &[String],
) -> bool {
    let Some(class) = classes.get(class_id) else {
        return true;
    };
    if !class.is_restricted() {
        return true;
    }
    class
        .allowed_faction_tags
        .iter()
        .any(|allowed| faction_tags.iter().any(|tag| tag == allowed))
}

/// What the caller does with a mismatched class pick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestrictionPolicy {
    #[default]
    Warn,
    Enforce,
}

impl RestrictionPolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            RestrictionPolicy::Enforce
        } else {
            RestrictionPolicy::Warn
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RestrictionPolicy::Warn => "warn",
            RestrictionPolicy::Enforce => "enforce",
        }
    }
}

impl FromStr for RestrictionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(RestrictionPolicy::Warn),
            "enforce" => Ok(RestrictionPolicy::Enforce),
            other => Err(format!("unknown restriction policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPick {
    Unknown,
    Blocked,
    Selected { mismatch: bool },
}

pub fn evaluate_class_pick(
    classes: &Catalog<ClassDefinition>,
    class_id: &str,
    faction_tags: &[String],
    policy: RestrictionPolicy,
) -> ClassPick {
    if !classes.contains(class_id) {
        return ClassPick::Unknown;
    }
    let allowed = is_class_allowed(classes, class_id, faction_tags);
    match (allowed, policy) {
        (false, RestrictionPolicy::Enforce) => ClassPick::Blocked,
        (allowed, _) => ClassPick::Selected { mismatch: !allowed },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: &str, allowed: &[&str]) -> ClassDefinition {
        ClassDefinition {
            id: id.to_string(),
            pf1_class: None,
            name: id.to_string(),
            role_name: "Role".to_string(),
            group: None,
            tags: Vec::new(),
            summary: None,
            recommended_factions: Vec::new(),
            suggested_faction_tags: Vec::new(),
            allowed_faction_tags: allowed.iter().map(|t| t.to_string()).collect(),
            suggested_race_tags: Vec::new(),
            hooks: Vec::new(),
            starter_kit_hints: Vec::new(),
            rules_hooks: Vec::new(),
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    fn catalog() -> Catalog<ClassDefinition> {
        Catalog::new("class", vec![class("open", &[]), class("picky", &["A", "B"])])
            .expect("valid catalog")
    }

    #[test]
    fn unknown_class_is_always_allowed() {
        let classes = catalog();
        assert!(is_class_allowed(&classes, "missing", &tags(&[])));
        assert!(is_class_allowed(&classes, "missing", &tags(&["C"])));
    }

    #[test]
    fn unrestricted_class_is_always_allowed() {
        let classes = catalog();
        assert!(is_class_allowed(&classes, "open", &tags(&[])));
        assert!(is_class_allowed(&classes, "open", &tags(&["anything"])));
    }

    #[test]
    fn restricted_class_needs_any_shared_tag() {
        let classes = catalog();
        assert!(is_class_allowed(&classes, "picky", &tags(&["B", "C"])));
        assert!(!is_class_allowed(&classes, "picky", &tags(&["C"])));
        assert!(!is_class_allowed(&classes, "picky", &tags(&[])));
    }

    #[test]
    fn pick_outcome_depends_on_policy() {
        let classes = catalog();
        let church = tags(&["C"]);
        assert_eq!(
            evaluate_class_pick(&classes, "missing", &church, RestrictionPolicy::Enforce),
            ClassPick::Unknown
        );
        assert_eq!(
            evaluate_class_pick(&classes, "picky", &church, RestrictionPolicy::Warn),
            ClassPick::Selected { mismatch: true }
        );
        assert_eq!(
            evaluate_class_pick(&classes, "picky", &church, RestrictionPolicy::Enforce),
            ClassPick::Blocked
        );
        assert_eq!(
            evaluate_class_pick(&classes, "picky", &tags(&["A"]), RestrictionPolicy::Enforce),
            ClassPick::Selected { mismatch: false }
        );
    }

    #[test]
    fn policy_parses_from_text_and_flag() {
        assert_eq!("Enforce".parse::<RestrictionPolicy>(), Ok(RestrictionPolicy::Enforce));
        assert!("strict".parse::<RestrictionPolicy>().is_err());
        assert_eq!(RestrictionPolicy::from_flag(false), RestrictionPolicy::Warn);
    }
}
