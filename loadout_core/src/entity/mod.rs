//! Entities - Characters, items, add-ons, perks and offerings

mod item;

pub use item::{AddOn, Item};

use crate::rule::RuleEffect;
use crate::types::{Rarity, Role};
use serde::{Deserialize, Serialize};

/// Trait for anything that contributes rule effects to a calculation
pub trait RuleSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Rule effects carried by this source
    fn rules(&self) -> &[RuleEffect];
}

/// Fields shared by every dataset entity
///
/// Characters, perks and offerings are plain entities; items and add-ons
/// wrap one with their own extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identifier, unique within its collection
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Absent means role-agnostic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub rules: Vec<RuleEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Entity {
    /// Create an entity with no rules
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Entity {
            id: id.into(),
            name: name.into(),
            description: None,
            rarity: None,
            icon: None,
            role: None,
            rules: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Add a rule effect
    pub fn with_rule(mut self, rule: RuleEffect) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether this entity can be used by `role`
    pub fn usable_by(&self, role: Role) -> bool {
        self.role.map_or(true, |r| r == role)
    }
}

impl RuleSource for Entity {
    fn id(&self) -> &str {
        &self.id
    }

    fn rules(&self) -> &[RuleEffect] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combination, Target, Unit};

    #[test]
    fn test_parse_entity_ignores_type_tag() {
        let json = r#"{
            "type": "perk",
            "id": "resilience",
            "name": "Resilience",
            "role": "survivor",
            "rarity": "very_rare",
            "rules": [
                { "id": "res_repair", "target": "repairSpeed", "value": 9,
                  "unit": "percent", "combination": "additive",
                  "conditions": { "injured": true, "continuous": true } }
            ]
        }"#;
        let perk: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(perk.id, "resilience");
        assert_eq!(perk.rarity, Some(Rarity::VeryRare));
        assert_eq!(perk.rules().len(), 1);
    }

    #[test]
    fn test_missing_rules_default_empty() {
        let entity: Entity = serde_json::from_str(r#"{ "id": "a", "name": "A" }"#).unwrap();
        assert!(entity.rules.is_empty());
        assert!(entity.usable_by(Role::Killer));
    }

    #[test]
    fn test_role_filter() {
        let entity = Entity::new("a", "A")
            .with_role(Role::Survivor)
            .with_rule(RuleEffect::new("r", Target::HealSpeed, 5.0, Unit::Percent, Combination::Additive));
        assert!(entity.usable_by(Role::Survivor));
        assert!(!entity.usable_by(Role::Killer));
    }
}
