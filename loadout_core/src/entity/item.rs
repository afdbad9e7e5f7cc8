//! Items and add-ons

use super::{Entity, RuleSource};
use crate::rule::RuleEffect;
use serde::{Deserialize, Serialize};

/// A usable item with a charge pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<f64>,
    /// Charges consumed per second of use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_rate: Option<f64>,
}

impl Item {
    pub fn new(entity: Entity) -> Self {
        Item {
            entity,
            charges: None,
            charge_rate: None,
        }
    }

    pub fn with_charges(mut self, charges: f64) -> Self {
        self.charges = Some(charges);
        self
    }

    pub fn with_charge_rate(mut self, rate: f64) -> Self {
        self.charge_rate = Some(rate);
        self
    }
}

impl RuleSource for Item {
    fn id(&self) -> &str {
        &self.entity.id
    }

    fn rules(&self) -> &[RuleEffect] {
        &self.entity.rules
    }
}

/// An add-on attached to an item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_item_type: Option<String>,
}

impl RuleSource for AddOn {
    fn id(&self) -> &str {
        &self.entity.id
    }

    fn rules(&self) -> &[RuleEffect] {
        &self.entity.rules
    }
}
