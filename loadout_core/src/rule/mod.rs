//! RuleEffect - Data-driven modifiers attached to entities

mod compose;

pub use compose::{compose, Factor, ModifierStack};

use crate::types::{Action, Combination, Role, Target, TokenCounter, Unit};
use serde::{Deserialize, Serialize};

/// A single modifier attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEffect {
    pub id: String,
    pub target: Target,
    pub value: f64,
    pub unit: Unit,
    pub combination: Combination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<RuleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacks: Option<StackInfo>,
}

/// When a rule is in effect
///
/// Only `action` and `continuous` take part in rule selection; the other
/// fields are carried for data fidelity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teammates_nearby: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using_item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_great: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_good: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_fail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
}

/// Stacking behaviour for rules that scale with a counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stacks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_stack_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_counter: Option<TokenCounter>,
}

impl RuleEffect {
    /// Create an unconditional rule
    pub fn new(
        id: impl Into<String>,
        target: Target,
        value: f64,
        unit: Unit,
        combination: Combination,
    ) -> Self {
        RuleEffect {
            id: id.into(),
            target,
            value,
            unit,
            combination,
            conditions: None,
            stacks: None,
        }
    }

    /// Scope this rule to a single action
    pub fn for_action(mut self, action: Action) -> Self {
        self.conditions.get_or_insert_with(RuleCondition::default).action = Some(action);
        self
    }

    /// Mark this rule as always active
    pub fn continuous(mut self) -> Self {
        self.conditions.get_or_insert_with(RuleCondition::default).continuous = Some(true);
        self
    }

    /// Attach stacking info
    pub fn with_stacks(mut self, counter: TokenCounter, per_stack_value: f64, max_stacks: u32) -> Self {
        self.stacks = Some(StackInfo {
            max_stacks: Some(max_stacks),
            per_stack_value: Some(per_stack_value),
            token_counter: Some(counter),
        });
        self
    }

    /// Whether this rule is selected when computing `action`
    ///
    /// A rule without a conditions block applies everywhere.
    pub fn applies_to(&self, action: Action) -> bool {
        match &self.conditions {
            None => true,
            Some(cond) => cond.action == Some(action) || cond.continuous == Some(true),
        }
    }

    /// Whether this rule feeds the given stack counter
    pub fn is_stacking(&self, counter: &TokenCounter) -> bool {
        self.stacks
            .as_ref()
            .and_then(|s| s.token_counter.as_ref())
            .is_some_and(|c| c == counter)
    }

    /// Per-stack contribution as a plain number (percent rules are divided by 100)
    pub fn per_stack_bonus(&self) -> f64 {
        let raw = self
            .stacks
            .as_ref()
            .and_then(|s| s.per_stack_value)
            .unwrap_or(0.0);
        self.unit.scale(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconditioned_rule_applies_everywhere() {
        let rule = RuleEffect::new("r", Target::RepairSpeed, 5.0, Unit::Percent, Combination::Additive);
        for action in Action::all() {
            assert!(rule.applies_to(*action));
        }
    }

    #[test]
    fn test_action_scoped_rule() {
        let rule = RuleEffect::new("r", Target::HealSpeed, 5.0, Unit::Percent, Combination::Additive)
            .for_action(Action::Heal);
        assert!(rule.applies_to(Action::Heal));
        assert!(!rule.applies_to(Action::Repair));
    }

    #[test]
    fn test_empty_conditions_block_matches_nothing() {
        let mut rule = RuleEffect::new("r", Target::HealSpeed, 5.0, Unit::Percent, Combination::Additive);
        rule.conditions = Some(RuleCondition {
            injured: Some(true),
            ..RuleCondition::default()
        });
        assert!(!rule.applies_to(Action::Heal));
    }

    #[test]
    fn test_continuous_rule() {
        let rule = RuleEffect::new("r", Target::RepairSpeed, 5.0, Unit::Percent, Combination::Additive)
            .for_action(Action::Heal)
            .continuous();
        assert!(rule.applies_to(Action::Repair));
        assert!(rule.applies_to(Action::Heal));
    }

    #[test]
    fn test_per_stack_bonus() {
        let rule = RuleEffect::new("hf", Target::RepairSpeed, 0.0, Unit::Percent, Combination::Additive)
            .with_stacks(TokenCounter::Hyperfocus, 4.0, 6);
        assert!(rule.is_stacking(&TokenCounter::Hyperfocus));
        assert!(!rule.is_stacking(&TokenCounter::StakeOut));
        assert!((rule.per_stack_bonus() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_parse_rule_json() {
        let json = r#"{
            "id": "hyperfocus_stack",
            "target": "repairSpeed",
            "value": 0,
            "unit": "percent",
            "combination": "additive",
            "conditions": { "action": "skill-check", "onGreat": true },
            "stacks": { "maxStacks": 6, "perStackValue": 4, "tokenCounter": "hyperfocus" }
        }"#;
        let rule: RuleEffect = serde_json::from_str(json).unwrap();
        assert_eq!(rule.target, Target::RepairSpeed);
        assert!(rule.applies_to(Action::SkillCheck));
        assert_eq!(rule.conditions.as_ref().unwrap().on_great, Some(true));
        assert!(rule.is_stacking(&TokenCounter::Hyperfocus));
    }
}
