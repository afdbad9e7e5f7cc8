//! Core enums shared by rules, entities and loadouts

use serde::{Deserialize, Serialize};

/// Which side of the match an entity or loadout belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Survivor,
    Killer,
}

/// Action a rule is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Repair,
    Heal,
    Item,
    SkillCheck,
}

impl Action {
    /// Get all actions
    pub fn all() -> &'static [Action] {
        &[Action::Repair, Action::Heal, Action::Item, Action::SkillCheck]
    }
}

/// Statistic a rule modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    RepairSpeed,
    HealSpeed,
    ItemChargeRate,
    SkillCheckGreatWindowMs,
    SkillCheckInterval,
    TokenChange,
    SkillCheckBonus,
}

/// How a rule's value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Value is a percentage (10 = +10%)
    Percent,
    /// Value is used as-is
    Absolute,
}

impl Unit {
    /// Scale a raw rule value into a plain number (10% -> 0.10)
    pub fn scale(self, value: f64) -> f64 {
        match self {
            Unit::Percent => value / 100.0,
            Unit::Absolute => value,
        }
    }
}

/// How a rule merges with the running value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combination {
    /// Replace the running value (last one wins)
    Override,
    /// Summed with other additive rules, applied once
    Additive,
    /// Compounded as a factor
    Multiplicative,
}

/// Named counter a stacking rule feeds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenCounter {
    Hyperfocus,
    StakeOut,
    Other(String),
}

impl From<String> for TokenCounter {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hyperfocus" => TokenCounter::Hyperfocus,
            "stakeout" => TokenCounter::StakeOut,
            _ => TokenCounter::Other(s),
        }
    }
}

impl From<&str> for TokenCounter {
    fn from(s: &str) -> Self {
        TokenCounter::from(s.to_string())
    }
}

impl From<TokenCounter> for String {
    fn from(counter: TokenCounter) -> Self {
        match counter {
            TokenCounter::Hyperfocus => "hyperfocus".to_string(),
            TokenCounter::StakeOut => "stakeout".to_string(),
            TokenCounter::Other(s) => s,
        }
    }
}

/// Entity rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
    UltraRare,
    Event,
}

/// Skill-check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Great,
    Good,
    Fail,
}
