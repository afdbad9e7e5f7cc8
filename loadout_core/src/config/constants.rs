//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Read-only timing and multiplier snapshot for one calculation pass
///
/// Accepts both the snake_case TOML layout and the camelCase JSON layout
/// of the compiled `constants.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    #[serde(default)]
    pub base: BaseTimings,
    #[serde(default, alias = "itemDefaults")]
    pub item_defaults: ItemDefaults,
    #[serde(default)]
    pub multipliers: Multipliers,
    /// Stake-Out tokens assumed by the closed-form estimate
    #[serde(default = "default_stake_out_token_budget", alias = "stakeOutTokenBudget")]
    pub stake_out_token_budget: f64,
    #[serde(default)]
    pub simulation: SimulationConstants,
}

impl Default for Constants {
    fn default() -> Self {
        Constants {
            base: BaseTimings::default(),
            item_defaults: ItemDefaults::default(),
            multipliers: Multipliers::default(),
            stake_out_token_budget: default_stake_out_token_budget(),
            simulation: SimulationConstants::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTimings {
    #[serde(default = "default_generator_repair_seconds", alias = "generatorRepairSeconds")]
    pub generator_repair_seconds: f64,
    #[serde(default = "default_heal_other_seconds", alias = "healOtherSeconds")]
    pub heal_other_seconds: f64,
    #[serde(default = "default_heal_self_seconds", alias = "healSelfSeconds")]
    pub heal_self_seconds: f64,
    #[serde(default = "default_great_window_ms", alias = "skillCheckGreatWindowMs")]
    pub skill_check_great_window_ms: f64,
    #[serde(default = "default_good_window_ms", alias = "skillCheckGoodWindowMs")]
    pub skill_check_good_window_ms: f64,
    /// Average interval between skill checks
    #[serde(default = "default_interval_seconds", alias = "skillCheckIntervalSeconds")]
    pub skill_check_interval_seconds: f64,
}

impl Default for BaseTimings {
    fn default() -> Self {
        BaseTimings {
            generator_repair_seconds: default_generator_repair_seconds(),
            heal_other_seconds: default_heal_other_seconds(),
            heal_self_seconds: default_heal_self_seconds(),
            skill_check_great_window_ms: default_great_window_ms(),
            skill_check_good_window_ms: default_good_window_ms(),
            skill_check_interval_seconds: default_interval_seconds(),
        }
    }
}

fn default_generator_repair_seconds() -> f64 {
    90.0
}
fn default_heal_other_seconds() -> f64 {
    16.0
}
fn default_heal_self_seconds() -> f64 {
    32.0
}
fn default_great_window_ms() -> f64 {
    130.0
}
fn default_good_window_ms() -> f64 {
    400.0
}
fn default_interval_seconds() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefaults {
    /// Charges consumed per second of use when the item has no own rate
    #[serde(default = "default_charge_rate", alias = "chargeRatePerSecond")]
    pub charge_rate_per_second: f64,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        ItemDefaults {
            charge_rate_per_second: default_charge_rate(),
        }
    }
}

fn default_charge_rate() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    /// Repair efficiency indexed by number of additional teammates (0..3)
    #[serde(default = "default_teammate_efficiency", alias = "teammateRepairEfficiency")]
    pub teammate_repair_efficiency: Vec<f64>,
}

impl Default for Multipliers {
    fn default() -> Self {
        Multipliers {
            teammate_repair_efficiency: default_teammate_efficiency(),
        }
    }
}

impl Multipliers {
    /// Efficiency for `teammates` helpers, index clamped to the table
    pub fn teammate_multiplier(&self, teammates: u32) -> f64 {
        let table = &self.teammate_repair_efficiency;
        if table.is_empty() {
            return 1.0;
        }
        let idx = (teammates as usize).min(table.len() - 1);
        table[idx]
    }
}

fn default_teammate_efficiency() -> Vec<f64> {
    vec![1.0, 1.85, 2.55, 3.15]
}

fn default_stake_out_token_budget() -> f64 {
    4.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConstants {
    /// Hyperfocus stack cap
    #[serde(default = "default_max_stacks", alias = "maxStacks")]
    pub max_stacks: u32,
    /// Progress lost on a failed check
    #[serde(default = "default_fail_regression", alias = "failRegression")]
    pub fail_regression: f64,
    /// Upper bound on checks per trial
    #[serde(default = "default_max_checks", alias = "maxChecksPerTrial")]
    pub max_checks_per_trial: u32,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        SimulationConstants {
            max_stacks: default_max_stacks(),
            fail_regression: default_fail_regression(),
            max_checks_per_trial: default_max_checks(),
        }
    }
}

fn default_max_stacks() -> u32 {
    6
}
fn default_fail_regression() -> f64 {
    0.05
}
fn default_max_checks() -> u32 {
    10_000
}

/// Constants bundled with the crate
pub fn default_constants() -> Constants {
    let toml = include_str!("../../config/constants.toml");
    super::parse_toml(toml).unwrap_or_else(|err| {
        tracing::warn!("bundled constants.toml failed to parse, using defaults: {}", err);
        Constants::default()
    })
}
