//! Closed-form repair, heal and item estimates

use super::rules::SelectedRules;
use super::safe_div;
use crate::config::Constants;
use crate::dataset::Dataset;
use crate::loadout::Loadout;
use crate::rule::compose;
use crate::skill_check::{expected_stacks, ping_adjust, stake_out_remap, SkillPercents};
use crate::types::{Action, Target};
use serde::{Deserialize, Serialize};

/// Closed-form outcome estimates for one loadout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterministicResult {
    pub repair: RepairResult,
    pub healing: HealingResult,
    pub item: ItemResult,
    pub skill: SkillResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairResult {
    pub solo_time_seconds: f64,
    pub team_time_seconds: f64,
    /// Composed repairSpeed multiplier
    pub speed_multiplier: f64,
    pub teammate_multiplier: f64,
    /// `1 + expected stacks × per-stack bonus`, or 1 when Hyperfocus is off
    pub hyperfocus_speed_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingResult {
    pub self_time_seconds: f64,
    pub other_time_seconds: f64,
    pub speed_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    pub charges_used: f64,
    pub total_charges: f64,
    /// Composed charges per second
    pub charge_rate: f64,
    pub use_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillResult {
    pub expected_hyperfocus_stacks: f64,
    /// Loadout shares after ping shrinks the Great window
    pub effective_percents: SkillPercents,
    /// Shares after the Stake-Out token budget, when enabled
    pub stake_out_percents: Option<SkillPercents>,
}

/// Compose every selected entity's effects against the base constants
pub fn compute_deterministic(
    loadout: &Loadout,
    dataset: &Dataset,
    constants: &Constants,
) -> DeterministicResult {
    let rules = SelectedRules::gather(loadout, dataset);
    let percents = loadout.skill_percents();

    // Repair
    let repair_speed = compose(1.0, rules.for_action(Action::Repair, Target::RepairSpeed));
    let teammate_multiplier = constants.multipliers.teammate_multiplier(loadout.teammates);

    let expected = expected_stacks(percents.great_probability(), constants.simulation.max_stacks);
    let hyperfocus_speed_factor = if loadout.hyperfocus_enabled {
        1.0 + expected * rules.hyperfocus_per_stack()
    } else {
        1.0
    };

    let base_gen = constants.base.generator_repair_seconds;
    let solo_time = safe_div(base_gen, repair_speed * hyperfocus_speed_factor);
    let team_time = safe_div(solo_time, teammate_multiplier);

    // Healing
    let heal_speed = compose(1.0, rules.for_action(Action::Heal, Target::HealSpeed));
    let heal_self_time = safe_div(constants.base.heal_self_seconds, heal_speed);
    let heal_other_time = safe_div(constants.base.heal_other_seconds, heal_speed);

    // Item charges
    let item = dataset.selected_item(loadout);
    let base_rate = item
        .and_then(|i| i.charge_rate)
        .unwrap_or(constants.item_defaults.charge_rate_per_second);
    let charge_rate = compose(base_rate, rules.for_action(Action::Item, Target::ItemChargeRate));
    let total_charges = item.and_then(|i| i.charges).unwrap_or(0.0);
    let use_seconds = loadout.item_use_seconds.unwrap_or(heal_other_time);
    let charges_used = finite_or_zero(total_charges.min(charge_rate * use_seconds)).max(0.0);

    // Skill checks
    let effective_percents = ping_adjust(percents, loadout.ping_ms, &constants.base);
    let stake_out_percents = loadout.stake_out_enabled.then(|| {
        let interval = constants.base.skill_check_interval_seconds;
        let checks = safe_div(solo_time, interval).floor().max(1.0);
        stake_out_remap(percents, constants.stake_out_token_budget, checks)
    });

    tracing::debug!(
        rules = rules.len(),
        repair_speed,
        hyperfocus_speed_factor,
        heal_speed,
        charge_rate,
        "composed loadout multipliers"
    );

    DeterministicResult {
        repair: RepairResult {
            solo_time_seconds: solo_time,
            team_time_seconds: team_time,
            speed_multiplier: repair_speed,
            teammate_multiplier,
            hyperfocus_speed_factor,
        },
        healing: HealingResult {
            self_time_seconds: heal_self_time,
            other_time_seconds: heal_other_time,
            speed_multiplier: heal_speed,
        },
        item: ItemResult {
            charges_used,
            total_charges,
            charge_rate,
            use_seconds,
        },
        skill: SkillResult {
            expected_hyperfocus_stacks: expected,
            effective_percents,
            stake_out_percents,
        },
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
