//! Probability remapping under ping latency and Stake-Out tokens

use super::{normalize, SkillPercents};
use crate::config::BaseTimings;

/// Shrink the Great window by `ping_ms` and move the lost Great mass to Good
pub fn ping_adjust(percents: SkillPercents, ping_ms: f64, base: &BaseTimings) -> SkillPercents {
    let window = base.skill_check_great_window_ms;
    let ping = if ping_ms.is_finite() { ping_ms.max(0.0) } else { 0.0 };

    let ratio = if window > 0.0 {
        (window - ping).max(0.0) / window
    } else {
        1.0
    };

    let great = percents.great * ratio;
    let good = percents.good + (percents.great - great);
    normalize(great, good, percents.fail)
}

/// Spend a finite budget of Good→Great upgrades across `expected_checks`
///
/// This is the average effect of spending every token on a Good, not a
/// per-check simulation.
pub fn stake_out_remap(percents: SkillPercents, tokens: f64, expected_checks: f64) -> SkillPercents {
    let expected_goods = percents.good / 100.0 * expected_checks;
    let converted = tokens.max(0.0).min(expected_goods);
    let convert_ratio = if expected_goods > 0.0 {
        converted / expected_goods
    } else {
        0.0
    };

    let good = percents.good * (1.0 - convert_ratio);
    let great = percents.great + percents.good * convert_ratio;
    normalize(great, good, percents.fail)
}
