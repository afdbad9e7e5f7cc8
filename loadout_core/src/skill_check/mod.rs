//! Skill-check probability model
//!
//! All percentages here are on a 0..=100 scale and every transformation
//! ends in [`normalize`], so outputs always sum to 100.

mod remap;

pub use remap::{ping_adjust, stake_out_remap};

use crate::types::Outcome;
use serde::{Deserialize, Serialize};

/// Default Hyperfocus stack cap
pub const DEFAULT_STACK_CAP: u32 = 6;

/// Three-way skill-check outcome distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillPercents {
    pub great: f64,
    pub good: f64,
    pub fail: f64,
}

impl Default for SkillPercents {
    fn default() -> Self {
        SkillPercents {
            great: 50.0,
            good: 40.0,
            fail: 10.0,
        }
    }
}

impl SkillPercents {
    /// Create without normalizing
    pub fn new(great: f64, good: f64, fail: f64) -> Self {
        SkillPercents { great, good, fail }
    }

    pub fn total(&self) -> f64 {
        self.great + self.good + self.fail
    }

    /// Great chance as a probability in [0, 1]
    pub fn great_probability(&self) -> f64 {
        (self.great / 100.0).clamp(0.0, 1.0)
    }

    /// Map a uniform roll in [0, 100) onto an outcome
    pub fn outcome_for_roll(&self, roll: f64) -> Outcome {
        if roll < self.great {
            Outcome::Great
        } else if roll < self.great + self.good {
            Outcome::Good
        } else {
            Outcome::Fail
        }
    }

    pub fn normalized(self) -> Self {
        normalize(self.great, self.good, self.fail)
    }
}

fn clamp_share(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Rescale three outcome shares so they sum to 100
///
/// Negative or non-finite shares count as 0. A non-positive total is
/// treated as all-fail.
pub fn normalize(great: f64, good: f64, fail: f64) -> SkillPercents {
    let great = clamp_share(great);
    let good = clamp_share(good);
    let fail = clamp_share(fail);
    let sum = great + good + fail;

    if sum == 100.0 {
        return SkillPercents { great, good, fail };
    }
    if sum <= 0.0 || !sum.is_finite() {
        return SkillPercents {
            great: 0.0,
            good: 0.0,
            fail: 100.0,
        };
    }

    let scale = 100.0 / sum;
    SkillPercents {
        great: great * scale,
        good: good * scale,
        fail: fail * scale,
    }
}

/// Expected Hyperfocus stacks: `Σ_{k=1..cap} p^k`
pub fn expected_stacks(p_great: f64, cap: u32) -> f64 {
    let p = p_great.clamp(0.0, 1.0);
    let mut sum = 0.0;
    let mut term = 1.0;
    for _ in 0..cap {
        term *= p;
        sum += term;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_exact_sum_unchanged() {
        let p = normalize(50.0, 40.0, 10.0);
        assert_eq!(p, SkillPercents::new(50.0, 40.0, 10.0));
    }

    #[test]
    fn test_normalize_zero_is_all_fail() {
        assert_eq!(normalize(0.0, 0.0, 0.0), SkillPercents::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_normalize_scales_proportionally() {
        let p = normalize(30.0, 10.0, 10.0);
        assert!((p.great - 60.0).abs() < 1e-9);
        assert!((p.good - 20.0).abs() < 1e-9);
        assert!((p.fail - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_clamps_negative() {
        let p = normalize(120.0, -20.0, 0.0);
        assert!((p.great - 100.0).abs() < 1e-9);
        assert_eq!(p.good, 0.0);
        assert!((p.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_nan_is_ignored() {
        let p = normalize(f64::NAN, 50.0, 50.0);
        assert_eq!(p, SkillPercents::new(0.0, 50.0, 50.0));
    }

    #[test]
    fn test_expected_stacks_bounds() {
        assert_eq!(expected_stacks(0.0, DEFAULT_STACK_CAP), 0.0);
        assert!((expected_stacks(1.0, DEFAULT_STACK_CAP) - 6.0).abs() < 1e-12);
        assert!((expected_stacks(1.0, 3) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_expected_stacks_known_value() {
        // 0.5 + 0.25 + 0.125
        assert!((expected_stacks(0.5, 3) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_expected_stacks_increasing() {
        assert!(expected_stacks(0.6, DEFAULT_STACK_CAP) > expected_stacks(0.4, DEFAULT_STACK_CAP));
    }

    #[test]
    fn test_outcome_for_roll() {
        let p = SkillPercents::new(50.0, 40.0, 10.0);
        assert_eq!(p.outcome_for_roll(0.0), Outcome::Great);
        assert_eq!(p.outcome_for_roll(49.99), Outcome::Great);
        assert_eq!(p.outcome_for_roll(50.0), Outcome::Good);
        assert_eq!(p.outcome_for_roll(89.99), Outcome::Good);
        assert_eq!(p.outcome_for_roll(90.0), Outcome::Fail);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_sums_to_100(g in 0.0f64..1000.0, gd in 0.0f64..1000.0, f in 0.0f64..1000.0) {
                prop_assume!(g + gd + f > 0.0);
                let p = normalize(g, gd, f);
                prop_assert!((p.total() - 100.0).abs() < 1e-6);
                for share in [p.great, p.good, p.fail] {
                    prop_assert!((0.0..=100.0 + 1e-9).contains(&share));
                }
            }

            #[test]
            fn expected_stacks_strictly_increasing(a in 0.001f64..0.999, b in 0.001f64..0.999) {
                prop_assume!((a - b).abs() > 1e-6);
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                prop_assert!(expected_stacks(hi, DEFAULT_STACK_CAP) > expected_stacks(lo, DEFAULT_STACK_CAP));
            }
        }
    }
}
