//! Calculators - Closed-form estimates and the Monte Carlo cross-check

mod deterministic;
mod rules;
mod simulation;

pub use deterministic::{
    compute_deterministic, DeterministicResult, HealingResult, ItemResult, RepairResult, SkillResult,
};
pub use rules::SelectedRules;
pub use simulation::{
    run_trial, simulate, simulate_seeded, SimulationParams, SimulationResult, SimulationRun,
    TimeStats, TrialOutcome,
};

/// Divide, returning 0 for a non-positive or non-finite denominator
pub(crate) fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() {
        let value = numerator / denominator;
        if value.is_finite() {
            return value;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(90.0, 2.0), 45.0);
        assert_eq!(safe_div(90.0, 0.0), 0.0);
        assert_eq!(safe_div(90.0, -1.0), 0.0);
        assert_eq!(safe_div(90.0, f64::NAN), 0.0);
    }
}
