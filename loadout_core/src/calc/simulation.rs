//! Monte Carlo repair simulation
//!
//! Each trial repairs one generator check by check. Results are sorted
//! before percentiles are taken, so trial order never changes the output
//! and a host can run trials in chunks through [`SimulationRun`].

use super::rules::SelectedRules;
use super::safe_div;
use crate::config::Constants;
use crate::dataset::Dataset;
use crate::loadout::Loadout;
use crate::rule::compose;
use crate::skill_check::{ping_adjust, SkillPercents};
use crate::types::{Action, Outcome, Target};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tolerance on the completion test so accumulated float steps finish on time
const COMPLETION_EPSILON: f64 = 1e-9;

/// Sampled repair-time distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub repair_time_seconds: TimeStats,
    /// Average Hyperfocus stacks held when the generator completed
    pub expected_stacks_avg: f64,
    pub trials: u64,
    /// Trials stopped by the per-trial check limit
    pub capped_trials: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    pub avg: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Everything a single trial needs, resolved once per simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Generator seconds after repair-speed effects
    pub base_seconds: f64,
    pub interval_seconds: f64,
    /// Ping-adjusted outcome shares
    pub percents: SkillPercents,
    /// Hyperfocus bonus per stack (0.04 = +4%)
    pub per_stack_bonus: f64,
    pub stake_out_tokens: u32,
    pub max_stacks: u32,
    pub fail_regression: f64,
    pub max_checks: u32,
}

impl SimulationParams {
    pub fn from_loadout(loadout: &Loadout, dataset: &Dataset, constants: &Constants) -> Self {
        let rules = SelectedRules::gather(loadout, dataset);
        let repair_speed = compose(1.0, rules.for_action(Action::Repair, Target::RepairSpeed));

        let per_stack_bonus = if loadout.hyperfocus_enabled {
            rules.hyperfocus_per_stack()
        } else {
            0.0
        };
        let stake_out_tokens = if loadout.stake_out_enabled {
            loadout.stake_out_tokens
        } else {
            0
        };

        SimulationParams {
            base_seconds: safe_div(constants.base.generator_repair_seconds, repair_speed),
            interval_seconds: constants.base.skill_check_interval_seconds,
            percents: ping_adjust(loadout.skill_percents(), loadout.ping_ms, &constants.base),
            per_stack_bonus,
            stake_out_tokens,
            max_stacks: constants.simulation.max_stacks,
            fail_regression: constants.simulation.fail_regression,
            max_checks: constants.simulation.max_checks_per_trial,
        }
    }
}

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub time_seconds: f64,
    pub final_stacks: u32,
    pub capped: bool,
}

/// Run one generator repair to completion
pub fn run_trial(params: &SimulationParams, rng: &mut impl Rng) -> TrialOutcome {
    let mut time = 0.0;
    let mut progress = if params.base_seconds > 0.0 { 0.0 } else { 1.0 };
    let step = safe_div(params.interval_seconds, params.base_seconds);
    let mut stacks = 0u32;
    let mut tokens = params.stake_out_tokens;
    let mut checks = 0u32;
    let mut capped = false;

    while progress < 1.0 - COMPLETION_EPSILON {
        if checks >= params.max_checks {
            capped = true;
            break;
        }
        checks += 1;
        time += params.interval_seconds;

        let roll = rng.gen::<f64>() * 100.0;
        let mut outcome = params.percents.outcome_for_roll(roll);
        if outcome == Outcome::Good && tokens > 0 {
            outcome = Outcome::Great;
            tokens -= 1;
        }

        match outcome {
            Outcome::Great => {
                stacks = (stacks + 1).min(params.max_stacks);
                progress += step * (1.0 + stacks as f64 * params.per_stack_bonus);
            }
            Outcome::Good => {
                stacks = 0;
                progress += step;
            }
            Outcome::Fail => {
                stacks = 0;
                progress = (progress - params.fail_regression).max(0.0);
            }
        }
    }

    TrialOutcome {
        time_seconds: time,
        final_stacks: stacks,
        capped,
    }
}

/// Incremental simulation that can be advanced in chunks
///
/// Dropping a run between chunks leaves nothing behind; `finish` reports
/// on the trials completed so far.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    params: SimulationParams,
    times: Vec<f64>,
    stack_total: u64,
    capped: u64,
}

impl SimulationRun {
    pub fn new(params: SimulationParams) -> Self {
        SimulationRun {
            params,
            times: Vec::new(),
            stack_total: 0,
            capped: 0,
        }
    }

    /// Number of trials completed so far
    pub fn completed(&self) -> usize {
        self.times.len()
    }

    /// Run `trials` more trials
    pub fn run(&mut self, trials: u32, rng: &mut impl Rng) {
        self.times.reserve(trials as usize);
        for _ in 0..trials {
            let outcome = run_trial(&self.params, rng);
            self.times.push(outcome.time_seconds);
            self.stack_total += u64::from(outcome.final_stacks);
            if outcome.capped {
                self.capped += 1;
            }
        }
    }

    /// Aggregate completed trials
    pub fn finish(mut self) -> SimulationResult {
        let n = self.times.len();
        if n == 0 {
            return SimulationResult::default();
        }
        if self.capped > 0 {
            tracing::warn!(
                "{} of {} trials hit the {}-check limit",
                self.capped,
                n,
                self.params.max_checks
            );
        }

        self.times.sort_by(f64::total_cmp);
        let avg = self.times.iter().sum::<f64>() / n as f64;

        SimulationResult {
            repair_time_seconds: TimeStats {
                avg,
                p50: percentile(&self.times, 50.0),
                p90: percentile(&self.times, 90.0),
            },
            expected_stacks_avg: self.stack_total as f64 / n as f64,
            trials: n as u64,
            capped_trials: self.capped,
        }
    }
}

/// Nearest-rank-below percentile of an ascending slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Sample `trials` repairs for a loadout using the given random source
pub fn simulate(
    loadout: &Loadout,
    dataset: &Dataset,
    constants: &Constants,
    trials: u32,
    rng: &mut impl Rng,
) -> SimulationResult {
    let params = SimulationParams::from_loadout(loadout, dataset, constants);
    tracing::debug!(
        trials,
        base_seconds = params.base_seconds,
        great = params.percents.great,
        per_stack_bonus = params.per_stack_bonus,
        "starting repair simulation"
    );
    let mut run = SimulationRun::new(params);
    run.run(trials, rng);
    run.finish()
}

/// [`simulate`] with a ChaCha8 generator seeded from `seed`
pub fn simulate_seeded(
    loadout: &Loadout,
    dataset: &Dataset,
    constants: &Constants,
    trials: u32,
    seed: u64,
) -> SimulationResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate(loadout, dataset, constants, trials, &mut rng)
}
