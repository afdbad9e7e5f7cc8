//! loadout_core - Outcome estimates for a game loadout
//!
//! This library provides:
//! - compose: Override → Additive → Multiplicative rule composition
//! - skill_check: Outcome normalization, ping and Stake-Out remapping, expected stacks
//! - compute_deterministic: Closed-form repair, heal and item estimates
//! - simulate: Monte Carlo repair times used to cross-check the closed form
//! - config / Dataset / Loadout: Inputs, loaded from TOML or JSON

pub mod calc;
pub mod config;
pub mod dataset;
pub mod entity;
pub mod loadout;
pub mod prelude;
pub mod rule;
pub mod skill_check;
pub mod types;

// Re-export core types for convenience
pub use calc::{
    compute_deterministic, simulate, simulate_seeded, DeterministicResult, SimulationResult,
    SimulationRun,
};
pub use config::{default_constants, ConfigError, Constants};
pub use dataset::{Dataset, DatasetMeta};
pub use entity::{AddOn, Entity, Item, RuleSource};
pub use loadout::Loadout;
pub use rule::{compose, ModifierStack, RuleCondition, RuleEffect, StackInfo};
pub use skill_check::{expected_stacks, normalize, ping_adjust, stake_out_remap, SkillPercents};
pub use types::{Action, Combination, Outcome, Rarity, Role, Target, TokenCounter, Unit};
