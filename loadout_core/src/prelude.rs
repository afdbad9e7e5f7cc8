//! Prelude module for convenient imports
//!
//! ```rust
//! use loadout_core::prelude::*;
//!
//! let constants = default_constants();
//! let result = compute_deterministic(&Loadout::new(), &Dataset::default(), &constants);
//! assert!(result.repair.solo_time_seconds > 0.0);
//! ```

// Inputs
pub use crate::config::{default_constants, Constants};
pub use crate::dataset::Dataset;
pub use crate::entity::{AddOn, Entity, Item, RuleSource};
pub use crate::loadout::Loadout;

// Rules
pub use crate::rule::{compose, RuleEffect};
pub use crate::types::{Action, Combination, Target, TokenCounter, Unit};

// Calculators
pub use crate::calc::{compute_deterministic, simulate, simulate_seeded, DeterministicResult, SimulationResult};
pub use crate::skill_check::{expected_stacks, normalize, ping_adjust, stake_out_remap, SkillPercents};
