//! Loadout - The player's selections plus behavioural assumptions

use crate::config::ConfigError;
use crate::skill_check::{normalize, SkillPercents};
use crate::types::Role;
use serde::{Deserialize, Serialize};

pub const MAX_ADDONS: usize = 2;
pub const MAX_PERKS: usize = 4;
pub const MAX_TEAMMATES: u32 = 3;
pub const DEFAULT_TRIALS: u32 = 10_000;

/// Immutable snapshot of everything the calculators read from the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub role: Role,
    pub character_id: Option<String>,
    pub item_id: Option<String>,
    pub addon_ids: Vec<String>,
    pub perk_ids: Vec<String>,
    pub offering_id: Option<String>,

    /// Other teammates working on the same generator (0..=3)
    pub teammates: u32,
    pub injured: bool,
    /// Skill-check outcome shares, always summing to 100
    pub skill: SkillPercents,
    pub stake_out_enabled: bool,
    pub stake_out_tokens: u32,
    pub ping_ms: f64,
    pub hyperfocus_enabled: bool,
    pub simulation_enabled: bool,
    pub simulation_trials: u32,
    /// Seconds the item is held in use; `None` couples it to heal-other time
    pub item_use_seconds: Option<f64>,
}

impl Default for Loadout {
    fn default() -> Self {
        Loadout {
            role: Role::Survivor,
            character_id: None,
            item_id: None,
            addon_ids: Vec::new(),
            perk_ids: Vec::new(),
            offering_id: None,
            teammates: 0,
            injured: false,
            skill: SkillPercents::default(),
            stake_out_enabled: false,
            stake_out_tokens: 0,
            ping_ms: 50.0,
            hyperfocus_enabled: true,
            simulation_enabled: false,
            simulation_trials: DEFAULT_TRIALS,
            item_use_seconds: None,
        }
    }
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(mut self, id: impl Into<String>) -> Self {
        self.character_id = Some(id.into());
        self
    }

    pub fn with_item(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    pub fn with_addon(mut self, id: impl Into<String>) -> Self {
        self.addon_ids.push(id.into());
        self
    }

    pub fn with_perk(mut self, id: impl Into<String>) -> Self {
        self.perk_ids.push(id.into());
        self
    }

    /// Set the teammate count, clamped to 0..=3
    pub fn with_teammates(mut self, teammates: u32) -> Self {
        self.teammates = teammates.min(MAX_TEAMMATES);
        self
    }

    pub fn with_skill_percents(mut self, great: f64, good: f64, fail: f64) -> Self {
        self.set_skill_percents(great, good, fail);
        self
    }

    pub fn with_ping(mut self, ping_ms: f64) -> Self {
        self.ping_ms = ping_ms;
        self
    }

    pub fn with_hyperfocus(mut self, enabled: bool) -> Self {
        self.hyperfocus_enabled = enabled;
        self
    }

    pub fn with_stake_out(mut self, tokens: u32) -> Self {
        self.stake_out_enabled = true;
        self.stake_out_tokens = tokens;
        self
    }

    pub fn with_item_use_seconds(mut self, seconds: f64) -> Self {
        self.item_use_seconds = Some(seconds);
        self
    }

    /// Set skill-check shares, clamped to [0,100] and normalized to sum 100
    pub fn set_skill_percents(&mut self, great: f64, good: f64, fail: f64) {
        self.skill = normalize(great.min(100.0), good.min(100.0), fail.min(100.0));
    }

    /// Skill shares as evaluated by the model
    pub fn skill_percents(&self) -> SkillPercents {
        self.skill.normalized()
    }

    /// Check selection limits and numeric ranges
    ///
    /// The calculators never call this; it is for the layer that builds
    /// loadouts from user input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.addon_ids.len() > MAX_ADDONS {
            problems.push(format!("{} add-ons selected (max {})", self.addon_ids.len(), MAX_ADDONS));
        }
        if self.perk_ids.len() > MAX_PERKS {
            problems.push(format!("{} perks selected (max {})", self.perk_ids.len(), MAX_PERKS));
        }
        if self.teammates > MAX_TEAMMATES {
            problems.push(format!("teammates {} out of range 0..={}", self.teammates, MAX_TEAMMATES));
        }
        if !self.ping_ms.is_finite() || self.ping_ms < 0.0 {
            problems.push(format!("ping {} must be a non-negative number", self.ping_ms));
        }
        if self.simulation_trials == 0 {
            problems.push("simulation trials must be at least 1".to_string());
        }
        let total = self.skill.total();
        if (total - 100.0).abs() > 1e-6 {
            problems.push(format!("skill percentages sum to {} instead of 100", total));
        }
        if let Some(seconds) = self.item_use_seconds {
            if !seconds.is_finite() || seconds < 0.0 {
                problems.push(format!("item use seconds {} must be non-negative", seconds));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(problems.join("; ")))
        }
    }
}
