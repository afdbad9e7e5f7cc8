//! ModifierStack - Override → Additive → Multiplicative composition

use super::RuleEffect;
use crate::types::{Combination, Unit};

/// A multiplicative contribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Factor {
    /// Raw percent, contributes `1 + v/100`
    Percent(f64),
    /// Absolute amount, contributes `(current + v) / current`
    Absolute(f64),
}

impl Factor {
    /// Resolve against the value entering the multiplicative stage
    pub fn resolve(self, current: f64) -> f64 {
        match self {
            Factor::Percent(v) => 1.0 + v / 100.0,
            Factor::Absolute(v) => {
                if current != 0.0 {
                    (current + v) / current
                } else {
                    1.0
                }
            }
        }
    }
}

/// Collects rule effects against a base value
///
/// Final value is calculated as:
/// `(override_or_base × (1 + increased/100) + flat) × Π factors`
///
/// - `override_value`: Replacement from the last override rule, if any
/// - `increased`: Sum of additive percent rules (raw, 10 = 10%)
/// - `flat`: Sum of additive absolute rules
/// - `factors`: Multiplicative rules in push order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierStack {
    pub base: f64,
    pub override_value: Option<f64>,
    pub increased: f64,
    pub flat: f64,
    pub factors: Vec<Factor>,
}

impl ModifierStack {
    /// Create a new stack with the given base
    pub fn with_base(base: f64) -> Self {
        ModifierStack {
            base,
            override_value: None,
            increased: 0.0,
            flat: 0.0,
            factors: Vec::new(),
        }
    }

    /// Add one rule effect
    pub fn push(&mut self, effect: &RuleEffect) {
        match (effect.combination, effect.unit) {
            (Combination::Override, Unit::Percent) => {
                self.override_value = Some(self.base * (1.0 + effect.value / 100.0));
            }
            (Combination::Override, Unit::Absolute) => {
                self.override_value = Some(effect.value);
            }
            (Combination::Additive, Unit::Percent) => self.increased += effect.value,
            (Combination::Additive, Unit::Absolute) => self.flat += effect.value,
            (Combination::Multiplicative, Unit::Percent) => {
                self.factors.push(Factor::Percent(effect.value));
            }
            (Combination::Multiplicative, Unit::Absolute) => {
                self.factors.push(Factor::Absolute(effect.value));
            }
        }
    }

    /// Add several rule effects in order
    pub fn extend<'a, I>(&mut self, effects: I)
    where
        I: IntoIterator<Item = &'a RuleEffect>,
    {
        for effect in effects {
            self.push(effect);
        }
    }

    /// Value entering the multiplicative stage
    pub fn pre_multiplier_value(&self) -> f64 {
        let start = self.override_value.unwrap_or(self.base);
        start * (1.0 + self.increased / 100.0) + self.flat
    }

    /// Product of all multiplicative factors
    pub fn total_multiplier(&self) -> f64 {
        let current = self.pre_multiplier_value();
        self.factors.iter().map(|f| f.resolve(current)).product()
    }

    /// Calculate the final value
    pub fn compute(&self) -> f64 {
        self.pre_multiplier_value() * self.total_multiplier()
    }
}

/// Compose `base` with an ordered set of rule effects
pub fn compose<'a, I>(base: f64, effects: I) -> f64
where
    I: IntoIterator<Item = &'a RuleEffect>,
{
    let mut stack = ModifierStack::with_base(base);
    stack.extend(effects);
    stack.compute()
}
