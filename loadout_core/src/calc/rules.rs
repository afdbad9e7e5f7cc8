//! SelectedRules - Rule effects gathered from a loadout's entities

use crate::dataset::Dataset;
use crate::loadout::Loadout;
use crate::rule::RuleEffect;
use crate::types::{Action, Target, TokenCounter};

/// Flattened rule list for one loadout, in source order
#[derive(Debug, Clone, Default)]
pub struct SelectedRules<'a> {
    rules: Vec<&'a RuleEffect>,
}

impl<'a> SelectedRules<'a> {
    /// Collect rules from every entity the loadout selects
    pub fn gather(loadout: &Loadout, dataset: &'a Dataset) -> Self {
        let rules: Vec<&'a RuleEffect> = dataset
            .selected_sources(loadout)
            .into_iter()
            .flat_map(|source| source.rules().iter())
            .collect();
        SelectedRules { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules selected for `action` that modify `target`
    pub fn for_action(&self, action: Action, target: Target) -> impl Iterator<Item = &'a RuleEffect> + '_ {
        self.rules
            .iter()
            .copied()
            .filter(move |r| r.target == target && r.applies_to(action))
    }

    /// First rule feeding `counter` that modifies `target`, regardless of action
    pub fn stacking(&self, counter: &TokenCounter, target: Target) -> Option<&'a RuleEffect> {
        self.rules
            .iter()
            .copied()
            .find(|r| r.target == target && r.is_stacking(counter))
    }

    /// Per-stack Hyperfocus repair bonus, 0 when no such rule is selected
    pub fn hyperfocus_per_stack(&self) -> f64 {
        self.stacking(&TokenCounter::Hyperfocus, Target::RepairSpeed)
            .map_or(0.0, RuleEffect::per_stack_bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::types::{Combination, Unit};

    fn dataset() -> Dataset {
        Dataset {
            perks: vec![
                Entity::new("hyperfocus", "Hyperfocus").with_rule(
                    RuleEffect::new("hf", Target::RepairSpeed, 0.0, Unit::Percent, Combination::Additive)
                        .for_action(Action::SkillCheck)
                        .with_stacks(TokenCounter::Hyperfocus, 4.0, 6),
                ),
                Entity::new("botany", "Botany Knowledge").with_rule(
                    RuleEffect::new("bk", Target::HealSpeed, 30.0, Unit::Percent, Combination::Additive)
                        .for_action(Action::Heal),
                ),
            ],
            ..Dataset::default()
        }
    }

    #[test]
    fn test_gather_only_selected() {
        let dataset = dataset();
        let rules = SelectedRules::gather(&Loadout::new().with_perk("botany"), &dataset);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.for_action(Action::Heal, Target::HealSpeed).count(), 1);
        assert_eq!(rules.for_action(Action::Repair, Target::HealSpeed).count(), 0);
    }

    #[test]
    fn test_hyperfocus_lookup_ignores_action() {
        let dataset = dataset();
        let rules = SelectedRules::gather(&Loadout::new().with_perk("hyperfocus"), &dataset);
        assert!((rules.hyperfocus_per_stack() - 0.04).abs() < 1e-12);
        assert_eq!(rules.for_action(Action::Repair, Target::RepairSpeed).count(), 0);
    }

    #[test]
    fn test_no_hyperfocus_rule() {
        let dataset = dataset();
        let rules = SelectedRules::gather(&Loadout::new(), &dataset);
        assert!(rules.is_empty());
        assert_eq!(rules.hyperfocus_per_stack(), 0.0);
    }
}
