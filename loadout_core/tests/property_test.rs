//! Property tests for the composer and the skill-check model

use loadout_core::prelude::*;
use proptest::prelude::*;

fn combination() -> impl Strategy<Value = Combination> {
    prop_oneof![
        Just(Combination::Override),
        Just(Combination::Additive),
        Just(Combination::Multiplicative),
    ]
}

fn unit() -> impl Strategy<Value = Unit> {
    prop_oneof![Just(Unit::Percent), Just(Unit::Absolute)]
}

fn rule() -> impl Strategy<Value = RuleEffect> {
    (-50.0f64..200.0, unit(), combination())
        .prop_map(|(value, unit, combination)| RuleEffect::new("p", Target::RepairSpeed, value, unit, combination))
}

proptest! {
    #[test]
    fn compose_empty_is_identity(base in -1.0e6f64..1.0e6) {
        prop_assert_eq!(compose(base, &Vec::<RuleEffect>::new()), base);
    }

    #[test]
    fn compose_ignores_order_without_overrides(
        base in 0.1f64..100.0,
        rules in prop::collection::vec(rule(), 0..6),
    ) {
        let rules: Vec<RuleEffect> = rules
            .into_iter()
            .filter(|r| r.combination != Combination::Override)
            .collect();
        let mut reversed = rules.clone();
        reversed.reverse();

        let a = compose(base, &rules);
        let b = compose(base, &reversed);
        prop_assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0));
    }

    #[test]
    fn remaps_always_sum_to_100(
        great in 0.0f64..100.0,
        good in 0.0f64..100.0,
        fail in 0.0f64..100.0,
        ping in 0.0f64..400.0,
        tokens in 0.0f64..10.0,
        checks in 1.0f64..40.0,
    ) {
        let p = normalize(great, good, fail);
        let pinged = ping_adjust(p, ping, &Constants::default().base);
        let staked = stake_out_remap(p, tokens, checks);

        for out in [pinged, staked] {
            prop_assert!((out.total() - 100.0).abs() < 1e-6);
            prop_assert!(out.great >= 0.0 && out.good >= 0.0 && out.fail >= 0.0);
            prop_assert!((out.fail - p.fail).abs() < 1e-6);
        }
        prop_assert!(pinged.great <= p.great + 1e-9);
        prop_assert!(staked.great >= p.great - 1e-9);
    }
}
