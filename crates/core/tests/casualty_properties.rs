//! Property-based tests for the casualty ring estimator using proptest.
//!
//! These tests verify the ring partition and effect assignment invariants
//! across arbitrary radii and (possibly inconsistent) population counts.

mod common;

use impact_sim_core::casualties::{
    build_rings, distinct_radii, estimate_casualties, CasualtyRates, EffectKind, EffectRadii,
};
use proptest::prelude::*;

fn radius_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(prop_oneof![Just(0.0), Just(-5.0), 0.0f64..5.0e6], 0..12)
}

fn effect_set() -> impl Strategy<Value = EffectRadii> {
    prop::collection::vec(0.0f64..2.0e6, 6).prop_map(|r| {
        EffectRadii::new(EffectKind::BY_SEVERITY.iter().copied().zip(r))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Radii sent to the population service are positive, whole and strictly descending.
    #[test]
    fn prop_distinct_radii_strictly_descending(radii in radius_strategy()) {
        let distinct = distinct_radii(radii.iter().copied());
        prop_assert!(distinct.iter().all(|&r| r > 0));
        prop_assert!(distinct.windows(2).all(|w| w[0] > w[1]));
        prop_assert!(distinct.len() <= radii.len());
    }

    /// Ring populations always sum to the count inside the largest radius,
    /// even when the service reports counts that grow inwards.
    #[test]
    fn prop_rings_partition_population(
        radii in radius_strategy(),
        counts in prop::collection::vec(0u64..10_000_000, 12),
    ) {
        let radii = distinct_radii(radii);
        let cumulative = &counts[..radii.len()];
        let rings = build_rings(&radii, cumulative).unwrap();

        let total: u64 = rings.iter().map(|r| r.population).sum();
        prop_assert_eq!(total, cumulative.first().copied().unwrap_or(0));
        for ring in &rings {
            prop_assert!(ring.inner < ring.outer);
        }
        if let Some(last) = rings.last() {
            prop_assert_eq!(last.inner, 0);
        }
    }

    /// The effect assigned to a ring reaches its outer bound, and no more
    /// severe effect does.
    #[test]
    fn prop_most_severe_effect_assigned(effects in effect_set(), outer in 1u64..2_000_000) {
        let outer = outer as f64;
        let covering: Vec<EffectKind> = effects
            .iter()
            .filter(|e| e.radius > 0.0 && e.radius.round() >= outer)
            .map(|e| e.kind)
            .collect();

        match effects.most_severe_covering(outer) {
            Some(kind) => {
                prop_assert!(covering.contains(&kind));
                prop_assert!(covering.iter().all(|k| k.severity() <= kind.severity()));
            }
            None => prop_assert!(covering.is_empty()),
        }
    }

    /// Casualties never exceed the people counted, beyond per-category rounding.
    #[test]
    fn prop_casualties_bounded_by_population(
        effects in effect_set(),
        magnitude in 0.0f64..12.0,
        counts in prop::collection::vec(0u64..1_000_000, 6),
    ) {
        let radii = distinct_radii(effects.iter().map(|e| e.radius));
        let mut cumulative = counts[..radii.len()].to_vec();
        cumulative.sort_unstable_by(|a, b| b.cmp(a));

        let estimate = estimate_casualties(
            &effects,
            &radii,
            &cumulative,
            magnitude,
            &CasualtyRates::default(),
        )
        .unwrap();
        let population = cumulative.first().copied().unwrap_or(0);
        prop_assert_eq!(estimate.population_covered(), population);
        prop_assert!(estimate.totals.total() <= population + 4);
    }
}

#[test]
fn severity_order_matches_listing() {
    for pair in EffectKind::BY_SEVERITY.windows(2) {
        assert!(pair[0] > pair[1], "{} should outrank {}", pair[0], pair[1]);
    }
}
