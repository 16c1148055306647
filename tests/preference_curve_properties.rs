//! Property tests for preference curves, weighting and aggregation.

use proptest::prelude::*;

use mose_engine::domain::analysis::AggregationEngine;
use mose_engine::domain::foundation::{ObjectiveMap, PreferenceScore, Preferences};
use mose_engine::domain::preference::{KnotSet, PreferenceCurve};
use mose_engine::domain::weighting::{GlobalWeights, StakeholderTable, WeightAggregator};

const TOLERANCE: f64 = 1e-9;

/// Strictly increasing x (positive gaps) with arbitrary y in [0, 100].
fn knot_set() -> impl Strategy<Value = KnotSet> {
    (2usize..8)
        .prop_flat_map(|n| {
            (
                -1000.0f64..1000.0,
                prop::collection::vec(0.01f64..500.0, n - 1),
                prop::collection::vec(0.0f64..=100.0, n),
            )
        })
        .prop_map(|(start, gaps, y)| {
            let mut x = vec![start];
            for gap in gaps {
                let last = x[x.len() - 1];
                x.push(last + gap);
            }
            KnotSet::try_new(x, y).unwrap()
        })
}

/// Knot set whose y sequence is non-decreasing.
fn rising_knot_set() -> impl Strategy<Value = KnotSet> {
    knot_set().prop_map(|knots| {
        let mut y = knots.y().to_vec();
        y.sort_by(f64::total_cmp);
        KnotSet::try_new(knots.x().to_vec(), y).unwrap()
    })
}

fn preferences() -> impl Strategy<Value = Preferences> {
    prop::array::uniform6(0.0f64..=100.0)
        .prop_map(|values| ObjectiveMap::from_array(values).map(|_, v| PreferenceScore::new(*v)))
}

fn positions(knots: &KnotSet, samples: usize) -> Vec<f64> {
    let (lo, hi) = knots.domain();
    (0..=samples)
        .map(|i| lo + (hi - lo) * i as f64 / samples as f64)
        .collect()
}

proptest! {
    #[test]
    fn preference_stays_within_zero_and_hundred(knots in knot_set(), t in 0.0f64..=1.0) {
        let curve = PreferenceCurve::build(&knots);
        let (lo, hi) = knots.domain();
        let value = curve.evaluate(lo + t * (hi - lo)).unwrap().value();
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn knots_are_reproduced_exactly(knots in knot_set()) {
        let curve = PreferenceCurve::build(&knots);
        for (x, y) in knots.x().iter().zip(knots.y()) {
            prop_assert_eq!(curve.evaluate(*x).unwrap().value(), *y);
        }
    }

    #[test]
    fn rising_knots_give_a_non_decreasing_curve(knots in rising_knot_set()) {
        let curve = PreferenceCurve::build(&knots);
        let values: Vec<f64> = positions(&knots, 200)
            .into_iter()
            .map(|x| curve.evaluate(x).unwrap().value())
            .collect();
        for pair in values.windows(2) {
            prop_assert!(pair[1] >= pair[0] - TOLERANCE, "{} then {}", pair[0], pair[1]);
        }
        let (first, last) = (knots.y()[0], knots.y()[knots.len() - 1]);
        prop_assert!(values.iter().all(|v| *v >= first - TOLERANCE && *v <= last + TOLERANCE));
    }

    #[test]
    fn outside_the_domain_is_flat(knots in knot_set(), beyond in 0.001f64..1e6) {
        let curve = PreferenceCurve::build(&knots);
        let (lo, hi) = knots.domain();
        prop_assert_eq!(curve.evaluate(lo - beyond).unwrap().value(), knots.y()[0]);
        prop_assert_eq!(curve.evaluate(hi + beyond).unwrap().value(), knots.y()[knots.len() - 1]);
    }

    #[test]
    fn rebuilding_is_deterministic(knots in knot_set(), metric in -2000.0f64..6000.0) {
        let first = PreferenceCurve::build(&knots);
        let second = PreferenceCurve::build(&knots);
        prop_assert_eq!(first.evaluate(metric).unwrap(), second.evaluate(metric).unwrap());
    }

    #[test]
    fn global_weights_sum_to_one(
        (influence, zeroed) in (1usize..6).prop_flat_map(|n| (
            prop::collection::vec(0.0f64..10.0, n),
            prop::collection::vec(any::<bool>(), n),
        )),
        seed_row in prop::array::uniform6(0.0f64..5.0),
    ) {
        prop_assume!(seed_row.iter().sum::<f64>() > 0.0);
        // At least one stakeholder with influence keeps a non-degenerate row.
        prop_assume!(influence.iter().zip(&zeroed).any(|(w, z)| *w > 0.0 && !*z));

        let rows: Vec<Vec<f64>> = zeroed
            .iter()
            .enumerate()
            .map(|(i, zero)| {
                if *zero {
                    vec![0.0; 6]
                } else {
                    seed_row.iter().map(|w| w * (i + 1) as f64).collect()
                }
            })
            .collect();
        let names = (0..influence.len()).map(|i| format!("Group {}", i)).collect();
        let table = StakeholderTable::from_columns(names, influence, rows).unwrap();

        let outcome = WeightAggregator::compute_global_weights(&table).unwrap();
        prop_assert!((outcome.global_weights.sum() - 1.0).abs() <= TOLERANCE);
        prop_assert_eq!(
            outcome.zero_filled_stakeholders().len(),
            zeroed.iter().filter(|z| **z).count()
        );
    }

    #[test]
    fn weighted_sum_lies_between_min_and_max(
        prefs in preferences(),
        raw in prop::array::uniform6(0.0f64..1.0),
    ) {
        prop_assume!(raw.iter().sum::<f64>() > 0.0);
        let weights = GlobalWeights::try_new(ObjectiveMap::from_array(raw)).unwrap();
        let score = AggregationEngine::weighted_sum(&prefs, &weights);
        let (_, worst) = AggregationEngine::min_max(&prefs);
        prop_assert!(worst <= score + TOLERANCE);
        prop_assert!(score <= AggregationEngine::best(&prefs) + TOLERANCE);
    }
}
