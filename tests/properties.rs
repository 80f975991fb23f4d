use std::f64::consts::LN_2;

use item_analysis::analysis::birnbaum::predict;
use item_analysis::analysis::{ItemAnalyzer, ItemParameters};
use item_analysis::data::bucket::bucket;
use item_analysis::data::model::SampleSet;
use proptest::prelude::*;

fn records() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec((any::<bool>(), -20i64..20), 1..200)
}

proptest! {
    #[test]
    fn midpoint_is_guessing_plus_half(c in 0.0f64..0.99, delta in -50.0f64..50.0) {
        let p = predict(c, delta, delta);
        prop_assert!((p - (c + (1.0 - c) * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn predict_is_monotonic_in_ability(
        c in 0.0f64..0.99,
        delta in -10.0f64..10.0,
        theta in -10.0f64..10.0,
        step in 0.001f64..5.0,
    ) {
        prop_assert!(predict(c, delta, theta) <= predict(c, delta, theta + step));
    }

    #[test]
    fn predict_stays_between_guessing_and_one(
        c in 0.0f64..0.99,
        delta in -10.0f64..10.0,
        theta in -1e4f64..1e4,
    ) {
        let p = predict(c, delta, theta);
        prop_assert!(p >= c && p <= 1.0);
    }

    #[test]
    fn bucketing_partitions_the_samples(records in records()) {
        let set = SampleSet::from_records(records.clone()).unwrap();
        let buckets = bucket(&set).unwrap();

        let span = set.max_ability() - set.min_ability();
        prop_assert_eq!(buckets.len(), span.floor() as usize + 1);

        for (i, b) in buckets.iter().enumerate() {
            prop_assert_eq!(b.label, set.min_ability() + i as f64);
            prop_assert!(b.samples.iter().all(|s| s.ability == b.label));
        }

        let total: usize = buckets.iter().map(|b| b.len()).sum();
        prop_assert_eq!(total, records.len());

        // Same multiset: per-label counts of correct and wrong answers agree.
        for b in &buckets {
            let label = b.label as i64;
            let expected_correct = records.iter().filter(|&&(c, a)| a == label && c).count();
            let expected_wrong = records.iter().filter(|&&(c, a)| a == label && !c).count();
            prop_assert_eq!(b.correct_count(), expected_correct);
            prop_assert_eq!(b.len() - b.correct_count(), expected_wrong);
        }
    }

    #[test]
    fn indifferent_is_exactly_minus_n_ln2(records in records(), c in 0.0f64..0.5, delta in -5.0f64..5.0) {
        let n = records.len();
        let set = SampleSet::from_records(records).unwrap();
        let analyzer = ItemAnalyzer::new(ItemParameters::new(c, delta).unwrap(), set).unwrap();
        prop_assert_eq!(analyzer.hypothesis().indifferent, -(n as f64) * LN_2);
    }

    #[test]
    fn verdict_holds_the_maximum(records in records(), c in 0.0f64..0.5, delta in -5.0f64..5.0) {
        let set = SampleSet::from_records(records).unwrap();
        let analyzer = ItemAnalyzer::new(ItemParameters::new(c, delta).unwrap(), set).unwrap();
        let result = analyzer.hypothesis();
        prop_assert!(result.log_likelihood >= result.correct);
        prop_assert!(result.log_likelihood >= result.indifferent);
        prop_assert!(result.log_likelihood >= result.incorrect);
        prop_assert_eq!(result.log_likelihood, result.log_likelihood_of(result.verdict));
    }

    #[test]
    fn graphical_verdict_is_band_membership(records in records(), c in 0.0f64..0.5, delta in -5.0f64..5.0) {
        let set = SampleSet::from_records(records).unwrap();
        let analyzer = ItemAnalyzer::new(ItemParameters::new(c, delta).unwrap(), set).unwrap();
        let result = analyzer.graphical();

        let expected = result.rows.iter().filter(|r| r.count > 0).all(|r| {
            r.actual.value >= r.lower_band.value && r.actual.value <= r.upper_band.value
        });
        prop_assert_eq!(result.verdict, expected);
        prop_assert_eq!(result.rows.len(), analyzer.buckets().len());
    }
}
