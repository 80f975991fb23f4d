//! Graphical method: observed frequency per bucket against the Birnbaum curve
//! and a confidence band around it.

use serde::{Deserialize, Serialize};

use super::birnbaum::predict;
use super::ItemParameters;
use crate::data::bucket::Bucket;

/// One plotted value at one ability label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    #[serde(with = "crate::serde_float")]
    pub ability: f64,
    #[serde(with = "crate::serde_float")]
    pub value: f64,
}

impl GraphPoint {
    pub fn new(ability: f64, value: f64) -> Self {
        Self { ability, value }
    }
}

/// The four series at a single bucket, plus the counts they came from.
///
/// For an empty bucket `actual`, `upper_band` and `lower_band` hold NaN;
/// `predicted` is still the model value at that label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandRow {
    pub count: usize,
    pub correct: usize,
    #[serde(with = "crate::serde_float")]
    pub sigma: f64,
    pub actual: GraphPoint,
    pub predicted: GraphPoint,
    pub upper_band: GraphPoint,
    pub lower_band: GraphPoint,
}

impl BandRow {
    fn from_bucket(bucket: &Bucket, params: &ItemParameters) -> Self {
        let label = bucket.label;
        let predicted = predict(params.guessing, params.difficulty, label);
        let count = bucket.len();
        let correct = bucket.correct_count();

        if count == 0 {
            return BandRow {
                count,
                correct,
                sigma: f64::NAN,
                actual: GraphPoint::new(label, f64::NAN),
                predicted: GraphPoint::new(label, predicted),
                upper_band: GraphPoint::new(label, f64::NAN),
                lower_band: GraphPoint::new(label, f64::NAN),
            };
        }

        let n = count as f64;
        let observed = correct as f64 / n;
        // Variance from the observed rate, not the predicted one.
        let sigma = (n * observed * (1.0 - observed)).sqrt();

        BandRow {
            count,
            correct,
            sigma,
            actual: GraphPoint::new(label, observed),
            predicted: GraphPoint::new(label, predicted),
            upper_band: GraphPoint::new(label, predicted + sigma),
            lower_band: GraphPoint::new(label, predicted - sigma),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the observed frequency lies inside `[lower, upper]`.
    /// Empty rows have nothing to check and count as inside.
    pub fn within_band(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let observed = self.actual.value;
        self.lower_band.value <= observed && observed <= self.upper_band.value
    }

    /// `(actual, predicted, upper, lower)` in export order.
    pub fn points(&self) -> [GraphPoint; 4] {
        [self.actual, self.predicted, self.upper_band, self.lower_band]
    }
}

/// Verdict and per-bucket series of the graphical method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicalResult {
    pub verdict: bool,
    pub rows: Vec<BandRow>,
}

impl GraphicalResult {
    pub fn points(&self) -> Vec<[GraphPoint; 4]> {
        self.rows.iter().map(BandRow::points).collect()
    }

    /// Labels of non-empty buckets whose observed frequency left the band.
    pub fn violations(&self) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| !row.within_band())
            .map(|row| row.actual.ability)
            .collect()
    }
}

/// Run the graphical method over already bucketed samples.
pub fn analyze(buckets: &[Bucket], params: &ItemParameters) -> GraphicalResult {
    let rows: Vec<BandRow> = buckets
        .iter()
        .map(|bucket| BandRow::from_bucket(bucket, params))
        .collect();

    for row in &rows {
        log::debug!(
            "bucket θ={}: n={} observed={} sigma={} band=[{}, {}]",
            row.actual.ability,
            row.count,
            row.actual.value,
            row.sigma,
            row.lower_band.value,
            row.upper_band.value
        );
    }

    let verdict = rows.iter().all(BandRow::within_band);
    GraphicalResult { verdict, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bucket::bucket;
    use crate::data::model::SampleSet;

    fn run(records: &[(bool, i64)], guessing: f64, difficulty: f64) -> GraphicalResult {
        let set = SampleSet::from_records(records.iter().copied()).unwrap();
        let params = ItemParameters::new(guessing, difficulty).unwrap();
        analyze(&bucket(&set).unwrap(), &params)
    }

    #[test]
    fn perfect_bucket_has_zero_width_band_and_fails() {
        let mut records = vec![(false, 0); 5];
        records.extend(vec![(true, 2); 5]);
        let result = run(&records, 0.0, 2.0);

        let top = result.rows.last().unwrap();
        assert_eq!(top.actual.value, 1.0);
        assert!((top.predicted.value - 0.5).abs() < 1e-12);
        assert_eq!(top.sigma, 0.0);
        assert!(!top.within_band());
        assert!(!result.verdict);
    }

    #[test]
    fn wide_band_passes() {
        // 2 of 4 correct at the difficulty: observed 0.5, sigma 1.
        let result = run(&[(true, 1), (false, 1), (true, 1), (false, 1)], 0.0, 1.0);
        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.actual.value, 0.5);
        assert!((row.sigma - 1.0).abs() < 1e-12);
        assert!((row.upper_band.value - 1.5).abs() < 1e-12);
        assert!((row.lower_band.value + 0.5).abs() < 1e-12);
        assert!(result.verdict);
        assert!(result.violations().is_empty());
    }

    #[test]
    fn empty_bucket_is_nan_and_ignored() {
        let result = run(&[(true, 0), (false, 0), (true, 2), (false, 2)], 0.0, 1.0);
        let gap = &result.rows[1];
        assert!(gap.is_empty());
        assert!(gap.actual.value.is_nan());
        assert!(gap.upper_band.value.is_nan());
        assert!(gap.lower_band.value.is_nan());
        assert!(gap.predicted.value.is_finite());
        assert_eq!(gap.actual.ability, 1.0);
        assert!(result.verdict);
    }

    #[test]
    fn violations_name_the_failing_labels() {
        let mut records = vec![(false, 0); 5];
        records.extend(vec![(true, 2); 5]);
        let result = run(&records, 0.0, 2.0);
        assert_eq!(result.violations(), vec![0.0, 2.0]);
    }

    #[test]
    fn observed_on_upper_edge_is_inside() {
        // Far above the difficulty the model saturates at exactly 1.
        let result = run(&[(true, 1000), (true, 1000), (true, 1000)], 0.0, 0.0);
        let row = &result.rows[0];
        assert_eq!(row.sigma, 0.0);
        assert_eq!(row.actual.value, 1.0);
        assert_eq!(row.upper_band.value, 1.0);
        assert!(row.within_band());
        assert!(result.verdict);
    }

    #[test]
    fn observed_on_lower_edge_is_inside() {
        let result = run(&[(false, -1000), (false, -1000)], 0.0, 0.0);
        let row = &result.rows[0];
        assert_eq!(row.sigma, 0.0);
        assert_eq!(row.actual.value, 0.0);
        assert_eq!(row.lower_band.value, 0.0);
        assert!(row.within_band());
        assert!(result.verdict);
    }
}
