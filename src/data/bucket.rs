use super::model::{Sample, SampleSet};
use crate::error::AnalysisError;

/// Upper bound on the number of integer labels between min and max ability.
pub const MAX_BUCKETS: usize = 1_000_000;

// ---------------------------------------------------------------------------
// Bucket – samples sharing one ability label
// ---------------------------------------------------------------------------

/// All samples whose ability equals `label`, in input order. May be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: f64,
    pub samples: Vec<Sample>,
}

impl Bucket {
    /// Number of samples in the bucket.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of correct answers in the bucket.
    pub fn correct_count(&self) -> usize {
        self.samples.iter().filter(|s| s.correct).count()
    }
}

// ---------------------------------------------------------------------------
// Bucketing
// ---------------------------------------------------------------------------

/// Split the sample set into one bucket per integer in `[min, max]`.
///
/// Buckets come back ascending by label and the run has no gaps: a label with
/// no samples still gets an (empty) bucket. Every sample lands in exactly one
/// bucket because [`SampleSet`] guarantees integral abilities.
pub fn bucket(set: &SampleSet) -> Result<Vec<Bucket>, AnalysisError> {
    let min = set.min_ability();
    let max = set.max_ability();
    let span = max - min;
    if span >= MAX_BUCKETS as f64 {
        return Err(AnalysisError::AbilityRangeTooWide { min, max });
    }
    let count = span as usize + 1;

    let mut buckets: Vec<Bucket> = (0..count)
        .map(|i| Bucket {
            label: min + i as f64,
            samples: Vec::new(),
        })
        .collect();

    for sample in set.samples() {
        let index = (sample.ability - min) as usize;
        buckets[index].samples.push(*sample);
    }

    Ok(buckets)
}
