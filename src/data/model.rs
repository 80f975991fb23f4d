use crate::error::AnalysisError;

/// Largest ability magnitude accepted: every integer up to here is exact as `f64`.
pub const MAX_ABILITY: f64 = 9_007_199_254_740_991.0; // 2^53 - 1

// ---------------------------------------------------------------------------
// Sample – one examinee's answer to the item
// ---------------------------------------------------------------------------

/// A single examinee response: ability estimate and whether the answer was correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Ability level (θ). Stored as a float but always integral once inside a [`SampleSet`].
    pub ability: f64,
    pub correct: bool,
}

impl Sample {
    pub fn new(ability: f64, correct: bool) -> Self {
        Self { ability, correct }
    }
}

// ---------------------------------------------------------------------------
// SampleSet – the complete validated response list
// ---------------------------------------------------------------------------

/// Responses to one item, in input order.
///
/// Construction is the only place validation happens: a `SampleSet` is never
/// empty and every ability is a finite integer, which is what the bucketing
/// grid relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
    min_ability: f64,
    max_ability: f64,
}

impl SampleSet {
    /// Validate the samples and compute the ability range.
    pub fn new(samples: Vec<Sample>) -> Result<Self, AnalysisError> {
        let first = samples.first().ok_or(AnalysisError::EmptySampleSet)?;
        let mut min_ability = first.ability;
        let mut max_ability = first.ability;

        for (index, sample) in samples.iter().enumerate() {
            let ability = sample.ability;
            if !ability.is_finite() {
                return Err(AnalysisError::NonFiniteAbility { index, ability });
            }
            if ability.fract() != 0.0 {
                return Err(AnalysisError::NonIntegralAbility { index, ability });
            }
            if ability.abs() > MAX_ABILITY {
                return Err(AnalysisError::AbilityOutOfRange { index, ability });
            }
            min_ability = min_ability.min(ability);
            max_ability = max_ability.max(ability);
        }

        Ok(SampleSet {
            samples,
            min_ability,
            max_ability,
        })
    }

    /// Build from `(outcome, ability)` records as they come out of a response file.
    ///
    /// An `i64` past [`MAX_ABILITY`] rounds to a float that is itself out of
    /// range, so it is rejected rather than silently merged with a neighbour.
    pub fn from_records<I>(records: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (bool, i64)>,
    {
        let samples = records
            .into_iter()
            .map(|(correct, ability)| Sample::new(ability as f64, correct))
            .collect();
        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; kept for the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min_ability(&self) -> f64 {
        self.min_ability
    }

    pub fn max_ability(&self) -> f64 {
        self.max_ability
    }

    /// Number of correct answers.
    pub fn correct_count(&self) -> usize {
        self.samples.iter().filter(|s| s.correct).count()
    }
}
