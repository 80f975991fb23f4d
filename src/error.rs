//! Error types for the analysis core.

use thiserror::Error;

/// Errors raised while building a sample set or an analyzer.
///
/// Everything here is a deterministic function of the input, so none of these
/// are worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No samples at all; there is no ability range to bucket.
    #[error("sample set is empty")]
    EmptySampleSet,

    #[error("sample {index}: ability {ability} is not finite")]
    NonFiniteAbility { index: usize, ability: f64 },

    /// Buckets sit on an integer grid, so a fractional ability would match none of them.
    #[error("sample {index}: ability {ability} is not an integer")]
    NonIntegralAbility { index: usize, ability: f64 },

    /// Past 2^53 an `f64` no longer holds every integer, so bucket labels would collide.
    #[error("sample {index}: ability {ability} is outside ±{max}", max = crate::data::model::MAX_ABILITY)]
    AbilityOutOfRange { index: usize, ability: f64 },

    #[error("ability range [{min}, {max}] spans too many buckets")]
    AbilityRangeTooWide { min: f64, max: f64 },

    #[error("guessing probability {0} is outside [0, 1)")]
    InvalidGuessing(f64),

    #[error("difficulty {0} is not finite")]
    InvalidDifficulty(f64),
}
