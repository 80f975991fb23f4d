//! Analysis layer: the Birnbaum model and the two fit checks built on it.
//!
//! Architecture:
//! ```text
//!   SampleSet ──► bucket ──► graphical   ─┐
//!       │                                 ├──► AnalysisReport
//!       └──────────────────► hypothesis  ─┘
//! ```
//!
//! The graphical method works on ability buckets, the hypothesis method on
//! the raw samples. Neither does I/O.

pub mod birnbaum;
pub mod graphical;
pub mod hypothesis;
pub mod report;

use serde::{Deserialize, Serialize};

use crate::data::bucket::{bucket, Bucket};
use crate::data::model::SampleSet;
use crate::error::AnalysisError;

use self::graphical::GraphicalResult;
use self::hypothesis::HypothesisResult;
use self::report::AnalysisReport;

// ---------------------------------------------------------------------------
// ItemParameters – fixed model configuration
// ---------------------------------------------------------------------------

/// Guessing probability `c` and difficulty `δ` of the item under test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemParameters {
    pub guessing: f64,
    pub difficulty: f64,
}

impl Default for ItemParameters {
    fn default() -> Self {
        Self {
            guessing: 0.001388889,
            difficulty: 2.0,
        }
    }
}

impl ItemParameters {
    /// `guessing` must be finite and in `[0, 1)`; `difficulty` must be finite.
    pub fn new(guessing: f64, difficulty: f64) -> Result<Self, AnalysisError> {
        let params = Self {
            guessing,
            difficulty,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..1.0).contains(&self.guessing) {
            return Err(AnalysisError::InvalidGuessing(self.guessing));
        }
        if !self.difficulty.is_finite() {
            return Err(AnalysisError::InvalidDifficulty(self.difficulty));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ItemAnalyzer – one item, one sample set
// ---------------------------------------------------------------------------

/// Immutable analysis engine for a single item.
///
/// Owns its samples and the buckets derived from them; every method is a pure
/// read of that state.
#[derive(Debug, Clone)]
pub struct ItemAnalyzer {
    params: ItemParameters,
    samples: SampleSet,
    buckets: Vec<Bucket>,
}

impl ItemAnalyzer {
    pub fn new(params: ItemParameters, samples: SampleSet) -> Result<Self, AnalysisError> {
        params.validate()?;
        let buckets = bucket(&samples)?;
        log::debug!(
            "{} samples in {} buckets over θ ∈ [{}, {}]",
            samples.len(),
            buckets.len(),
            samples.min_ability(),
            samples.max_ability()
        );
        Ok(Self {
            params,
            samples,
            buckets,
        })
    }

    pub fn params(&self) -> &ItemParameters {
        &self.params
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn graphical(&self) -> GraphicalResult {
        graphical::analyze(&self.buckets, &self.params)
    }

    pub fn hypothesis(&self) -> HypothesisResult {
        hypothesis::analyze(self.samples.samples(), &self.params)
    }

    /// Run both methods and assemble the report.
    pub fn analyze(&self) -> AnalysisReport {
        let graphical = self.graphical();
        let hypothesis = self.hypothesis();
        log::info!(
            "graphical verdict: {}, hypothesis verdict: {} ({})",
            if graphical.verdict { "pass" } else { "fail" },
            hypothesis.verdict,
            hypothesis.log_likelihood
        );
        AnalysisReport::new(self.params, self.samples.len(), graphical, hypothesis)
    }
}
