//! Likelihood-ratio method: which of three generative hypotheses explains the
//! raw responses best.

use std::f64::consts::LN_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::birnbaum::{predict, predict_reversed};
use super::ItemParameters;
use crate::data::model::Sample;

/// Competing explanations of how the item behaves.
///
/// Declaration order is also the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hypothesis {
    /// The item follows the Birnbaum curve.
    Correct,
    /// The item is a coin flip regardless of ability.
    Indifferent,
    /// The item discriminates backwards.
    Incorrect,
}

impl Hypothesis {
    pub const ALL: [Hypothesis; 3] = [
        Hypothesis::Correct,
        Hypothesis::Indifferent,
        Hypothesis::Incorrect,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Hypothesis::Correct => "Correct",
            Hypothesis::Indifferent => "Indifferent",
            Hypothesis::Incorrect => "Incorrect",
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Log-likelihood of every hypothesis and the one that won.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisResult {
    pub verdict: Hypothesis,
    #[serde(with = "crate::serde_float")]
    pub log_likelihood: f64,
    #[serde(with = "crate::serde_float")]
    pub correct: f64,
    #[serde(with = "crate::serde_float")]
    pub indifferent: f64,
    #[serde(with = "crate::serde_float")]
    pub incorrect: f64,
}

impl HypothesisResult {
    pub fn log_likelihood_of(&self, hypothesis: Hypothesis) -> f64 {
        match hypothesis {
            Hypothesis::Correct => self.correct,
            Hypothesis::Indifferent => self.indifferent,
            Hypothesis::Incorrect => self.incorrect,
        }
    }
}

/// `Σ ln p` over correct answers plus `Σ ln(1 − p)` over wrong ones.
///
/// A probability of exactly 0 or 1 against the observed outcome gives `-inf`,
/// which is a valid (losing) score rather than an error.
pub fn log_likelihood<F>(samples: &[Sample], probability: F) -> f64
where
    F: Fn(f64) -> f64,
{
    samples
        .iter()
        .map(|sample| {
            let p = probability(sample.ability);
            if sample.correct {
                p.ln()
            } else {
                (1.0 - p).ln()
            }
        })
        .sum()
}

/// Index-of-maximum over the scores in [`Hypothesis::ALL`] order.
///
/// Strict comparison keeps the earlier hypothesis on an exact tie; NaN never wins.
pub fn select(scores: [f64; 3]) -> Hypothesis {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        let current = scores[best];
        if score > current || (current.is_nan() && !score.is_nan()) {
            best = i;
        }
    }
    Hypothesis::ALL[best]
}

/// Score all three hypotheses against the raw samples.
pub fn analyze(samples: &[Sample], params: &ItemParameters) -> HypothesisResult {
    let (c, delta) = (params.guessing, params.difficulty);

    let scores = [
        log_likelihood(samples, |theta| predict(c, delta, theta)),
        -(samples.len() as f64) * LN_2,
        log_likelihood(samples, |theta| predict_reversed(c, delta, theta)),
    ];
    let verdict = select(scores);
    let [correct, indifferent, incorrect] = scores;

    HypothesisResult {
        verdict,
        log_likelihood: scores[verdict as usize],
        correct,
        indifferent,
        incorrect,
    }
}
