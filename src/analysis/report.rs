use serde::{Deserialize, Serialize};

use super::graphical::GraphicalResult;
use super::hypothesis::HypothesisResult;
use super::ItemParameters;

/// Everything one analysis run produced, ready to hand to an exporter.
///
/// Plain aggregate: it computes nothing itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub parameters: ItemParameters,
    pub sample_count: usize,
    pub graphical: GraphicalResult,
    pub hypothesis: HypothesisResult,
}

impl AnalysisReport {
    pub fn new(
        parameters: ItemParameters,
        sample_count: usize,
        graphical: GraphicalResult,
        hypothesis: HypothesisResult,
    ) -> Self {
        Self {
            parameters,
            sample_count,
            graphical,
            hypothesis,
        }
    }

    /// Short human-readable summary, one line per method.
    pub fn summary(&self) -> String {
        let graphical = if self.graphical.verdict {
            "pass".to_string()
        } else {
            let labels: Vec<String> = self
                .graphical
                .violations()
                .iter()
                .map(|label| label.to_string())
                .collect();
            format!("fail (out of band at θ = {})", labels.join(", "))
        };
        format!(
            "graphical method: {graphical}\n\
             hypothesis method: {} {}\n\
             log-likelihoods: correct {}, indifferent {}, incorrect {}",
            self.hypothesis.verdict,
            self.hypothesis.log_likelihood,
            self.hypothesis.correct,
            self.hypothesis.indifferent,
            self.hypothesis.incorrect
        )
    }
}
