use std::path::PathBuf;

use item_analysis::analysis::report::AnalysisReport;
use item_analysis::analysis::{ItemAnalyzer, ItemParameters};
use item_analysis::data::model::SampleSet;

use crate::color::SeriesPalette;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded responses (None until user loads a file).
    pub samples: Option<SampleSet>,

    /// File the responses came from.
    pub source: Option<PathBuf>,

    /// Item parameters currently applied.
    pub params: ItemParameters,

    /// Result for `samples` under `params` (cached).
    pub report: Option<AnalysisReport>,

    /// Series colours.
    pub palette: SeriesPalette,

    /// Whether the confidence band is drawn.
    pub show_band: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            samples: None,
            source: None,
            params: ItemParameters::default(),
            report: None,
            palette: SeriesPalette::default(),
            show_band: true,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded response set and analyse it.
    pub fn set_samples(&mut self, source: PathBuf, samples: SampleSet) {
        self.samples = Some(samples);
        self.source = Some(source);
        self.status_message = None;
        self.reanalyze();
    }

    /// Load a response file. On failure the previous data stays and the error
    /// goes to the status line.
    pub fn open_path(&mut self, path: PathBuf) {
        match item_analysis::data::loader::load_file(&path) {
            Ok(samples) => self.set_samples(path, samples),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Apply new item parameters and rerun the analysis.
    pub fn set_params(&mut self, params: ItemParameters) {
        self.params = params;
        self.reanalyze();
    }

    /// Recompute `report` from the current samples and parameters.
    pub fn reanalyze(&mut self) {
        let Some(samples) = &self.samples else {
            self.report = None;
            return;
        };

        match ItemAnalyzer::new(self.params, samples.clone()) {
            Ok(analyzer) => {
                self.report = Some(analyzer.analyze());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> SampleSet {
        SampleSet::from_records([(false, 0), (true, 1), (true, 2), (true, 2)]).unwrap()
    }

    #[test]
    fn loading_samples_produces_a_report() {
        let mut state = AppState::default();
        assert!(state.report.is_none());

        state.set_samples(PathBuf::from("data.csv"), samples());
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.sample_count, 4);
        assert_eq!(report.graphical.rows.len(), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_open_keeps_previous_data_and_reports() {
        let mut state = AppState::default();
        state.set_samples(PathBuf::from("data.csv"), samples());

        state.open_path(PathBuf::from("no/such/responses.csv"));
        assert_eq!(state.source, Some(PathBuf::from("data.csv")));
        assert!(state.report.is_some());
        let status = state.status_message.as_deref().unwrap();
        assert!(status.contains("responses.csv"), "{status}");
    }

    #[test]
    fn parameter_change_recomputes() {
        let mut state = AppState::default();
        state.set_samples(PathBuf::from("data.csv"), samples());
        let before = state.report.clone().unwrap();

        state.set_params(ItemParameters::new(0.2, 0.0).unwrap());
        let after = state.report.as_ref().unwrap();
        assert_eq!(after.parameters.guessing, 0.2);
        assert_ne!(before.hypothesis.correct, after.hypothesis.correct);
    }

    #[test]
    fn invalid_parameters_surface_in_status() {
        let mut state = AppState::default();
        state.set_samples(PathBuf::from("data.csv"), samples());
        state.set_params(ItemParameters {
            guessing: 1.5,
            difficulty: 0.0,
        });
        assert!(state.report.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("guessing"));
    }
}
