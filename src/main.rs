mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::ItemAnalysisApp;
use clap::Parser;
use eframe::egui;
use item_analysis::analysis::ItemParameters;
use state::AppState;

#[derive(Parser)]
#[command(name = "item-analysis", version, about = "Item fit viewer")]
struct Args {
    /// Response file to open on start-up (.csv, .json or .parquet)
    input: Option<PathBuf>,
    /// Guessing probability c, in [0, 1)
    #[arg(long, default_value_t = ItemParameters::default().guessing)]
    guessing: f64,
    /// Item difficulty δ
    #[arg(long, default_value_t = ItemParameters::default().difficulty)]
    difficulty: f64,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    state.params = ItemParameters {
        guessing: args.guessing,
        difficulty: args.difficulty,
    };
    if let Err(e) = state.params.validate() {
        log::error!("{e}");
        state.status_message = Some(format!("Error: {e}"));
    }
    if let Some(path) = args.input {
        state.open_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Item Analysis – Birnbaum fit",
        options,
        Box::new(move |_cc| Ok(Box::new(ItemAnalysisApp::new(state)))),
    )
}
