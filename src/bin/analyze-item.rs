#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use item_analysis::analysis::{ItemAnalyzer, ItemParameters};
use item_analysis::data::{export, loader};

#[derive(Parser)]
#[command(
    name = "analyze-item",
    version,
    about = "Check one test item against the Birnbaum model"
)]
struct Cli {
    /// Response file: headerless `outcome,ability` CSV, JSON records or Parquet
    #[arg(default_value = "Data/data.csv")]
    input: PathBuf,
    /// Guessing probability c, in [0, 1)
    #[arg(long, default_value_t = ItemParameters::default().guessing)]
    guessing: f64,
    /// Item difficulty δ
    #[arg(long, default_value_t = ItemParameters::default().difficulty)]
    difficulty: f64,
    /// Write the 8-column graph table here
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the full JSON report here
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write one two-column file per series into this directory
    #[arg(long)]
    series_dir: Option<PathBuf>,
    /// Do not print the summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = ItemParameters::new(cli.guessing, cli.difficulty)?;
    let samples = loader::load_file(&cli.input)?;
    let analyzer = ItemAnalyzer::new(params, samples)
        .with_context(|| format!("analysing {}", cli.input.display()))?;
    let report = analyzer.analyze();

    if let Some(path) = &cli.csv {
        export::write_table_csv(path, &report.graphical)?;
    }
    if let Some(path) = &cli.json {
        export::write_report_json(path, &report)?;
    }
    if let Some(dir) = &cli.series_dir {
        export::write_series_csvs(dir, &report.graphical)?;
    }

    if !cli.quiet {
        println!("{}", report.summary());
    }
    Ok(())
}
