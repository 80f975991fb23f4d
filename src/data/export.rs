use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::analysis::graphical::{GraphPoint, GraphicalResult};
use crate::analysis::report::AnalysisReport;

/// File names of the per-series tables, in `(actual, predicted, upper, lower)` order.
pub const SERIES_FILES: [&str; 4] = [
    "actualPoints.csv",
    "birnbaumPoints.csv",
    "positiveConfidenceIntervalPoints.csv",
    "negativeConfidenceIntervalPoints.csv",
];

// ---------------------------------------------------------------------------
// Flat 8-column table
// ---------------------------------------------------------------------------

/// Write one headerless row per bucket:
/// `actual.θ, actual.v, predicted.θ, predicted.v, upper.θ, upper.v, lower.θ, lower.v`.
///
/// Floats use Rust's shortest round-trip formatting; undefined values are `NaN`.
pub fn write_table<W: Write>(writer: W, graphical: &GraphicalResult) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for (row_no, points) in graphical.points().iter().enumerate() {
        let record: Vec<String> = points
            .iter()
            .flat_map(|p| [p.ability.to_string(), p.value.to_string()])
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing table row {row_no}"))?;
    }

    writer.flush().context("flushing table")?;
    Ok(())
}

pub fn write_table_csv(path: &Path, graphical: &GraphicalResult) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_table(file, graphical)?;
    log::info!("Wrote {} table rows to {}", graphical.rows.len(), path.display());
    Ok(())
}

/// Read a table written by [`write_table`] back into point 4-tuples.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<[GraphPoint; 4]>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("table row {row_no}"))?;
        if record.len() != 8 {
            bail!("table row {row_no}: expected 8 columns, found {}", record.len());
        }

        let mut values = [0.0_f64; 8];
        for (slot, field) in values.iter_mut().zip(record.iter()) {
            *slot = field
                .parse::<f64>()
                .with_context(|| format!("table row {row_no}: '{field}' is not a number"))?;
        }

        rows.push([
            GraphPoint::new(values[0], values[1]),
            GraphPoint::new(values[2], values[3]),
            GraphPoint::new(values[4], values[5]),
            GraphPoint::new(values[6], values[7]),
        ]);
    }
    Ok(rows)
}

pub fn read_table_csv(path: &Path) -> Result<Vec<[GraphPoint; 4]>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_table(file)
}

// ---------------------------------------------------------------------------
// Per-series two-column tables
// ---------------------------------------------------------------------------

/// Write each series to its own `ability,value` file inside `dir`.
/// Returns the paths written, in [`SERIES_FILES`] order.
pub fn write_series_csvs(dir: &Path, graphical: &GraphicalResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let points = graphical.points();
    let mut written = Vec::with_capacity(SERIES_FILES.len());

    for (series, name) in SERIES_FILES.iter().enumerate() {
        let path = dir.join(name);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &points {
            let point = row[series];
            writer.write_record([point.ability.to_string(), point.value.to_string()])?;
        }
        writer.flush()?;
        written.push(path);
    }

    log::info!("Wrote {} series files to {}", written.len(), dir.display());
    Ok(written)
}

// ---------------------------------------------------------------------------
// JSON document
// ---------------------------------------------------------------------------

pub fn write_report<W: Write>(mut writer: W, report: &AnalysisReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("serializing report")?;
    writer.flush().context("flushing report")
}

pub fn write_report_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    write_report(&mut writer, report)?;
    log::info!("Wrote report to {}", path.display());
    Ok(())
}

pub fn read_report_json(path: &Path) -> Result<AnalysisReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).context("parsing report JSON")
}
