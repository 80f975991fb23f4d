use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, BooleanArray, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Sample, SampleSet};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the responses to one item from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – headerless `outcome,ability` rows (the usual export)
/// * `.json`         – `[{ "outcome": 1, "ability": 2 }, ...]`
/// * `.parquet`      – `outcome` and `ability` columns
///
/// Any malformed record aborts the whole load.
pub fn load_file(path: &Path) -> Result<SampleSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let set = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} responses ({} correct) from {}, θ ∈ [{}, {}]",
        set.len(),
        set.correct_count(),
        path.display(),
        set.min_ability(),
        set.max_ability()
    );
    Ok(set)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SampleSet> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: no header, exactly two integer columns per row.
///   `outcome,ability`  e.g. `1,3`
/// A non-zero outcome counts as a correct answer.
pub fn read_csv<R: Read>(reader: R) -> Result<SampleSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != 2 {
            bail!(
                "CSV row {row_no}: expected 2 columns (outcome, ability), found {}",
                record.len()
            );
        }

        let outcome = parse_integer(&record[0], row_no, "outcome")?;
        let ability = parse_integer(&record[1], row_no, "ability")?;
        records.push((outcome != 0, ability));
    }

    Ok(SampleSet::from_records(records)?)
}

fn parse_integer(s: &str, row: usize, col: &str) -> Result<i64> {
    s.parse::<i64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not an integer"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "outcome": 1,     "ability": 2 },
///   { "outcome": false, "ability": -1 }
/// ]
/// ```
fn load_json(path: &Path) -> Result<SampleSet> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<SampleSet> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut samples = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let correct = match obj.get("outcome") {
            Some(JsonValue::Bool(b)) => *b,
            Some(JsonValue::Number(n)) => {
                n.as_i64()
                    .with_context(|| format!("Row {i}: 'outcome' {n} is not an integer"))?
                    != 0
            }
            _ => bail!("Row {i}: missing or invalid 'outcome'"),
        };

        let ability = obj
            .get("ability")
            .and_then(|v| v.as_f64())
            .with_context(|| format!("Row {i}: missing or invalid 'ability'"))?;

        samples.push(Sample::new(ability, correct));
    }

    Ok(SampleSet::new(samples)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of responses.
///
/// Expected schema:
/// - `outcome`: Boolean, Int32 or Int64 (non-zero = correct)
/// - `ability`: Int32, Int64 or Float64
/// - Any other columns are ignored
fn load_parquet(path: &Path) -> Result<SampleSet> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut samples = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let outcome_idx = schema
            .index_of("outcome")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'outcome' column"))?;
        let ability_idx = schema
            .index_of("ability")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'ability' column"))?;

        let outcome_col = batch.column(outcome_idx);
        let ability_col = batch.column(ability_idx);

        for row in 0..batch.num_rows() {
            let correct = extract_outcome(outcome_col, row)
                .with_context(|| format!("Row {}: failed to read 'outcome'", samples.len()))?;
            let ability = extract_ability(ability_col, row)
                .with_context(|| format!("Row {}: failed to read 'ability'", samples.len()))?;
            samples.push(Sample::new(ability, correct));
        }
    }

    Ok(SampleSet::new(samples)?)
}

// -- Parquet / Arrow helpers --

fn extract_outcome(col: &Arc<dyn Array>, row: usize) -> Result<bool> {
    if col.is_null(row) {
        bail!("null outcome");
    }
    match col.data_type() {
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) != 0)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) != 0)
        }
        other => bail!("Expected Boolean or integer outcome column, got {other:?}"),
    }
}

fn extract_ability(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null ability");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("Expected Int32, Int64 or Float64 ability column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn csv_rows_become_samples() {
        let set = read_csv("1,3\n0, -2\n5,3\n".as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.samples()[0], Sample::new(3.0, true));
        assert_eq!(set.samples()[1], Sample::new(-2.0, false));
        // any non-zero outcome is a correct answer
        assert!(set.samples()[2].correct);
    }

    #[test]
    fn csv_wrong_column_count_is_fatal() {
        let err = read_csv("1,3\n0,2,7\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("expected 2 columns"));
    }

    #[test]
    fn csv_non_numeric_field_is_fatal() {
        let err = read_csv("1,3\nyes,2\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("'yes' is not an integer"));
    }

    #[test]
    fn csv_fractional_ability_is_not_an_integer() {
        assert!(read_csv("1,2.5\n".as_bytes()).is_err());
    }

    #[test]
    fn empty_csv_reports_empty_sample_set() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::EmptySampleSet)
        );
    }

    #[test]
    fn json_accepts_bool_and_integer_outcomes() {
        let set = parse_json(r#"[{"outcome": true, "ability": 1}, {"outcome": 0, "ability": -1.0}]"#)
            .unwrap();
        assert_eq!(set.samples()[0], Sample::new(1.0, true));
        assert_eq!(set.samples()[1], Sample::new(-1.0, false));
    }

    #[test]
    fn json_fractional_ability_is_rejected() {
        let err = parse_json(r#"[{"outcome": 1, "ability": 0.5}]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::NonIntegralAbility { index: 0, .. })
        ));
    }

    #[test]
    fn json_missing_field_is_fatal() {
        assert!(parse_json(r#"[{"ability": 1}]"#).is_err());
        assert!(parse_json(r#"{"outcome": 1, "ability": 1}"#).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("responses.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
