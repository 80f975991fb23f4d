use item_analysis::analysis::hypothesis::Hypothesis;
use item_analysis::analysis::report::AnalysisReport;
use item_analysis::analysis::{ItemAnalyzer, ItemParameters};
use item_analysis::data::export::{
    read_report_json, read_table_csv, write_report_json, write_series_csvs, write_table_csv,
    SERIES_FILES,
};
use item_analysis::data::model::SampleSet;

fn report() -> AnalysisReport {
    let records = vec![
        (true, -1),
        (false, -1),
        (false, -1),
        (true, 1),
        (true, 1),
        (false, 1),
        (true, 3),
        (true, 3),
    ];
    let samples = SampleSet::from_records(records).unwrap();
    ItemAnalyzer::new(ItemParameters::new(0.05, 1.0).unwrap(), samples)
        .unwrap()
        .analyze()
}

fn same(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= 1e-9
}

#[test]
fn table_round_trips_within_tolerance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.csv");
    let report = report();

    write_table_csv(&path, &report.graphical).unwrap();
    let rows = read_table_csv(&path).unwrap();

    let expected = report.graphical.points();
    assert_eq!(rows.len(), expected.len());
    for (got, want) in rows.iter().zip(&expected) {
        for (g, w) in got.iter().zip(want) {
            assert!(same(g.ability, w.ability), "{g:?} vs {w:?}");
            assert!(same(g.value, w.value), "{g:?} vs {w:?}");
        }
    }
    // θ = 0 and θ = 2 are empty buckets
    assert!(rows[1][0].value.is_nan());
    assert!(rows[3][2].value.is_nan());
}

#[test]
fn json_report_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = report();

    write_report_json(&path, &report).unwrap();
    let back = read_report_json(&path).unwrap();

    assert_eq!(back.parameters, report.parameters);
    assert_eq!(back.sample_count, report.sample_count);
    assert_eq!(back.graphical.verdict, report.graphical.verdict);
    assert_eq!(back.hypothesis, report.hypothesis);
    assert_eq!(back.graphical.rows.len(), report.graphical.rows.len());
    for (got, want) in back.graphical.rows.iter().zip(&report.graphical.rows) {
        for (g, w) in got.points().iter().zip(want.points().iter()) {
            assert!(same(g.value, w.value));
        }
    }
}

#[test]
fn json_report_keeps_negative_infinity() {
    // A wrong answer far above the difficulty: the Birnbaum model gives ln(0).
    let samples = SampleSet::from_records([(false, 1000), (true, 999)]).unwrap();
    let report = ItemAnalyzer::new(ItemParameters::new(0.0, 0.0).unwrap(), samples)
        .unwrap()
        .analyze();
    assert_eq!(report.hypothesis.correct, f64::NEG_INFINITY);
    assert_ne!(report.hypothesis.verdict, Hypothesis::Correct);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report_json(&path, &report).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"-inf\""));
    let back = read_report_json(&path).unwrap();
    assert_eq!(back.hypothesis.correct, f64::NEG_INFINITY);
    assert_eq!(back.hypothesis.verdict, report.hypothesis.verdict);
}

#[test]
fn series_files_hold_one_series_each() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("Output");
    let report = report();

    let written = write_series_csvs(&out, &report.graphical).unwrap();
    assert_eq!(written.len(), SERIES_FILES.len());

    let predicted = std::fs::read_to_string(out.join("birnbaumPoints.csv")).unwrap();
    let lines: Vec<&str> = predicted.lines().collect();
    assert_eq!(lines.len(), report.graphical.rows.len());
    for (line, row) in lines.iter().zip(&report.graphical.rows) {
        let fields: Vec<f64> = line.split(',').map(|f| f.parse().unwrap()).collect();
        assert_eq!(fields.len(), 2);
        assert!(same(fields[0], row.predicted.ability));
        assert!(same(fields[1], row.predicted.value));
    }
}
