use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use item_analysis::analysis::hypothesis::Hypothesis;
use item_analysis::data::export;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – parameters, verdicts, bucket table
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Item parameters");
    ui.separator();

    let mut params = state.params;
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Guessing c");
        changed |= ui
            .add(
                egui::DragValue::new(&mut params.guessing)
                    .speed(0.001)
                    .range(0.0..=0.999)
                    .max_decimals(9),
            )
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Difficulty δ");
        changed |= ui
            .add(egui::DragValue::new(&mut params.difficulty).speed(0.05))
            .changed();
    });
    if changed {
        state.set_params(params);
    }

    ui.add_space(8.0);
    ui.heading("Verdicts");
    ui.separator();

    let Some(report) = &state.report else {
        ui.label("No responses loaded.");
        return;
    };

    let (text, color) = if report.graphical.verdict {
        ("pass", Color32::GREEN)
    } else {
        ("fail", Color32::RED)
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Graphical method:");
        ui.label(RichText::new(text).strong().color(color));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Hypothesis method:");
        ui.label(RichText::new(report.hypothesis.verdict.label()).strong());
    });

    egui::CollapsingHeader::new(RichText::new("Log-likelihoods").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for hypothesis in Hypothesis::ALL {
                let value = report.hypothesis.log_likelihood_of(hypothesis);
                let mut line = RichText::new(format!("{hypothesis}: {value:.4}"));
                if hypothesis == report.hypothesis.verdict {
                    line = line.strong();
                }
                ui.label(line);
            }
        });

    ui.add_space(8.0);
    ui.strong("Legend");
    for (label, color) in state.palette.legend_entries() {
        ui.label(RichText::new(label).color(color));
    }

    ui.add_space(8.0);
    ui.heading("Buckets");
    ui.separator();

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(40.0), 6)
            .header(18.0, |mut header| {
                for title in ["θ", "n", "k", "observed", "predicted", "σ"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in &report.graphical.rows {
                    body.row(18.0, |mut table_row| {
                        let cells = [
                            format!("{}", row.actual.ability),
                            row.count.to_string(),
                            row.correct.to_string(),
                            format_value(row.actual.value),
                            format_value(row.predicted.value),
                            format_value(row.sigma),
                        ];
                        let in_band = row.within_band();
                        for cell in cells {
                            table_row.col(|ui: &mut Ui| {
                                if in_band {
                                    ui.label(cell);
                                } else {
                                    ui.label(RichText::new(cell).color(Color32::RED));
                                }
                            });
                        }
                    });
                }
            });
    });
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "–".to_string()
    } else {
        format!("{v:.3}")
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let has_report = state.report.is_some();
            if ui
                .add_enabled(has_report, egui::Button::new("Export table…"))
                .clicked()
            {
                export_table_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_report, egui::Button::new("Export report…"))
                .clicked()
            {
                export_report_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(has_report, egui::Button::new("Export series…"))
                .clicked()
            {
                export_series_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(samples), Some(report)) = (&state.samples, &state.report) {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} responses, {} buckets",
                samples.len(),
                report.graphical.rows.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_band, "Confidence band")
            .clicked()
        {
            state.show_band = !state.show_band;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open item responses")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}

fn export_table_dialog(state: &mut AppState) {
    let Some(report) = &state.report else { return };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export graph table")
        .set_file_name("graph.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };
    let result = export::write_table_csv(&path, &report.graphical);
    report_export_result(state, result);
}

fn export_report_dialog(state: &mut AppState) {
    let Some(report) = &state.report else { return };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export analysis report")
        .set_file_name("report.json")
        .add_filter("JSON", &["json"])
        .save_file()
    else {
        return;
    };
    let result = export::write_report_json(&path, report);
    report_export_result(state, result);
}

fn export_series_dialog(state: &mut AppState) {
    let Some(report) = &state.report else { return };
    let Some(dir) = rfd::FileDialog::new()
        .set_title("Export series into folder")
        .pick_folder()
    else {
        return;
    };
    let result = export::write_series_csvs(&dir, &report.graphical).map(|_| ());
    report_export_result(state, result);
}

fn report_export_result(state: &mut AppState, result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::error!("Export failed: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
