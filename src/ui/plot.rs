use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use item_analysis::analysis::birnbaum::predict;
use item_analysis::analysis::graphical::GraphPoint;

use crate::color::Series;
use crate::state::AppState;

/// Samples per ability unit when drawing the model curve.
const CURVE_RESOLUTION: usize = 20;

// ---------------------------------------------------------------------------
// Item characteristic plot (central panel)
// ---------------------------------------------------------------------------

/// Render observed frequencies, the Birnbaum curve and the confidence band.
pub fn item_plot(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(report) => report,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a response file to analyse an item  (File → Open…)");
            });
            return;
        }
    };

    let rows = &report.graphical.rows;
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return;
    };
    let params = report.parameters;
    let palette = &state.palette;

    // Extend the curve one unit past the data on both sides.
    let start = first.predicted.ability - 1.0;
    let end = last.predicted.ability + 1.0;
    let steps = ((end - start) as usize).max(1) * CURVE_RESOLUTION;
    let curve: PlotPoints = (0..=steps)
        .map(|i| {
            let theta = start + (end - start) * i as f64 / steps as f64;
            [theta, predict(params.guessing, params.difficulty, theta)]
        })
        .collect();

    let observed = defined_points(rows.iter().map(|r| r.actual));
    let upper = defined_points(rows.iter().map(|r| r.upper_band));
    let lower = defined_points(rows.iter().map(|r| r.lower_band));

    Plot::new("item_plot")
        .legend(Legend::default())
        .x_axis_label("Ability θ")
        .y_axis_label("P(correct)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(curve)
                    .name(Series::Predicted.label())
                    .color(palette.color_for(Series::Predicted))
                    .width(2.0),
            );

            if state.show_band {
                for (series, points) in [(Series::UpperBand, upper), (Series::LowerBand, lower)] {
                    plot_ui.line(
                        Line::new(points)
                            .name(series.label())
                            .color(palette.color_for(series))
                            .style(LineStyle::dashed_loose())
                            .width(1.5),
                    );
                }
            }

            plot_ui.points(
                Points::new(observed)
                    .name(Series::Observed.label())
                    .color(palette.color_for(Series::Observed))
                    .radius(4.0),
            );
        });
}

/// Drop points with an undefined value (empty buckets).
fn defined_points(points: impl Iterator<Item = GraphPoint>) -> Vec<[f64; 2]> {
    points
        .filter(|p| p.value.is_finite())
        .map(|p| [p.ability, p.value])
        .collect()
}
