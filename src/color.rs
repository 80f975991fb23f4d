use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series → Color32
// ---------------------------------------------------------------------------

/// The plotted series of the graphical method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Observed,
    Predicted,
    UpperBand,
    LowerBand,
}

impl Series {
    pub const ALL: [Series; 4] = [
        Series::Observed,
        Series::Predicted,
        Series::UpperBand,
        Series::LowerBand,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Series::Observed => "Observed frequency",
            Series::Predicted => "Birnbaum model",
            Series::UpperBand => "Upper band",
            Series::LowerBand => "Lower band",
        }
    }
}

/// Fixed colour per series. Both band edges share one hue.
#[derive(Debug, Clone)]
pub struct SeriesPalette {
    observed: Color32,
    predicted: Color32,
    band: Color32,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        let colors = generate_palette(3);
        SeriesPalette {
            observed: colors[0],
            predicted: colors[1],
            band: colors[2],
        }
    }
}

impl SeriesPalette {
    pub fn color_for(&self, series: Series) -> Color32 {
        match series {
            Series::Observed => self.observed,
            Series::Predicted => self.predicted,
            Series::UpperBand | Series::LowerBand => self.band,
        }
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(&'static str, Color32)> {
        Series::ALL
            .iter()
            .map(|&s| (s.label(), self.color_for(s)))
            .collect()
    }
}
