use serde::{Deserialize, Serialize};

/// Number of concentric gridlines on every radar chart.
pub const GRIDLINE_COUNT: usize = 5;

/// Roman numeral encoding used for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralStyle {
    /// Matches the labels users already know: 8 is written "IIX"
    #[default]
    Legacy,
    /// Conventional numerals: 8 is written "VIII"
    Standard,
}

/// One category plotted on a radar chart.
///
/// The core computes all the geometry; the frontend only scales `x`/`y`
/// by its own radius and draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,

    /// Roman numeral of the 1-based position among visible categories
    pub label: String,

    /// Share of the visible total, 0–100
    pub normalized_value: f64,

    /// The raw amount the share was computed from
    pub original_amount: f64,

    /// Axis angle in radians, −π/2 (12 o'clock) for the first category
    pub angle: f64,

    /// Position on a unit-radius chart (screen coordinates, y grows downwards)
    pub x: f64,
    pub y: f64,
}

/// A single-series radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub points: Vec<ChartPoint>,

    /// Radial axis maximum; a multiple of 10, at least 10
    pub axis_max: f64,

    /// Radii of the concentric gridlines, innermost first
    pub gridlines: Vec<f64>,
}

impl RadarChart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Budget share and spending share overlaid on the same axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub budget: Vec<ChartPoint>,
    pub spending: Vec<ChartPoint>,

    /// Shared axis maximum covering both series
    pub axis_max: f64,
    pub gridlines: Vec<f64>,
}
