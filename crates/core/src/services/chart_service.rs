use std::f64::consts::{FRAC_PI_2, TAU};

use crate::models::chart::{ChartPoint, ComparisonChart, NumeralStyle, RadarChart, GRIDLINE_COUNT};

/// Axis maximum used when there is nothing to plot.
pub const DEFAULT_AXIS_MAX: f64 = 10.0;

const LEGACY_NUMERALS: [(usize, &str); 6] =
    [(10, "X"), (9, "IX"), (8, "IIX"), (5, "V"), (4, "IV"), (1, "I")];
const STANDARD_NUMERALS: [(usize, &str); 5] = [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];

/// Maps (category, amount) pairs onto radar chart geometry.
///
/// The core computes all the numbers — the frontend only renders.
/// Hidden categories are dropped before anything else, so hiding one
/// moves every remaining axis.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build a single-series radar chart.
    pub fn radar_chart(
        &self,
        entries: &[(String, f64)],
        hidden: &[String],
        style: NumeralStyle,
    ) -> RadarChart {
        let visible = visible_entries(entries, hidden);
        let normalized = normalize(&visible.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        let axis_max = axis_max(normalized.iter().copied());

        RadarChart {
            points: layout(&visible, &normalized, axis_max, style),
            axis_max,
            gridlines: gridlines(axis_max),
        }
    }

    /// Overlay budget shares and spending shares on the same axes.
    ///
    /// Axes follow the budget's category order; spending-only categories are
    /// appended after it. Each series is normalized against its own visible
    /// total and a category missing from one series plots at 0.
    pub fn comparison_chart(
        &self,
        budget: &[(String, f64)],
        spending: &[(String, f64)],
        hidden: &[String],
        style: NumeralStyle,
    ) -> ComparisonChart {
        let mut axes: Vec<String> = Vec::new();
        for (category, _) in budget.iter().chain(spending) {
            if !axes.contains(category) {
                axes.push(category.clone());
            }
        }

        let lookup = |series: &[(String, f64)], category: &str| -> f64 {
            series
                .iter()
                .filter(|(name, _)| name == category)
                .map(|(_, value)| *value)
                .sum()
        };
        let budget_series: Vec<(String, f64)> =
            axes.iter().map(|c| (c.clone(), lookup(budget, c))).collect();
        let spending_series: Vec<(String, f64)> =
            axes.iter().map(|c| (c.clone(), lookup(spending, c))).collect();

        let budget_visible = visible_entries(&budget_series, hidden);
        let spending_visible = visible_entries(&spending_series, hidden);
        let budget_norm = normalize(&budget_visible.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        let spending_norm =
            normalize(&spending_visible.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        let axis_max = axis_max(budget_norm.iter().chain(&spending_norm).copied());

        ComparisonChart {
            budget: layout(&budget_visible, &budget_norm, axis_max, style),
            spending: layout(&spending_visible, &spending_norm, axis_max, style),
            axis_max,
            gridlines: gridlines(axis_max),
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Each amount as a share (0–100) of the total. All zeros when the total is 0.
/// Negative amounts count as 0.
pub fn normalize(amounts: &[f64]) -> Vec<f64> {
    let total: f64 = amounts.iter().map(|a| a.max(0.0)).sum();
    amounts
        .iter()
        .map(|a| {
            if total > 0.0 {
                a.max(0.0) / total * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

/// `ceil(max / 10) × 10`, or 10 when every value is 0 (or there are none).
pub fn axis_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        DEFAULT_AXIS_MAX
    } else {
        (max / 10.0).ceil() * 10.0
    }
}

/// Radii of the evenly spaced gridlines, ending at `axis_max`.
pub fn gridlines(axis_max: f64) -> Vec<f64> {
    let step = axis_max / GRIDLINE_COUNT as f64;
    (1..=GRIDLINE_COUNT).map(|i| step * i as f64).collect()
}

/// Angle of axis `index` out of `count`, starting at 12 o'clock and
/// going clockwise on screen.
pub fn axis_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return -FRAC_PI_2;
    }
    index as f64 * (TAU / count as f64) - FRAC_PI_2
}

/// Roman numeral for `n` (greedy; values above 10 keep adding "X").
/// Returns an empty string for 0.
pub fn to_roman(mut n: usize, style: NumeralStyle) -> String {
    let table: &[(usize, &str)] = match style {
        NumeralStyle::Legacy => &LEGACY_NUMERALS,
        NumeralStyle::Standard => &STANDARD_NUMERALS,
    };
    let mut result = String::new();
    for (value, numeral) in table {
        while n >= *value {
            result.push_str(numeral);
            n -= value;
        }
    }
    result
}

fn visible_entries(entries: &[(String, f64)], hidden: &[String]) -> Vec<(String, f64)> {
    entries
        .iter()
        .filter(|(category, _)| !hidden.contains(category))
        .cloned()
        .collect()
}

fn layout(
    entries: &[(String, f64)],
    normalized: &[f64],
    axis_max: f64,
    style: NumeralStyle,
) -> Vec<ChartPoint> {
    let count = entries.len();
    entries
        .iter()
        .zip(normalized)
        .enumerate()
        .map(|(index, ((category, amount), value))| {
            let angle = axis_angle(index, count);
            let radius = value / axis_max;
            ChartPoint {
                category: category.clone(),
                label: to_roman(index + 1, style),
                normalized_value: *value,
                original_amount: *amount,
                angle,
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        })
        .collect()
}
