//! Monthly series generation and sparkline windows.
//!
//! A series is the full Jan–Dec sequence for one indicator, tagged with
//! month labels. The sparkline window is the trailing slice of at most
//! [`SPARKLINE_WINDOW`] points ending at the current month — one point in
//! January, growing to six by June.
//!
//! Temperature conversion happens here, once per series generation, so
//! callers render converted values without re-converting per frame.

use crate::indicator::Indicator;
use crate::units::{self, TemperatureUnit};

/// Month labels in calendar order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Maximum number of trailing points in a sparkline window.
pub const SPARKLINE_WINDOW: usize = 6;

/// One labeled point of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Month label ("Jan" … "Dec").
    pub month: &'static str,
    /// Month index, 0-based.
    pub index: usize,
    /// Value, already converted to the active display unit for
    /// temperature indicators.
    pub value: f64,
}

/// Month-over-month direction of a series at the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

/// Look up a month index by label ("Jan" → 0). Case-sensitive, matching
/// the fixed [`MONTHS`] labels.
pub fn month_index(label: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == label)
}

/// Build the full 12-point labeled series for an indicator.
///
/// For [`Indicator::HeatIsland`] the stored Celsius values are converted
/// to `unit` here; every other indicator passes through unchanged.
pub fn monthly_series(
    indicator: Indicator,
    values: &[f64; 12],
    unit: TemperatureUnit,
) -> Vec<SeriesPoint> {
    MONTHS
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(index, (&month, &raw))| {
            let value = if indicator.is_temperature() {
                units::convert(raw, unit)
            } else {
                raw
            };
            SeriesPoint {
                month,
                index,
                value,
            }
        })
        .collect()
}

/// Trailing window of the series ending at `month_index`, at most
/// [`SPARKLINE_WINDOW`] points. Window length is `min(6, month_index + 1)`:
/// January yields exactly one point.
pub fn sparkline_window(series: &[SeriesPoint], month_index: usize) -> &[SeriesPoint] {
    let end = (month_index + 1).min(series.len());
    let start = end.saturating_sub(SPARKLINE_WINDOW);
    &series[start..end]
}

/// Direction of the series at `month_index` versus the previous month.
/// January compares against itself and reports [`Trend::Flat`].
pub fn trend(series: &[SeriesPoint], month_index: usize) -> Trend {
    if series.is_empty() {
        return Trend::Flat;
    }
    let idx = month_index.min(series.len() - 1);
    let prev = idx.saturating_sub(1);
    let current = series[idx].value;
    let previous = series[prev].value;
    if current > previous {
        Trend::Rising
    } else if current < previous {
        Trend::Falling
    } else {
        Trend::Flat
    }
}
