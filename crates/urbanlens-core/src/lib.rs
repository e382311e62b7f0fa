//! # urbanlens-core
//!
//! **Metric derivation engine for urban environmental indicators.**
//!
//! `urbanlens-core` turns raw per-district readings (vegetation index,
//! heat island intensity, aerosol exposure, population) and what-if
//! slider inputs into display-ready, unit-correct metrics: converted
//! temperatures, monthly series with sparkline windows, scenario impact
//! projections, severity buckets, exposure indices, and priority
//! rankings.
//!
//! ## Quick Start
//!
//! ```
//! use urbanlens_core::{Indicator, ScenarioInput, TemperatureUnit};
//!
//! // Project the impact of a 10% vegetation increase
//! let impact = urbanlens_core::project(&ScenarioInput::default()).unwrap();
//! assert_eq!(impact.temperature_reduction_c, 3.0);
//!
//! // Classify a reading for badge coloring
//! let bucket = urbanlens_core::classify(Indicator::Vegetation, 0.19);
//! assert_eq!(bucket.to_string(), "high-concern");
//!
//! // Format a canonical-Celsius reading for display
//! let s = urbanlens_core::format_temperature(8.5, TemperatureUnit::Fahrenheit);
//! assert_eq!(s, "47.3°F");
//! ```
//!
//! ## Architecture
//!
//! Readings → Engine (pure functions) → Display values
//!
//! Everything here is a pure function over immutable value types. The
//! engine performs no I/O: a [`DistrictProvider`] hands it data, and the
//! selection state machine ([`SelectionState`]) is transitioned only
//! through its reducer. All temperatures are stored canonical Celsius and
//! converted exactly once, at display or series-generation time.

pub mod boundary;
pub mod district;
pub mod fixtures;
pub mod hotspot;
pub mod indicator;
pub mod predict;
pub mod priority;
pub mod provider;
pub mod rules;
pub mod scenario;
pub mod selection;
pub mod series;
pub mod severity;
pub mod units;

pub use district::{DistrictReading, find_reading};
pub use hotspot::{HotspotRecord, compute_hotspots};
pub use indicator::Indicator;
pub use predict::{ALPHA_AOD, ALPHA_LST, NdviEffect, PredictError, predict_all, predict_for};
pub use priority::{
    CriterionWeights, PriorityRecord, PriorityReport, WeightBreakdown, compute_priority,
    compute_weights,
};
pub use provider::{DistrictProvider, FixtureProvider, LoadState, ProviderError};
pub use scenario::{ScenarioError, ScenarioImpact, ScenarioInput, project};
pub use selection::{SelectionEvent, SelectionPhase, SelectionState};
pub use series::{
    MONTHS, SPARKLINE_WINDOW, SeriesPoint, Trend, month_index, monthly_series, sparkline_window,
    trend,
};
pub use severity::{Severity, classify};
pub use units::{
    TemperatureUnit, convert, convert_delta, format_temperature, to_fahrenheit, to_kelvin,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
