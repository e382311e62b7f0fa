//! District readings — the raw per-district data the engine consumes.
//!
//! Readings are immutable once fetched: loaded at view mount, held for
//! the session, replaced wholesale on a successful refetch.

use serde::{Deserialize, Serialize};

use crate::indicator::Indicator;

/// One district's indicator values for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictReading {
    /// District name/code.
    pub district: String,
    /// Month label ("Jan" … "Dec").
    pub month: String,
    /// Vegetation index, [0, 1].
    pub vegetation: f64,
    /// Heat island intensity, canonical °C.
    pub heat_island_c: f64,
    /// Aerosol/particulate exposure index.
    pub air_quality: f64,
    /// Resident population.
    pub population: f64,
    /// District centroid latitude.
    pub latitude: f64,
    /// District centroid longitude.
    pub longitude: f64,
}

impl DistrictReading {
    /// The reading for one indicator. Heat island values stay canonical
    /// Celsius here — conversion belongs to the display path.
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Vegetation => self.vegetation,
            Indicator::HeatIsland => self.heat_island_c,
            Indicator::AerosolDepth => self.air_quality,
            Indicator::Population => self.population,
        }
    }
}

/// Find a reading by district name (exact match).
pub fn find_reading<'a>(
    readings: &'a [DistrictReading],
    district: &str,
) -> Option<&'a DistrictReading> {
    readings.iter().find(|r| r.district == district)
}
