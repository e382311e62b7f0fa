//! Embedded sample dataset.
//!
//! Stand-in for a live district data feed: ten districts with their
//! latest readings, plus a year of monthly values per indicator. Fixture
//! data only — no engine logic derives from these tables, and a real
//! provider replaces them wholesale.

use crate::district::DistrictReading;
use crate::indicator::Indicator;

/// City the sample dataset describes.
pub const SAMPLE_CITY: &str = "San Francisco";
/// Month of the sample district readings.
pub const SAMPLE_MONTH: &str = "Oct";

/// District rows: name, vegetation, heat island °C, air exposure,
/// population, latitude, longitude.
const DISTRICTS: [(&str, f64, f64, f64, f64, f64, f64); 10] = [
    ("Industrial East", 0.24, 8.2, 78.0, 12_500.0, 40.7128, -74.0060),
    ("Downtown Core", 0.31, 7.8, 72.0, 18_900.0, 40.7580, -73.9855),
    ("Port District", 0.19, 8.7, 82.0, 8_200.0, 40.6782, -74.0442),
    ("Highway Corridor", 0.28, 7.5, 75.0, 15_600.0, 40.7489, -73.9680),
    ("Manufacturing Zone", 0.22, 8.1, 79.0, 9_800.0, 40.6892, -73.9901),
    ("Commercial Strip", 0.35, 6.9, 68.0, 21_300.0, 40.7614, -73.9776),
    ("Dense Residential", 0.29, 7.2, 71.0, 25_400.0, 40.7505, -73.9934),
    ("Warehouse District", 0.21, 8.4, 80.0, 6_700.0, 40.7021, -74.0132),
    ("Transit Hub", 0.33, 7.3, 69.0, 19_200.0, 40.7527, -73.9772),
    ("Mixed Use Zone", 0.30, 7.6, 73.0, 17_800.0, 40.7392, -73.9903),
];

/// Jan–Dec values per indicator. Heat island values are canonical °C;
/// population is in thousands.
pub fn monthly_values(indicator: Indicator) -> [f64; 12] {
    match indicator {
        Indicator::Vegetation => [
            0.28, 0.30, 0.32, 0.35, 0.38, 0.36, 0.33, 0.31, 0.29, 0.32, 0.30, 0.35,
        ],
        Indicator::HeatIsland => [
            8.5, 8.2, 7.8, 7.2, 6.8, 7.5, 8.9, 9.2, 8.6, 7.8, 8.0, 8.3,
        ],
        Indicator::AerosolDepth => [
            68.0, 65.0, 62.0, 58.0, 55.0, 60.0, 72.0, 75.0, 70.0, 64.0, 66.0, 69.0,
        ],
        Indicator::Population => [
            12.3, 12.4, 12.5, 12.6, 12.7, 12.8, 12.9, 13.0, 13.1, 13.2, 13.3, 13.4,
        ],
    }
}

/// The sample district readings (latest month).
pub fn sample_readings() -> Vec<DistrictReading> {
    DISTRICTS
        .iter()
        .map(
            |&(district, vegetation, heat, air, population, latitude, longitude)| {
                DistrictReading {
                    district: district.to_string(),
                    month: SAMPLE_MONTH.to_string(),
                    vegetation,
                    heat_island_c: heat,
                    air_quality: air,
                    population,
                    latitude,
                    longitude,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::{self, Severity};

    #[test]
    fn ten_sample_districts() {
        let readings = sample_readings();
        assert_eq!(readings.len(), 10);
        assert!(readings.iter().all(|r| r.month == SAMPLE_MONTH));
    }

    #[test]
    fn sample_values_stay_in_domain() {
        for r in sample_readings() {
            for ind in Indicator::ALL {
                let (lo, hi) = ind.domain();
                let v = r.value(ind);
                assert!(v >= lo && v <= hi, "{}: {ind} = {v}", r.district);
            }
        }
    }

    #[test]
    fn monthly_tables_have_twelve_entries() {
        for ind in Indicator::ALL {
            assert_eq!(monthly_values(ind).len(), 12);
        }
    }

    #[test]
    fn sample_spans_all_severity_buckets() {
        let readings = sample_readings();
        for bucket in [Severity::Low, Severity::Medium, Severity::High] {
            assert!(
                readings
                    .iter()
                    .any(|r| severity::classify(Indicator::Vegetation, r.vegetation) == bucket),
                "no district classifies vegetation as {bucket}"
            );
        }
    }

    #[test]
    fn district_names_are_unique() {
        let readings = sample_readings();
        for (i, a) in readings.iter().enumerate() {
            for b in &readings[i + 1..] {
                assert_ne!(a.district, b.district);
            }
        }
    }
}
