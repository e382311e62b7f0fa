//! Rule-based intervention recommendations.
//!
//! Fixed thresholds, evaluated in priority order; the first matching rule
//! wins. Thresholds are on the same value scales as [`DistrictReading`]
//! (vegetation index, heat island °C, air exposure index).

use crate::district::DistrictReading;

/// Vegetation below this (with high population) calls for planting.
pub const RULE_VEGETATION_BELOW: f64 = 0.25;
/// Population above this makes low vegetation actionable.
pub const RULE_POPULATION_ABOVE: f64 = 20_000.0;
/// Heat island above this (with modest vegetation) calls for cool roofs.
pub const RULE_HEAT_ABOVE: f64 = 8.0;
/// Vegetation below this combines with heat for the cool-roof rule.
pub const RULE_HEAT_VEGETATION_BELOW: f64 = 0.30;
/// Air exposure above this calls for traffic reduction.
pub const RULE_AIR_ABOVE: f64 = 75.0;

pub const RECOMMEND_PLANT_TREES: &str = "Plant trees / add green roofs";
pub const RECOMMEND_COOL_ROOFS: &str = "Install cool roofs / reflective pavements";
pub const RECOMMEND_REDUCE_TRAFFIC: &str = "Reduce traffic / monitor air pollution";
pub const RECOMMEND_STABLE: &str = "Stable environment";

/// Recommend an intervention for a district.
pub fn recommend(reading: &DistrictReading) -> &'static str {
    if reading.vegetation < RULE_VEGETATION_BELOW && reading.population > RULE_POPULATION_ABOVE {
        RECOMMEND_PLANT_TREES
    } else if reading.heat_island_c > RULE_HEAT_ABOVE
        && reading.vegetation < RULE_HEAT_VEGETATION_BELOW
    {
        RECOMMEND_COOL_ROOFS
    } else if reading.air_quality > RULE_AIR_ABOVE {
        RECOMMEND_REDUCE_TRAFFIC
    } else {
        RECOMMEND_STABLE
    }
}
