pub mod dashboard;
pub mod hotspots;
pub mod predict;
pub mod priority;
pub mod scenario;
pub mod serve;

use anyhow::{Context, Result};

use urbanlens_core::provider::{DistrictProvider, FixtureProvider};
use urbanlens_core::units::TemperatureUnit;

use crate::api::ApiClient;

/// Build the district data provider: the embedded sample dataset when
/// offline, otherwise the HTTP API.
pub fn make_provider(api: Option<&str>, offline: bool) -> Box<dyn DistrictProvider + Send + Sync> {
    if offline {
        Box::new(FixtureProvider)
    } else {
        Box::new(ApiClient::new(api))
    }
}

/// Parse a temperature unit flag (c/f/k).
pub fn parse_unit(s: &str) -> TemperatureUnit {
    match s {
        "f" | "F" => TemperatureUnit::Fahrenheit,
        "k" | "K" => TemperatureUnit::Kelvin,
        _ => TemperatureUnit::Celsius,
    }
}

/// Write a serializable value as pretty JSON.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {path}"))?;
    println!("Wrote {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unit_variants() {
        assert_eq!(parse_unit("c"), TemperatureUnit::Celsius);
        assert_eq!(parse_unit("f"), TemperatureUnit::Fahrenheit);
        assert_eq!(parse_unit("F"), TemperatureUnit::Fahrenheit);
        assert_eq!(parse_unit("k"), TemperatureUnit::Kelvin);
        assert_eq!(parse_unit("anything"), TemperatureUnit::Celsius);
    }

    #[test]
    fn offline_provider_is_fixture_backed() {
        let provider = make_provider(None, true);
        assert_eq!(provider.city(), urbanlens_core::fixtures::SAMPLE_CITY);
        assert!(!provider.fetch_hotspots().unwrap().is_empty());
    }
}
