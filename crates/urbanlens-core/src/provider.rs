//! District data provider seam.
//!
//! The engine never fetches anything itself — a [`DistrictProvider`]
//! hands it readings, priority reports, and boundaries. The CLI supplies
//! an HTTP implementation; [`FixtureProvider`] serves the embedded sample
//! dataset for offline use and tests.
//!
//! [`LoadState`] is the render-facing lifecycle of a fetch: a view can
//! always distinguish "still loading" from "failed to load", and a failed
//! refetch leaves the previous data in place.

use crate::district::DistrictReading;
use crate::fixtures;
use crate::hotspot::{self, HotspotRecord};
use crate::priority::{self, PriorityReport};

/// Error taxonomy for provider fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// The request never completed (connect/timeout/transport).
    Network(String),
    /// The server answered with a non-OK status.
    Status(u16),
    /// The response body had an unexpected shape.
    Malformed(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network failure: {msg}"),
            Self::Status(code) => write!(f, "unexpected status {code}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Render-facing lifecycle of fetched data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Fetch in flight, nothing to show yet.
    Loading,
    /// Data available.
    Ready(T),
    /// Fetch failed; the message is user-visible.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The data, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Source of district data. One fetch per view mount; results replace
/// in-memory data wholesale.
pub trait DistrictProvider {
    /// Label for the dataset's city.
    fn city(&self) -> String;

    /// Hotspot records (readings + derived indices + recommendations).
    fn fetch_hotspots(&self) -> Result<Vec<HotspotRecord>, ProviderError>;

    /// Priority ranking for the dataset.
    fn fetch_priority(&self) -> Result<PriorityReport, ProviderError>;

    /// Boundary FeatureCollection with merged metrics.
    fn fetch_boundaries(&self) -> Result<serde_json::Value, ProviderError>;

    /// Raw readings, defaulting to the hotspot records' embedded readings.
    fn fetch_readings(&self) -> Result<Vec<DistrictReading>, ProviderError> {
        Ok(self
            .fetch_hotspots()?
            .into_iter()
            .map(|record| record.reading)
            .collect())
    }
}

/// Provider backed by the embedded sample dataset. Never fails.
#[derive(Debug, Default)]
pub struct FixtureProvider;

impl DistrictProvider for FixtureProvider {
    fn city(&self) -> String {
        fixtures::SAMPLE_CITY.to_string()
    }

    fn fetch_hotspots(&self) -> Result<Vec<HotspotRecord>, ProviderError> {
        Ok(hotspot::compute_hotspots(&fixtures::sample_readings()))
    }

    fn fetch_priority(&self) -> Result<PriorityReport, ProviderError> {
        let records = self.fetch_hotspots()?;
        Ok(priority::compute_priority(fixtures::SAMPLE_CITY, &records))
    }

    fn fetch_boundaries(&self) -> Result<serde_json::Value, ProviderError> {
        let records = self.fetch_hotspots()?;
        Ok(crate::boundary::feature_collection(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_provider_serves_hotspots() {
        let hotspots = FixtureProvider.fetch_hotspots().unwrap();
        assert!(!hotspots.is_empty());
        assert!(hotspots.iter().all(|h| !h.recommendation.is_empty()));
    }

    #[test]
    fn fixture_provider_readings_match_hotspots() {
        let provider = FixtureProvider;
        let readings = provider.fetch_readings().unwrap();
        let hotspots = provider.fetch_hotspots().unwrap();
        assert_eq!(readings.len(), hotspots.len());
        assert_eq!(readings[0], hotspots[0].reading);
    }

    #[test]
    fn fixture_provider_priority_is_ranked() {
        let report = FixtureProvider.fetch_priority().unwrap();
        assert_eq!(report.city, fixtures::SAMPLE_CITY);
        assert_eq!(report.districts[0].rank, 1);
    }

    #[test]
    fn load_state_accessors() {
        let ready: LoadState<u32> = LoadState::Ready(7);
        assert!(ready.is_ready());
        assert_eq!(ready.ready(), Some(&7));

        let loading: LoadState<u32> = LoadState::Loading;
        assert!(!loading.is_ready());
        assert_eq!(loading.ready(), None);

        let failed: LoadState<u32> = LoadState::Failed("boom".into());
        assert_eq!(failed.ready(), None);
    }

    #[test]
    fn provider_error_display() {
        assert_eq!(
            ProviderError::Status(503).to_string(),
            "unexpected status 503"
        );
        assert!(
            ProviderError::Network("refused".into())
                .to_string()
                .contains("refused")
        );
    }
}
