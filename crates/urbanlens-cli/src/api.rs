//! HTTP client for the urbanlens server.
//!
//! Blocking client over the server's JSON endpoints, configured from the
//! environment with a code default. Transport, status, and decode
//! failures map onto the provider error taxonomy so callers can tell
//! "couldn't reach it" from "it answered garbage".

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use urbanlens_core::hotspot::HotspotRecord;
use urbanlens_core::predict::NdviEffect;
use urbanlens_core::priority::PriorityReport;
use urbanlens_core::provider::{DistrictProvider, ProviderError};

/// Default API base when neither flag nor environment provides one.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8040";
/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "URBANLENS_API_URL";

pub struct ApiClient {
    base: String,
    client: Client,
}

#[derive(Deserialize)]
struct HealthDoc {
    city: String,
}

#[derive(Deserialize)]
struct PriorityEnvelope {
    district_details: PriorityReport,
}

impl ApiClient {
    /// Build a client. Base URL resolution: explicit argument, then
    /// `$URBANLENS_API_URL`, then the localhost default. A trailing slash
    /// is trimmed so path joins stay predictable.
    pub fn new(base: Option<&str>) -> Self {
        let base = base
            .map(str::to_string)
            .or_else(|| std::env::var(API_BASE_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let base = base.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("HTTP client construction failed");

        Self { base, client }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}{path}", self.base);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }
        response
            .json::<T>()
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }

    /// POST /predict/ndvi_effect_formula for one district.
    pub fn predict(&self, district: &str, ndvi_delta_pct: f64) -> Result<NdviEffect, ProviderError> {
        let url = format!("{}/predict/ndvi_effect_formula", self.base);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "district": district,
                "ndvi_delta_pct": ndvi_delta_pct,
            }))
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }
        response
            .json::<NdviEffect>()
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

impl DistrictProvider for ApiClient {
    fn city(&self) -> String {
        self.get_json::<HealthDoc>("/health")
            .map(|h| h.city)
            .unwrap_or_else(|_| "Unknown".to_string())
    }

    fn fetch_hotspots(&self) -> Result<Vec<HotspotRecord>, ProviderError> {
        self.get_json("/api/hotspots")
    }

    fn fetch_priority(&self) -> Result<PriorityReport, ProviderError> {
        self.get_json::<PriorityEnvelope>("/api/priority_auto")
            .map(|envelope| envelope.district_details)
    }

    fn fetch_boundaries(&self) -> Result<serde_json::Value, ProviderError> {
        self.get_json("/geojson")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins_and_is_trimmed() {
        let client = ApiClient::new(Some("http://example.test:9000/"));
        assert_eq!(client.base(), "http://example.test:9000");
    }

    #[test]
    fn default_base_is_localhost() {
        // Only meaningful when the env override is unset in the test
        // environment; fall through to the compiled-in default then.
        if std::env::var(API_BASE_ENV).is_err() {
            let client = ApiClient::new(None);
            assert_eq!(client.base(), DEFAULT_API_BASE);
        }
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        // Reserved TEST-NET address: nothing listens there.
        let client = ApiClient::new(Some("http://192.0.2.1:9"));
        match client.fetch_hotspots() {
            Err(ProviderError::Network(_)) => {}
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
