//! HTTP district data server.
//!
//! Serves district hotspot records, priority rankings, boundaries, and
//! NDVI-effect predictions over the urbanlens-core engine. The dashboard
//! (or any other client) consumes these endpoints as its District Data
//! Provider.
//!
//! Routes:
//! - `GET  /`                            API index
//! - `GET  /health`                      dataset health check
//! - `GET  /api/hotspots`                hotspot records
//! - `GET  /api/priority_auto`           city ranking + district details
//! - `GET  /geojson`                     boundary features with merged metrics
//! - `POST /predict/ndvi_effect_formula` per-district NDVI-effect prediction
//! - `GET  /predict/all`                 predictions for every district

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use urbanlens_core::district::DistrictReading;
use urbanlens_core::hotspot::{self, HotspotRecord};
use urbanlens_core::priority::{self, PriorityReport};
use urbanlens_core::{boundary, predict};

/// Shared server state. The dataset is computed once at startup and
/// served read-only; a reading refresh means restarting the server with
/// new data.
struct AppState {
    city: String,
    readings: Vec<DistrictReading>,
    hotspots: Vec<HotspotRecord>,
}

impl AppState {
    fn new(city: String, readings: Vec<DistrictReading>) -> Self {
        let hotspots = hotspot::compute_hotspots(&readings);
        Self {
            city,
            readings,
            hotspots,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    city: String,
    districts: usize,
}

#[derive(Serialize)]
struct CityRanking {
    city: String,
    priority: f64,
}

#[derive(Serialize)]
struct PriorityResponse {
    city_ranking: Vec<CityRanking>,
    district_details: PriorityReport,
}

#[derive(Deserialize)]
struct PredictRequest {
    district: String,
    ndvi_delta_pct: f64,
}

#[derive(Deserialize)]
struct PredictAllParams {
    ndvi_delta_pct: Option<f64>,
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    error: String,
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Urbanlens Server",
        "version": urbanlens_core::VERSION,
        "city": state.city,
        "districts": state.readings.len(),
        "endpoints": {
            "/": "This API index",
            "/health": "Dataset health check",
            "/api/hotspots": "District readings with exposure indices and recommendations",
            "/api/priority_auto": "Hybrid entropy+PCA priority ranking",
            "/geojson": "Boundary features with merged district metrics",
            "/predict/ndvi_effect_formula": {
                "method": "POST",
                "body": { "district": "Downtown Core", "ndvi_delta_pct": 10.0 },
                "description": "Predict LST/AOD change for one district",
            },
            "/predict/all": {
                "method": "GET",
                "params": { "ndvi_delta_pct": "NDVI change percent (default: 10)" },
                "description": "Predictions for every district",
            },
        },
        "examples": {
            "hotspots": "/api/hotspots",
            "priority": "/api/priority_auto",
            "predict": "curl -X POST -H 'Content-Type: application/json' -d '{\"district\":\"Downtown Core\",\"ndvi_delta_pct\":10}' /predict/ndvi_effect_formula",
        },
    }))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.readings.is_empty() {
            "degraded".to_string()
        } else {
            "healthy".to_string()
        },
        city: state.city.clone(),
        districts: state.readings.len(),
    })
}

async fn handle_hotspots(State(state): State<Arc<AppState>>) -> Json<Vec<HotspotRecord>> {
    Json(state.hotspots.clone())
}

async fn handle_priority(State(state): State<Arc<AppState>>) -> Json<PriorityResponse> {
    let report = priority::compute_priority(&state.city, &state.hotspots);
    Json(PriorityResponse {
        city_ranking: vec![CityRanking {
            city: report.city.clone(),
            priority: report.mean_priority,
        }],
        district_details: report,
    })
}

async fn handle_geojson(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(boundary::feature_collection(&state.hotspots))
}

async fn handle_predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<predict::NdviEffect>, (StatusCode, Json<ErrorResponse>)> {
    match predict::predict_for(&state.readings, &request.district, request.ndvi_delta_pct) {
        Ok(effect) => Ok(Json(effect)),
        Err(err) => {
            log::warn!("prediction rejected: {err}");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

async fn handle_predict_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictAllParams>,
) -> Json<Vec<predict::NdviEffect>> {
    let delta = params.ndvi_delta_pct.unwrap_or(10.0);
    Json(predict::predict_all(&state.readings, delta))
}

/// Build the axum router over a dataset.
fn build_router(city: String, readings: Vec<DistrictReading>) -> Router {
    let state = Arc::new(AppState::new(city, readings));

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route("/api/hotspots", get(handle_hotspots))
        .route("/api/priority_auto", get(handle_priority))
        .route("/geojson", get(handle_geojson))
        .route("/predict/ndvi_effect_formula", post(handle_predict))
        .route("/predict/all", get(handle_predict_all))
        .with_state(state)
}

/// Run the HTTP server over the given dataset.
pub async fn run_server(city: String, readings: Vec<DistrictReading>, host: &str, port: u16) {
    let app = build_router(city, readings);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    log::info!("listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use urbanlens_core::fixtures;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(
            fixtures::SAMPLE_CITY.to_string(),
            fixtures::sample_readings(),
        ))
    }

    #[tokio::test]
    async fn health_reports_district_count() {
        let response = handle_health(State(state())).await;
        assert_eq!(response.0.status, "healthy");
        assert_eq!(response.0.districts, 10);
    }

    #[tokio::test]
    async fn health_degraded_on_empty_dataset() {
        let empty = Arc::new(AppState::new("Nowhere".to_string(), Vec::new()));
        let response = handle_health(State(empty)).await;
        assert_eq!(response.0.status, "degraded");
    }

    #[tokio::test]
    async fn hotspots_carry_recommendations() {
        let response = handle_hotspots(State(state())).await;
        assert_eq!(response.0.len(), 10);
        assert!(response.0.iter().all(|h| !h.recommendation.is_empty()));
    }

    #[tokio::test]
    async fn priority_ranking_shape() {
        let response = handle_priority(State(state())).await;
        assert_eq!(response.0.city_ranking.len(), 1);
        assert_eq!(response.0.city_ranking[0].city, fixtures::SAMPLE_CITY);
        assert_eq!(response.0.district_details.districts.len(), 10);
        assert_eq!(response.0.district_details.districts[0].rank, 1);
    }

    #[tokio::test]
    async fn predict_known_district() {
        let response = handle_predict(
            State(state()),
            Json(PredictRequest {
                district: "Downtown Core".into(),
                ndvi_delta_pct: 10.0,
            }),
        )
        .await
        .unwrap();
        assert!((response.0.d_lst_pct - -4.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn predict_unknown_district_is_bad_request() {
        let err = handle_predict(
            State(state()),
            Json(PredictRequest {
                district: "Atlantis".into(),
                ndvi_delta_pct: 10.0,
            }),
        )
        .await
        .unwrap_err();
        let (status, Json(body)) = err;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("Atlantis"));
    }

    #[tokio::test]
    async fn predict_all_defaults_to_ten_percent() {
        let response = handle_predict_all(
            State(state()),
            Query(PredictAllParams {
                ndvi_delta_pct: None,
            }),
        )
        .await;
        assert_eq!(response.0.len(), 10);
        assert!((response.0[0].ndvi_delta_pct - 10.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn geojson_has_one_feature_per_district() {
        let response = handle_geojson(State(state())).await;
        let features = response.0["features"].as_array().unwrap().len();
        assert_eq!(features, 10);
    }
}
