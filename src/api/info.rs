use axum::{response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SERVICE_NAME: &str = "IoT Sensor Dashboard API";

/// Public endpoints, listed by `GET /` and logged at startup
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/", "GET - API information"),
    ("/api/sensors", "GET - Retrieve all sensor data"),
    ("/api/sensors/:id", "GET - Retrieve a single sensor reading"),
    ("/api/data", "GET - Retrieve current sensor readings"),
    ("/api/health", "GET - API health check"),
];

#[derive(Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
}

/// Routes that do not touch the simulator
pub fn create_info_router() -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/api/health", get(health_check))
}

/// GET / - API metadata
async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}

/// GET /api/health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        service: SERVICE_NAME,
    })
}
