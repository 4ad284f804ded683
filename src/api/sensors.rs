use super::ApiError;
use crate::sensor::SensorReading;
use crate::simulator::SensorSimulator;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Shared state for the sensor API
pub struct SensorsAppState {
    pub simulator: Arc<SensorSimulator>,
}

/// Batch envelope for GET /api/sensors and /api/data
#[derive(Serialize)]
pub struct SensorsResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub count: usize,
    pub sensors: Vec<SensorReading>,
}

/// Envelope for a single sensor reading
#[derive(Serialize)]
pub struct SensorResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub sensor: SensorReading,
}

/// Create sensor API router
pub fn create_sensors_router(state: Arc<SensorsAppState>) -> Router {
    Router::new()
        .route("/api/sensors", get(get_sensors))
        .route("/api/data", get(get_sensors))
        .route("/api/sensors/:id", get(get_sensor))
        .with_state(state)
}

/// GET /api/sensors (and /api/data) - current readings for the whole catalog
///
/// Per-sensor failures come back as `error` readings inside a successful
/// response; only a failure of the batch itself yields a 500.
async fn get_sensors(
    State(state): State<Arc<SensorsAppState>>,
) -> Result<Json<SensorsResponse>, ApiError> {
    let simulator = Arc::clone(&state.simulator);
    let sensors = tokio::task::spawn_blocking(move || simulator.all_readings())
        .await
        .map_err(|e| ApiError::SensorData(e.to_string()))?;

    info!(count = sensors.len(), "Retrieved sensor data");

    Ok(Json(SensorsResponse {
        status: "success",
        timestamp: Utc::now(),
        count: sensors.len(),
        sensors,
    }))
}

/// GET /api/sensors/:id - current reading for one sensor
async fn get_sensor(
    State(state): State<Arc<SensorsAppState>>,
    Path(id): Path<String>,
) -> Result<Json<SensorResponse>, ApiError> {
    let sensor = state.simulator.reading_for(&id)?;

    Ok(Json(SensorResponse {
        status: "success",
        timestamp: Utc::now(),
        sensor,
    }))
}
