use crate::simulator::SimulatorError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::any::Any;
use tracing::error;

/// Error envelope for routing failures (404, 500)
#[derive(Serialize)]
struct CodedErrorResponse {
    status: &'static str,
    message: String,
    code: u16,
}

/// Error envelope for failed sensor retrieval
#[derive(Serialize)]
struct SensorErrorResponse {
    status: &'static str,
    message: &'static str,
    error: String,
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Unknown route or sensor id
    NotFound(String),
    /// Readings could not be produced
    SensorData(String),
}

impl From<SimulatorError> for ApiError {
    fn from(e: SimulatorError) -> Self {
        match e {
            SimulatorError::NotFound(_) => ApiError::NotFound(e.to_string()),
            SimulatorError::GenerationFailure { .. } => ApiError::SensorData(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(CodedErrorResponse {
                    status: "error",
                    message,
                    code: StatusCode::NOT_FOUND.as_u16(),
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::SensorData(error) => {
                error!(error = %error, "Error retrieving sensor data");
                let body = Json(SensorErrorResponse {
                    status: "error",
                    message: "Failed to retrieve sensor data",
                    error,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}

/// Generic 500 envelope
pub fn internal_error() -> Response {
    let body = Json(CodedErrorResponse {
        status: "error",
        message: "Internal server error".to_string(),
        code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

/// Convert a handler panic into the generic 500 envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Unhandled error in request handler");
    internal_error()
}
