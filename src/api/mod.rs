// HTTP API for the dashboard frontend

mod error;
pub mod info;
pub mod sensors;

pub use error::{handle_panic, internal_error, not_found, ApiError};
pub use info::{create_info_router, ENDPOINTS, SERVICE_NAME};
pub use sensors::{create_sensors_router, SensorsAppState};

use crate::simulator::SensorSimulator;
use axum::{http::Method, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the complete application router.
///
/// Unmatched routes get the 404 envelope, handler panics the 500 envelope.
/// CORS is open so the dashboard can be served from any origin.
pub fn create_app(simulator: Arc<SensorSimulator>) -> Router {
    let sensors_state = Arc::new(SensorsAppState { simulator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    with_error_handling(
        create_info_router().merge(create_sensors_router(sensors_state)),
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors)
}

/// Attach the 404 fallback and panic-to-500 conversion to a router
pub fn with_error_handling(router: Router) -> Router {
    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
}
