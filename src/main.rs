use anyhow::{Context, Result};
use sensor_dashboard::api::{create_app, ENDPOINTS};
use sensor_dashboard::config::DashboardConfig;
use sensor_dashboard::simulator::SensorSimulator;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensor_dashboard=info,tower_http=info".into()),
        )
        .init();

    info!("Starting IoT Sensor Dashboard API...");

    let config = DashboardConfig::from_env().context("Failed to load configuration")?;

    let simulator = Arc::new(SensorSimulator::with_model(
        config.sensors.clone(),
        config.simulator.value_model(),
    ));
    info!(
        sensors = simulator.catalog().len(),
        spike_probability = config.simulator.spike_probability,
        "Sensor simulator initialized"
    );

    let app = create_app(simulator);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "HTTP server listening");

    info!("Available endpoints:");
    for (path, description) in ENDPOINTS {
        info!("  {} -> {}", path, description);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("IoT Sensor Dashboard API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
