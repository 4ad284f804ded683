use crate::sensor::{default_catalog, validate_catalog, SensorDefinition};
use crate::simulator::{ValueModel, DEFAULT_SPIKE_PROBABILITY};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Config file used when `DASHBOARD_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";

/// Complete dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    /// Sensor catalog; replaces the built-in one when present
    #[serde(default = "default_catalog")]
    pub sensors: Vec<SensorDefinition>,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Value model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Chance of an air quality spike per reading
    #[serde(default = "default_spike_probability")]
    pub spike_probability: f64,
}

fn default_spike_probability() -> f64 {
    DEFAULT_SPIKE_PROBABILITY
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            spike_probability: default_spike_probability(),
        }
    }
}

impl SimulatorConfig {
    pub fn value_model(&self) -> ValueModel {
        ValueModel::new(self.spike_probability)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            simulator: SimulatorConfig::default(),
            sensors: default_catalog(),
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration for the running process.
    ///
    /// Reads `DASHBOARD_CONFIG` (must exist when set), else `dashboard.toml`
    /// if present, else built-in defaults. `DASHBOARD_HOST` and
    /// `DASHBOARD_PORT` override the file.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("DASHBOARD_CONFIG") {
            Ok(path) => load_config(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
            Err(_) => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(
            std::env::var("DASHBOARD_HOST").ok(),
            std::env::var("DASHBOARD_PORT").ok(),
        );
        config.validate()?;

        Ok(config)
    }

    /// Apply host/port overrides. An unparsable port is ignored.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = port {
            match port.parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!(value = %port, "Ignoring invalid DASHBOARD_PORT"),
            }
        }
    }

    /// Check the catalog and simulator settings
    pub fn validate(&self) -> Result<()> {
        validate_catalog(&self.sensors).context("Invalid sensor catalog")?;

        let p = self.simulator.spike_probability;
        if !(0.0..=1.0).contains(&p) {
            bail!("simulator.spike_probability must be within [0, 1], got {}", p);
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<DashboardConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: DashboardConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {}", path))?;
    info!(path = %path, sensors = config.sensors.len(), "Configuration loaded");
    Ok(config)
}
