use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod catalog;

pub use catalog::{default_catalog, validate_catalog, CatalogError};

/// Physical quantity a sensor measures.
///
/// Unknown type names are kept as `Other` so catalogs can carry sensors
/// the value model has no dedicated branch for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensorType {
    Temperature,
    Humidity,
    Pressure,
    AirQuality,
    Other(String),
}

impl SensorType {
    pub fn as_str(&self) -> &str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Humidity => "humidity",
            SensorType::Pressure => "pressure",
            SensorType::AirQuality => "air_quality",
            SensorType::Other(name) => name,
        }
    }
}

impl From<String> for SensorType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "temperature" => SensorType::Temperature,
            "humidity" => SensorType::Humidity,
            "pressure" => SensorType::Pressure,
            "air_quality" => SensorType::AirQuality,
            _ => SensorType::Other(name),
        }
    }
}

impl From<SensorType> for String {
    fn from(sensor_type: SensorType) -> Self {
        sensor_type.as_str().to_string()
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one sensor in the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorDefinition {
    /// Stable key (e.g., "TEMP_001")
    pub id: String,

    /// Display name
    pub name: String,

    /// Display location (e.g., "Living Room")
    pub location: String,

    #[serde(rename = "type")]
    pub sensor_type: SensorType,

    /// Display unit (e.g., "°C", "hPa")
    pub unit: String,

    /// Lower clamp bound
    pub min_value: f64,

    /// Upper clamp bound
    pub max_value: f64,

    /// Center point the value model drifts around
    pub base_value: f64,
}

/// Status band derived from a reading's value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
    /// Value could not be generated
    Error,
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
            SensorStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// One generated, classified, timestamped value for a sensor.
///
/// Failed readings carry `value: None`, `status: Error` and the failure
/// message in `error`; they have no `last_updated`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub value: Option<f64>,
    pub unit: String,
    pub location: String,
    pub status: SensorStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SensorReading {
    /// Successful reading for `definition`
    pub fn new(
        definition: &SensorDefinition,
        value: f64,
        status: SensorStatus,
        timestamp: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            sensor_type: definition.sensor_type.clone(),
            value: Some(value),
            unit: definition.unit.clone(),
            location: definition.location.clone(),
            status,
            timestamp,
            last_updated: Some(last_updated),
            error: None,
        }
    }

    /// Degraded reading for a sensor whose generation failed
    pub fn failed(
        definition: &SensorDefinition,
        error: impl fmt::Display,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            sensor_type: definition.sensor_type.clone(),
            value: None,
            unit: definition.unit.clone(),
            location: definition.location.clone(),
            status: SensorStatus::Error,
            timestamp,
            last_updated: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == SensorStatus::Error
    }
}
