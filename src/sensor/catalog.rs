use super::{SensorDefinition, SensorType};
use std::collections::HashSet;
use std::fmt;

/// Built-in sensor catalog, in display order
pub fn default_catalog() -> Vec<SensorDefinition> {
    vec![
        definition(
            "TEMP_001",
            "Living Room Temperature",
            SensorType::Temperature,
            "°C",
            "Living Room",
            (18.0, 28.0, 22.0),
        ),
        definition(
            "TEMP_002",
            "Bedroom Temperature",
            SensorType::Temperature,
            "°C",
            "Bedroom",
            (16.0, 26.0, 20.0),
        ),
        definition(
            "HUM_001",
            "Living Room Humidity",
            SensorType::Humidity,
            "%",
            "Living Room",
            (30.0, 70.0, 45.0),
        ),
        definition(
            "HUM_002",
            "Bedroom Humidity",
            SensorType::Humidity,
            "%",
            "Bedroom",
            (35.0, 65.0, 50.0),
        ),
        definition(
            "PRES_001",
            "Atmospheric Pressure",
            SensorType::Pressure,
            "hPa",
            "Outdoor",
            (980.0, 1030.0, 1013.25),
        ),
        definition(
            "AQ_001",
            "Air Quality Index",
            SensorType::AirQuality,
            "AQI",
            "Living Room",
            (0.0, 150.0, 25.0),
        ),
    ]
}

/// (min, max, base)
fn definition(
    id: &str,
    name: &str,
    sensor_type: SensorType,
    unit: &str,
    location: &str,
    (min_value, max_value, base_value): (f64, f64, f64),
) -> SensorDefinition {
    SensorDefinition {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        sensor_type,
        unit: unit.to_string(),
        min_value,
        max_value,
        base_value,
    }
}

/// Check a catalog before it is handed to the simulator.
///
/// Rules:
/// - At least one sensor
/// - Ids are non-empty and unique
/// - Bounds are finite and `min_value <= base_value <= max_value`
pub fn validate_catalog(catalog: &[SensorDefinition]) -> Result<(), CatalogError> {
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for sensor in catalog {
        if sensor.id.trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if !seen.insert(sensor.id.as_str()) {
            return Err(CatalogError::DuplicateId(sensor.id.clone()));
        }

        let bounds = [sensor.min_value, sensor.base_value, sensor.max_value];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(CatalogError::NonFiniteBounds(sensor.id.clone()));
        }
        if !(sensor.min_value <= sensor.base_value && sensor.base_value <= sensor.max_value) {
            return Err(CatalogError::InvalidBounds {
                id: sensor.id.clone(),
                min: sensor.min_value,
                base: sensor.base_value,
                max: sensor.max_value,
            });
        }
    }

    Ok(())
}

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Empty,
    EmptyId,
    DuplicateId(String),
    NonFiniteBounds(String),
    InvalidBounds {
        id: String,
        min: f64,
        base: f64,
        max: f64,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "sensor catalog is empty"),
            CatalogError::EmptyId => write!(f, "sensor id must not be empty"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate sensor id '{}'", id),
            CatalogError::NonFiniteBounds(id) => {
                write!(f, "sensor '{}' has non-finite bounds", id)
            }
            CatalogError::InvalidBounds { id, min, base, max } => write!(
                f,
                "sensor '{}' must satisfy min <= base <= max, got {} / {} / {}",
                id, min, base, max
            ),
        }
    }
}

impl std::error::Error for CatalogError {}
