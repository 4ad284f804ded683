// Reading generator: sensor catalog, value model and last-update tracking

mod model;
#[cfg(test)]
mod tests;

pub use model::{classify, classify_type, ValueModel, DEFAULT_SPIKE_PROBABILITY};

use crate::sensor::{SensorDefinition, SensorReading};
use chrono::{DateTime, Local, Utc};
use dashmap::DashMap;
use rand::Rng;
use std::fmt;
use tracing::{debug, warn};

/// Produces simulated readings for a fixed sensor catalog.
///
/// The only mutable state is the per-sensor `last_updated` timestamp, kept in
/// a concurrent map so the simulator can be shared across request handlers.
pub struct SensorSimulator {
    /// Catalog in display order (fixed at construction)
    catalog: Vec<SensorDefinition>,

    /// sensor_id -> time of last successful reading
    last_updated: DashMap<String, DateTime<Utc>>,

    model: ValueModel,
}

impl SensorSimulator {
    /// Create a simulator with the default value model.
    ///
    /// Every sensor's `last_updated` starts at construction time.
    pub fn new(catalog: Vec<SensorDefinition>) -> Self {
        Self::with_model(catalog, ValueModel::default())
    }

    pub fn with_model(catalog: Vec<SensorDefinition>, model: ValueModel) -> Self {
        let started = Utc::now();
        let last_updated = catalog
            .iter()
            .map(|sensor| (sensor.id.clone(), started))
            .collect();

        Self {
            catalog,
            last_updated,
            model,
        }
    }

    pub fn catalog(&self) -> &[SensorDefinition] {
        &self.catalog
    }

    /// Look up a sensor definition by id
    pub fn definition(&self, sensor_id: &str) -> Option<&SensorDefinition> {
        self.catalog.iter().find(|sensor| sensor.id == sensor_id)
    }

    /// Time of the sensor's last successful reading
    pub fn last_updated(&self, sensor_id: &str) -> Option<DateTime<Utc>> {
        self.last_updated.get(sensor_id).map(|ts| *ts)
    }

    /// Generate a reading for one sensor (current time, thread-local RNG)
    pub fn reading_for(&self, sensor_id: &str) -> Result<SensorReading, SimulatorError> {
        self.reading_for_at(sensor_id, Utc::now(), &mut rand::thread_rng())
    }

    /// Generate a reading for one sensor at `now`.
    ///
    /// On success this is the single place `last_updated` is advanced.
    pub fn reading_for_at<R: Rng + ?Sized>(
        &self,
        sensor_id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<SensorReading, SimulatorError> {
        let sensor = self
            .definition(sensor_id)
            .ok_or_else(|| SimulatorError::NotFound(sensor_id.to_string()))?;

        let value = self
            .model
            .generate(sensor, &now.with_timezone(&Local), rng)?;
        let status = classify(sensor, value);
        let last_updated = self.touch(sensor_id, now);

        debug!(
            sensor_id = %sensor_id,
            value = value,
            status = %status,
            "Generated reading"
        );

        Ok(SensorReading::new(sensor, value, status, now, last_updated))
    }

    /// Generate readings for the whole catalog, in catalog order.
    ///
    /// A sensor that fails to generate is reported as an `error` reading;
    /// the rest of the batch is unaffected.
    pub fn all_readings(&self) -> Vec<SensorReading> {
        let mut rng = rand::thread_rng();
        self.all_readings_with(&mut rng)
    }

    pub fn all_readings_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SensorReading> {
        self.catalog
            .iter()
            .map(|sensor| {
                let now = Utc::now();
                match self.reading_for_at(&sensor.id, now, &mut *rng) {
                    Ok(reading) => reading,
                    Err(e) => {
                        warn!(sensor_id = %sensor.id, error = %e, "Sensor reading failed");
                        SensorReading::failed(sensor, &e, now)
                    }
                }
            })
            .collect()
    }

    /// Advance `last_updated` to `now`, never moving it backwards
    fn touch(&self, sensor_id: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut entry = self
            .last_updated
            .entry(sensor_id.to_string())
            .or_insert(now);
        if now > *entry {
            *entry = now;
        }
        *entry
    }
}

/// Reading generation errors
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// No sensor with this id in the catalog
    NotFound(String),
    /// Value computation failed for one sensor
    GenerationFailure { sensor_id: String, reason: String },
}

impl SimulatorError {
    pub(crate) fn generation(sensor_id: &str, reason: impl Into<String>) -> Self {
        SimulatorError::GenerationFailure {
            sensor_id: sensor_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::NotFound(id) => write!(f, "Sensor with ID '{}' not found", id),
            SimulatorError::GenerationFailure { sensor_id, reason } => {
                write!(f, "failed to generate value for sensor '{}': {}", sensor_id, reason)
            }
        }
    }
}

impl std::error::Error for SimulatorError {}
