use super::SimulatorError;
use crate::sensor::{SensorDefinition, SensorStatus, SensorType};
use chrono::{Datelike, Timelike};
use rand::Rng;
use std::f64::consts::PI;

/// Default chance that an air quality reading carries a pollution spike
pub const DEFAULT_SPIKE_PROBABILITY: f64 = 0.05;

/// Value model for simulated readings.
///
/// A reading is `base_value + drift + noise`, clamped to the sensor's bounds
/// and rounded to 2 decimals. Drift follows the local hour of day
/// (temperature, humidity) or day of month (pressure).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueModel {
    /// Probability in [0, 1] of an air quality spike per reading
    pub spike_probability: f64,
}

impl Default for ValueModel {
    fn default() -> Self {
        Self {
            spike_probability: DEFAULT_SPIKE_PROBABILITY,
        }
    }
}

impl ValueModel {
    pub fn new(spike_probability: f64) -> Self {
        Self { spike_probability }
    }

    /// Generate one value for `sensor` at wall-clock time `now`.
    ///
    /// Fails when the sensor's bounds are unusable (non-finite or inverted)
    /// or when the computed value is not a finite number.
    pub fn generate<T, R>(
        &self,
        sensor: &SensorDefinition,
        now: &T,
        rng: &mut R,
    ) -> Result<f64, SimulatorError>
    where
        T: Datelike + Timelike,
        R: Rng + ?Sized,
    {
        let (min, max) = (sensor.min_value, sensor.max_value);
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SimulatorError::generation(
                &sensor.id,
                format!("invalid bounds [{}, {}]", min, max),
            ));
        }

        let hour_factor = (PI * now.hour() as f64 / 12.0).sin();
        let base = sensor.base_value;

        let raw = match sensor.sensor_type {
            SensorType::Temperature => base + 3.0 * hour_factor + rng.gen_range(-1.5..=1.5),
            // Inverse of temperature
            SensorType::Humidity => base - 2.0 * hour_factor + rng.gen_range(-5.0..=5.0),
            SensorType::Pressure => {
                let trend = 10.0 * (PI * now.day() as f64 / 15.0).sin();
                base + trend + rng.gen_range(-5.0..=5.0)
            }
            SensorType::AirQuality => {
                let spike = if rng.gen::<f64>() < self.spike_probability {
                    rng.gen_range(20.0..=50.0)
                } else {
                    0.0
                };
                base + spike + rng.gen_range(-5.0..=5.0)
            }
            SensorType::Other(_) => base + rng.gen_range(-2.0..=2.0),
        };

        if !raw.is_finite() {
            return Err(SimulatorError::generation(
                &sensor.id,
                format!("computed value {} is not finite", raw),
            ));
        }

        // Rounding can step just past a bound with more than 2 decimals
        Ok(round2(raw.clamp(min, max)).clamp(min, max))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify a value into a status band for the sensor's type.
///
/// | type        | critical         | warning           |
/// |-------------|------------------|-------------------|
/// | temperature | < 16 or > 30     | < 18 or > 28      |
/// | humidity    | < 25 or > 75     | < 30 or > 70      |
/// | pressure    | < 990 or > 1025  | < 1000 or > 1020  |
/// | air_quality | > 100            | > 50              |
///
/// Anything else is `Normal`.
pub fn classify(sensor: &SensorDefinition, value: f64) -> SensorStatus {
    classify_type(&sensor.sensor_type, value)
}

pub fn classify_type(sensor_type: &SensorType, value: f64) -> SensorStatus {
    match sensor_type {
        SensorType::Temperature => banded(value, (16.0, 30.0), (18.0, 28.0)),
        SensorType::Humidity => banded(value, (25.0, 75.0), (30.0, 70.0)),
        SensorType::Pressure => banded(value, (990.0, 1025.0), (1000.0, 1020.0)),
        SensorType::AirQuality => {
            if value > 100.0 {
                SensorStatus::Critical
            } else if value > 50.0 {
                SensorStatus::Warning
            } else {
                SensorStatus::Normal
            }
        }
        SensorType::Other(_) => SensorStatus::Normal,
    }
}

/// Two-sided bands: outside `critical` is critical, outside `warning` is warning.
fn banded(value: f64, critical: (f64, f64), warning: (f64, f64)) -> SensorStatus {
    if value < critical.0 || value > critical.1 {
        SensorStatus::Critical
    } else if value < warning.0 || value > warning.1 {
        SensorStatus::Warning
    } else {
        SensorStatus::Normal
    }
}
