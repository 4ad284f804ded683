use super::*;
use crate::sensor::{default_catalog, SensorStatus, SensorType};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn sensor(id: &str) -> SensorDefinition {
    default_catalog()
        .into_iter()
        .find(|s| s.id == id)
        .unwrap()
}

fn custom(sensor_type: SensorType, min: f64, max: f64, base: f64) -> SensorDefinition {
    SensorDefinition {
        id: "CUSTOM_001".to_string(),
        name: "Custom".to_string(),
        location: "Lab".to_string(),
        sensor_type,
        unit: "u".to_string(),
        min_value: min,
        max_value: max,
        base_value: base,
    }
}

fn has_two_decimals(value: f64) -> bool {
    ((value * 100.0).round() - value * 100.0).abs() < 1e-6
}

#[test]
fn test_generated_values_stay_within_bounds() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(7);

    for sensor in default_catalog() {
        for day in [1, 8, 15, 23, 31] {
            for hour in 0..24 {
                for _ in 0..50 {
                    let value = model.generate(&sensor, &at(day, hour), &mut rng).unwrap();
                    assert!(
                        sensor.min_value <= value && value <= sensor.max_value,
                        "{} produced {} outside [{}, {}]",
                        sensor.id,
                        value,
                        sensor.min_value,
                        sensor.max_value
                    );
                    assert!(has_two_decimals(value), "{} not rounded", value);
                }
            }
        }
    }
}

#[test]
fn test_clamping_with_narrow_bounds() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(1);
    let narrow = custom(SensorType::Humidity, 44.9, 45.1, 45.0);

    for _ in 0..500 {
        let value = model.generate(&narrow, &at(1, 6), &mut rng).unwrap();
        assert!((44.9..=45.1).contains(&value));
    }
}

#[test]
fn test_temperature_follows_hour_of_day() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(42);
    let living_room = sensor("TEMP_001");

    // hour 6: sin(pi/2) = 1 -> 22 + 3 +/- 1.5
    for _ in 0..200 {
        let value = model.generate(&living_room, &at(10, 6), &mut rng).unwrap();
        assert!((23.5..=26.5).contains(&value), "got {}", value);
    }

    // hour 18: sin(3pi/2) = -1 -> 22 - 3 +/- 1.5, clamped at 18
    for _ in 0..200 {
        let value = model.generate(&living_room, &at(10, 18), &mut rng).unwrap();
        assert!((18.0..=20.5).contains(&value), "got {}", value);
    }
}

#[test]
fn test_humidity_moves_against_temperature() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(3);
    let humidity = sensor("HUM_001");

    // hour 6: 45 - 2 +/- 5
    for _ in 0..200 {
        let value = model.generate(&humidity, &at(10, 6), &mut rng).unwrap();
        assert!((38.0..=48.0).contains(&value), "got {}", value);
    }
}

#[test]
fn test_pressure_ignores_hour_of_day() {
    let model = ValueModel::default();
    let pressure = sensor("PRES_001");

    for seed in 0..20 {
        let morning = model
            .generate(&pressure, &at(12, 3), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let evening = model
            .generate(&pressure, &at(12, 15), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(morning, evening);
    }
}

#[test]
fn test_pressure_follows_day_of_month() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(11);
    let pressure = sensor("PRES_001");

    // day 7: 10 * sin(7pi/15) ~= 9.95
    for _ in 0..200 {
        let value = model.generate(&pressure, &at(7, 0), &mut rng).unwrap();
        assert!((1018.0..=1028.3).contains(&value), "got {}", value);
    }
}

#[test]
fn test_air_quality_spike_frequency() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let air = sensor("AQ_001");
    let draws = 100_000;

    // Without a spike the value is at most 25 + 5; with one it is at least 25 + 20 - 5
    let spikes = (0..draws)
        .map(|_| model.generate(&air, &at(1, 0), &mut rng).unwrap())
        .filter(|v| *v >= 40.0)
        .count();

    let ratio = spikes as f64 / draws as f64;
    assert!((0.04..=0.06).contains(&ratio), "spike ratio {}", ratio);
}

#[test]
fn test_air_quality_spike_probability_extremes() {
    let mut rng = StdRng::seed_from_u64(5);
    let air = sensor("AQ_001");

    let never = ValueModel::new(0.0);
    let always = ValueModel::new(1.0);
    for _ in 0..1000 {
        assert!(never.generate(&air, &at(1, 0), &mut rng).unwrap() <= 30.0);
        assert!(always.generate(&air, &at(1, 0), &mut rng).unwrap() >= 40.0);
    }
}

#[test]
fn test_other_type_uses_small_noise() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(9);
    let lux = custom(SensorType::Other("lux".to_string()), 0.0, 1000.0, 300.0);

    for hour in 0..24 {
        let value = model.generate(&lux, &at(1, hour), &mut rng).unwrap();
        assert!((298.0..=302.0).contains(&value), "got {}", value);
    }
}

#[test]
fn test_generate_rejects_inverted_bounds() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(0);
    let broken = custom(SensorType::Temperature, 30.0, 10.0, 20.0);

    let err = model.generate(&broken, &at(1, 0), &mut rng).unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::GenerationFailure { ref sensor_id, .. } if sensor_id == "CUSTOM_001"
    ));
}

#[test]
fn test_generate_rejects_non_finite_value() {
    let model = ValueModel::default();
    let mut rng = StdRng::seed_from_u64(0);
    let broken = custom(SensorType::Pressure, 0.0, 10.0, f64::NAN);

    assert!(matches!(
        model.generate(&broken, &at(1, 0), &mut rng),
        Err(SimulatorError::GenerationFailure { .. })
    ));
}

#[test]
fn test_classify_temperature() {
    let temp = sensor("TEMP_001");

    assert_eq!(classify(&temp, 22.0), SensorStatus::Normal);
    assert_eq!(classify(&temp, 29.0), SensorStatus::Warning);
    assert_eq!(classify(&temp, 31.0), SensorStatus::Critical);
    assert_eq!(classify(&temp, 17.0), SensorStatus::Warning);
    assert_eq!(classify(&temp, 15.9), SensorStatus::Critical);
    // Band edges are inclusive on the calmer side
    assert_eq!(classify(&temp, 18.0), SensorStatus::Normal);
    assert_eq!(classify(&temp, 28.0), SensorStatus::Normal);
    assert_eq!(classify(&temp, 30.0), SensorStatus::Warning);
    assert_eq!(classify(&temp, 16.0), SensorStatus::Warning);
}

#[test]
fn test_classify_humidity() {
    let t = SensorType::Humidity;

    assert_eq!(classify_type(&t, 50.0), SensorStatus::Normal);
    assert_eq!(classify_type(&t, 28.0), SensorStatus::Warning);
    assert_eq!(classify_type(&t, 72.0), SensorStatus::Warning);
    assert_eq!(classify_type(&t, 24.0), SensorStatus::Critical);
    assert_eq!(classify_type(&t, 76.0), SensorStatus::Critical);
}

#[test]
fn test_classify_pressure() {
    let t = SensorType::Pressure;

    assert_eq!(classify_type(&t, 1013.25), SensorStatus::Normal);
    assert_eq!(classify_type(&t, 995.0), SensorStatus::Warning);
    assert_eq!(classify_type(&t, 1022.0), SensorStatus::Warning);
    assert_eq!(classify_type(&t, 985.0), SensorStatus::Critical);
    assert_eq!(classify_type(&t, 1026.0), SensorStatus::Critical);
}

#[test]
fn test_classify_air_quality_and_other() {
    let aq = SensorType::AirQuality;

    assert_eq!(classify_type(&aq, 0.0), SensorStatus::Normal);
    assert_eq!(classify_type(&aq, 50.0), SensorStatus::Normal);
    assert_eq!(classify_type(&aq, 75.0), SensorStatus::Warning);
    assert_eq!(classify_type(&aq, 100.0), SensorStatus::Warning);
    assert_eq!(classify_type(&aq, 120.0), SensorStatus::Critical);

    let other = SensorType::Other("lux".to_string());
    assert_eq!(classify_type(&other, -1e9), SensorStatus::Normal);
    assert_eq!(classify_type(&other, 1e9), SensorStatus::Normal);
}

#[test]
fn test_reading_for_unknown_sensor() {
    let simulator = SensorSimulator::new(default_catalog());

    assert_eq!(
        simulator.reading_for("NOPE_999"),
        Err(SimulatorError::NotFound("NOPE_999".to_string()))
    );
}

#[test]
fn test_last_updated_initialized_for_every_sensor() {
    let before = Utc::now();
    let simulator = SensorSimulator::new(default_catalog());

    for sensor in simulator.catalog() {
        let ts = simulator.last_updated(&sensor.id).unwrap();
        assert!(ts >= before);
    }
    assert_eq!(simulator.last_updated("NOPE_999"), None);
}

#[test]
fn test_reading_for_updates_last_updated() {
    let simulator = SensorSimulator::new(default_catalog());
    let previous = simulator.last_updated("HUM_002").unwrap();

    let reading = simulator.reading_for("HUM_002").unwrap();

    assert_eq!(reading.id, "HUM_002");
    assert_eq!(reading.sensor_type, SensorType::Humidity);
    assert_eq!(reading.unit, "%");
    assert!(reading.error.is_none());
    assert_eq!(reading.last_updated, Some(reading.timestamp));
    assert_eq!(simulator.last_updated("HUM_002"), Some(reading.timestamp));
    assert!(reading.timestamp >= previous);

    let value = reading.value.unwrap();
    assert!((35.0..=65.0).contains(&value));
    assert_eq!(reading.status, classify_type(&SensorType::Humidity, value));
}

#[test]
fn test_last_updated_never_moves_backwards() {
    let simulator = SensorSimulator::new(default_catalog());
    let mut rng = StdRng::seed_from_u64(1);
    let now = Utc::now() + Duration::seconds(60);

    simulator.reading_for_at("TEMP_002", now, &mut rng).unwrap();
    let earlier = now - Duration::seconds(30);
    let reading = simulator.reading_for_at("TEMP_002", earlier, &mut rng).unwrap();

    assert_eq!(reading.timestamp, earlier);
    assert_eq!(reading.last_updated, Some(now));
    assert_eq!(simulator.last_updated("TEMP_002"), Some(now));
}

#[test]
fn test_all_readings_match_catalog_order() {
    let simulator = SensorSimulator::new(default_catalog());

    let readings = simulator.all_readings();

    assert_eq!(readings.len(), simulator.catalog().len());
    for (reading, sensor) in readings.iter().zip(simulator.catalog()) {
        assert_eq!(reading.id, sensor.id);
        assert!(!reading.is_error());
        let value = reading.value.unwrap();
        assert!(sensor.min_value <= value && value <= sensor.max_value);
    }
}

#[test]
fn test_all_readings_isolates_failing_sensor() {
    let mut catalog = default_catalog();
    catalog.insert(2, custom(SensorType::Temperature, 30.0, 10.0, 20.0));
    let simulator = SensorSimulator::new(catalog);
    let initial = simulator.last_updated("CUSTOM_001").unwrap();

    let readings = simulator.all_readings_with(&mut StdRng::seed_from_u64(4));

    assert_eq!(readings.len(), 7);
    assert_eq!(readings[2].id, "CUSTOM_001");
    assert_eq!(readings[2].status, SensorStatus::Error);
    assert_eq!(readings[2].value, None);
    assert!(readings[2].error.as_deref().unwrap().contains("invalid bounds"));
    assert_eq!(simulator.last_updated("CUSTOM_001"), Some(initial));

    let healthy = readings.iter().filter(|r| !r.is_error()).count();
    assert_eq!(healthy, 6);
}

#[test]
fn test_concurrent_readings() {
    let simulator = Arc::new(SensorSimulator::new(default_catalog()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let simulator = Arc::clone(&simulator);
            thread::spawn(move || {
                for _ in 0..50 {
                    let readings = simulator.all_readings();
                    assert_eq!(readings.len(), 6);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for sensor in simulator.catalog() {
        assert!(simulator.last_updated(&sensor.id).is_some());
    }
}
