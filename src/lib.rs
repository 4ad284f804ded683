// Sensor records and the built-in catalog
pub mod sensor;

// Reading generator
pub mod simulator;

// Configuration file and environment overrides
pub mod config;

// HTTP API
pub mod api;
