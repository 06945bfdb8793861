pub mod dataset;
pub mod features;
pub mod forecast_service;
pub mod irradiance;
pub mod power_model;
pub mod regressor;
pub mod solar_algorithm;
pub mod timezone;
pub mod weather_synth;
