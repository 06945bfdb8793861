//! Photovoltaic power estimation core.
//!
//! Two pipelines share one set of physical models:
//!  - training: a year of synthetic hourly weather per site, simulated panel
//!    output and the model features, exported as CSV
//!  - inference: observed or forecast weather turned into the same features
//!    and scored by an injected regression model

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use errors::{PvError, Result};
