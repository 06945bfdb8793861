use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the estimation core.
///
/// Numeric anomalies inside the physical models (negative or NaN irradiance
/// and power) are never reported here; they are clamped to zero where they
/// occur.
#[derive(Debug, Error)]
pub enum PvError {
    #[error("invalid location: {field} = {value} is outside {range}")]
    InvalidLocation {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("weather sample is missing required field '{0}'")]
    MissingWeatherField(&'static str),

    #[error("regression model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("local time {0} does not exist in timezone {1}")]
    NonexistentLocalTime(String, String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PvError>;
