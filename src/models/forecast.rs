use serde::{Deserialize, Serialize};

/// Per-request site description for the inference path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub tilt_angle: f64,
    /// 180 = south-facing
    pub azimuth_angle: f64,
    /// Optional IANA timezone (e.g. "Asia/Kolkata")
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub predicted_power_watts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPrediction {
    /// Local timestamp (RFC 3339 with offset)
    pub hour: String,
    pub predicted_power_watts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
    pub hourly_forecast: Vec<HourlyPrediction>,
    pub total_kwh_predicted: f64,
}
