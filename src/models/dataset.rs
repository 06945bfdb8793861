use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::models::features::FeatureVector;

/// One exported training row: the feature columns, the ground-truth AC power
/// and the run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(rename = "Hour_of_Day")]
    pub hour_of_day: u32,
    #[serde(rename = "Day_of_Year")]
    pub day_of_year: u32,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Tilt_Angle")]
    pub tilt_angle: f64,
    #[serde(rename = "Azimuth_Angle")]
    pub azimuth_angle: f64,
    #[serde(rename = "Panel_Wattage_STC")]
    pub panel_wattage_stc: f64,
    #[serde(rename = "Panel_Area_sq_m")]
    pub panel_area_sq_m: f64,
    #[serde(rename = "System_Losses_Factor")]
    pub system_losses_factor: f64,
    #[serde(rename = "GHI_W_per_sq_m")]
    pub ghi_w_per_sq_m: f64,
    #[serde(rename = "Temperature_C")]
    pub temperature_c: f64,
    #[serde(rename = "Cloud_Cover_Percent")]
    pub cloud_cover_percent: f64,
    #[serde(rename = "Wind_Speed_mps")]
    pub wind_speed_mps: f64,
    /// Plane-of-array irradiance (W/m²)
    #[serde(rename = "Effective_Irradiance")]
    pub effective_irradiance: f64,
    #[serde(rename = "Power_Output_W")]
    pub power_output_w: f64,
}

impl DatasetRow {
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            hour_of_day: self.hour_of_day,
            day_of_year: self.day_of_year,
            latitude: self.latitude,
            longitude: self.longitude,
            tilt_deg: self.tilt_angle,
            azimuth_deg: self.azimuth_angle,
            ghi_w_m2: self.ghi_w_per_sq_m,
            temperature_c: self.temperature_c,
            cloud_cover_pct: self.cloud_cover_percent,
            wind_speed_m_s: self.wind_speed_mps,
        }
    }
}
