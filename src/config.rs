use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;
use crate::models::site::{
    DEFAULT_ALBEDO, DEFAULT_AZIMUTH_DEG, DEFAULT_PANEL_AREA_M2, DEFAULT_PANEL_WATTAGE_STC,
    DEFAULT_SYSTEM_LOSS_FACTOR, DEFAULT_TEMPERATURE_COEFFICIENT_PCT, Location, PanelConfiguration,
};

fn default_year() -> i32 { 2024 }
fn default_output_path() -> String { "synthetic_solar_data_2024.csv".to_string() }
fn default_wattage() -> f64 { DEFAULT_PANEL_WATTAGE_STC }
fn default_temperature_coefficient() -> f64 { DEFAULT_TEMPERATURE_COEFFICIENT_PCT }
fn default_loss_factor() -> f64 { DEFAULT_SYSTEM_LOSS_FACTOR }
fn default_area() -> f64 { DEFAULT_PANEL_AREA_M2 }
fn default_azimuth() -> f64 { DEFAULT_AZIMUTH_DEG }
fn default_albedo() -> f64 { DEFAULT_ALBEDO }

/// Dataset generation run.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub panel: PanelTemplate,
    #[serde(default = "default_sites")]
    pub locations: Vec<SiteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            year: default_year(),
            output_path: default_output_path(),
            panel: PanelTemplate::default(),
            locations: default_sites(),
        }
    }
}

/// Panel constants shared by every site of a run. Without an explicit tilt
/// each site's array is tilted at its own latitude.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PanelTemplate {
    #[serde(default)]
    pub tilt_deg: Option<f64>,
    #[serde(default = "default_azimuth")]
    pub azimuth_deg: f64,
    #[serde(default = "default_wattage")]
    pub wattage_stc: f64,
    #[serde(default = "default_temperature_coefficient")]
    pub temperature_coefficient_pct: f64,
    #[serde(default = "default_loss_factor")]
    pub system_loss_factor: f64,
    #[serde(default = "default_area")]
    pub area_m2: f64,
    #[serde(default = "default_albedo")]
    pub albedo: f64,
}

impl Default for PanelTemplate {
    fn default() -> Self {
        Self {
            tilt_deg: None,
            azimuth_deg: default_azimuth(),
            wattage_stc: default_wattage(),
            temperature_coefficient_pct: default_temperature_coefficient(),
            system_loss_factor: default_loss_factor(),
            area_m2: default_area(),
            albedo: default_albedo(),
        }
    }
}

impl PanelTemplate {
    pub fn for_site(&self, latitude: f64) -> PanelConfiguration {
        PanelConfiguration {
            tilt_deg: self.tilt_deg.unwrap_or(latitude),
            azimuth_deg: self.azimuth_deg,
            rated_power_w: self.wattage_stc,
            temperature_coefficient_pct: self.temperature_coefficient_pct,
            system_loss_factor: self.system_loss_factor,
            area_m2: self.area_m2,
            albedo: self.albedo,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SiteConfig {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl SiteConfig {
    fn new(city: &str, state: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            city: city.to_string(),
            state: state.to_string(),
            latitude,
            longitude,
            timezone: Some("Asia/Kolkata".to_string()),
        }
    }

    pub fn location(&self) -> Result<Location> {
        Location::resolve(self.latitude, self.longitude, self.timezone.as_deref())
    }
}

/// Representative cities across India.
fn default_sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new("Delhi", "Delhi", 28.7041, 77.1025),
        SiteConfig::new("Mumbai", "Maharashtra", 19.0760, 72.8777),
        SiteConfig::new("Bangalore", "Karnataka", 12.9716, 77.5946),
        SiteConfig::new("Kolkata", "West Bengal", 22.5726, 88.3639),
        SiteConfig::new("Jaipur", "Rajasthan", 26.9124, 75.7873),
        SiteConfig::new("Chennai", "Tamil Nadu", 13.0827, 80.2707),
        SiteConfig::new("Bhopal", "Madhya Pradesh", 23.2599, 77.4126),
    ]
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"year": 2023}"#).unwrap();
        assert_eq!(config.year, 2023);
        assert_eq!(config.locations.len(), 7);
        assert_eq!(config.panel.wattage_stc, 450.0);
        assert_eq!(config.panel.for_site(19.076).tilt_deg, 19.076);
    }

    #[test]
    fn test_explicit_tilt_overrides_latitude() {
        let json = r#"{
            "panel": {"tilt_deg": 15.0, "azimuth_deg": 170.0},
            "locations": [{"city": "Perth", "state": "WA", "latitude": -31.95, "longitude": 115.86}]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let site = &config.locations[0];
        let panel = config.panel.for_site(site.latitude);
        assert_eq!(panel.tilt_deg, 15.0);
        assert_eq!(panel.azimuth_deg, 170.0);
        assert_eq!(panel.rated_power_w, 450.0);
        // no timezone given: resolved from coordinates
        assert_eq!(site.location().unwrap().timezone(), chrono_tz::Australia::Perth);
    }
}
