use serde::{Deserialize, Serialize};

use crate::errors::{PvError, Result};

/// Normalized weather conditions for one hour, the only weather shape the
/// estimation core consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Cloud cover (%), 0–100
    pub cloud_cover_pct: f64,
    /// Ambient 2 m air temperature (°C)
    pub temperature_c: f64,
    /// Wind speed (m/s), non-negative
    pub wind_speed_m_s: f64,
}

impl WeatherSample {
    pub fn new(cloud_cover_pct: f64, temperature_c: f64, wind_speed_m_s: f64) -> Self {
        Self {
            cloud_cover_pct,
            temperature_c,
            wind_speed_m_s,
        }
    }
}

/// Observed or forecast conditions where any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedWeather {
    pub cloud_cover_pct: Option<f64>,
    pub temperature_c: Option<f64>,
    pub wind_speed_m_s: Option<f64>,
}

impl ObservedWeather {
    /// Missing cloud cover degrades to a clear sky (no attenuation); missing
    /// temperature or wind speed cannot be substituted and is reported.
    pub fn into_sample(self) -> Result<WeatherSample> {
        let temperature_c = self
            .temperature_c
            .ok_or(PvError::MissingWeatherField("temperature"))?;
        let wind_speed_m_s = self
            .wind_speed_m_s
            .ok_or(PvError::MissingWeatherField("wind_speed"))?;
        Ok(WeatherSample {
            cloud_cover_pct: self.cloud_cover_pct.unwrap_or(0.0),
            temperature_c,
            wind_speed_m_s,
        })
    }
}

// ─── Upstream wire types ─────────────────────────────────────────────────────
// Response shapes of the current-conditions and hourly-forecast endpoints
// (metric units). Only the fields the core needs are declared.

#[derive(Debug, Deserialize)]
pub struct CurrentConditionsResponse {
    pub main: Option<MainBlock>,
    pub wind: Option<WindBlock>,
    pub clouds: Option<CloudsBlock>,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    pub speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CloudsBlock {
    pub all: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyForecastResponse {
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HourlyEntry {
    /// Unix timestamp (s, UTC)
    pub dt: i64,
    pub temp: Option<f64>,
    pub wind_speed: Option<f64>,
    pub clouds: Option<f64>,
}

impl From<&CurrentConditionsResponse> for ObservedWeather {
    fn from(resp: &CurrentConditionsResponse) -> Self {
        Self {
            cloud_cover_pct: resp.clouds.as_ref().and_then(|c| c.all),
            temperature_c: resp.main.as_ref().and_then(|m| m.temp),
            wind_speed_m_s: resp.wind.as_ref().and_then(|w| w.speed),
        }
    }
}

impl From<&HourlyEntry> for ObservedWeather {
    fn from(entry: &HourlyEntry) -> Self {
        Self {
            cloud_cover_pct: entry.clouds,
            temperature_c: entry.temp,
            wind_speed_m_s: entry.wind_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cloud_cover_means_clear_sky() {
        let obs = ObservedWeather {
            cloud_cover_pct: None,
            temperature_c: Some(31.0),
            wind_speed_m_s: Some(2.5),
        };
        let sample = obs.into_sample().unwrap();
        assert_eq!(sample.cloud_cover_pct, 0.0);
        assert_eq!(sample.temperature_c, 31.0);
    }

    #[test]
    fn test_missing_temperature_is_reported() {
        let obs = ObservedWeather {
            cloud_cover_pct: Some(40.0),
            temperature_c: None,
            wind_speed_m_s: Some(2.5),
        };
        let err = obs.into_sample().unwrap_err();
        assert!(matches!(err, PvError::MissingWeatherField("temperature")));
    }

    #[test]
    fn test_current_conditions_payload() {
        let json = r#"{
            "coord": {"lon": 77.1, "lat": 28.7},
            "main": {"temp": 34.2, "humidity": 40},
            "wind": {"speed": 3.1, "deg": 270},
            "clouds": {"all": 20}
        }"#;
        let resp: CurrentConditionsResponse = serde_json::from_str(json).unwrap();
        let sample = ObservedWeather::from(&resp).into_sample().unwrap();
        assert_eq!(sample, WeatherSample::new(20.0, 34.2, 3.1));
    }

    #[test]
    fn test_hourly_payload_without_wind() {
        let json = r#"{"hourly": [{"dt": 1718946000, "temp": 35.0, "clouds": 10}]}"#;
        let resp: HourlyForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.hourly.len(), 1);
        let err = ObservedWeather::from(&resp.hourly[0]).into_sample().unwrap_err();
        assert!(matches!(err, PvError::MissingWeatherField("wind_speed")));
    }
}
