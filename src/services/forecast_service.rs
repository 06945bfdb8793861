//! Inference path: live and 24-hour predictions from observed weather.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::features::FeatureVector;
use crate::models::forecast::{ForecastResponse, HourlyPrediction, PredictionRequest};
use crate::models::site::{Location, PanelConfiguration, TimePoint};
use crate::models::weather::{HourlyForecastResponse, ObservedWeather, WeatherSample};
use crate::services::features;
use crate::services::irradiance::non_negative;
use crate::services::regressor::{LinearRegressor, PowerRegressor};

pub const MAX_FORECAST_HOURS: usize = 24;

/// One hour of forecast input.
#[derive(Debug, Clone, Copy)]
pub struct ForecastHour {
    pub time: TimePoint,
    pub weather: WeatherSample,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores up to 24 hours and sums them into energy.
///
/// The feature vectors of all hours are handed to `score` as one batch,
/// which must return one value per row. Each hourly value is treated as the
/// mean power over that hour, so the total is Σ W · 1 h / 1000 in kWh.
/// Fewer hours give a partial total.
pub fn aggregate<F>(
    hours: &[ForecastHour],
    location: &Location,
    panel: &PanelConfiguration,
    score: F,
) -> ForecastResponse
where
    F: FnOnce(&[FeatureVector]) -> Vec<f64>,
{
    let hours = &hours[..hours.len().min(MAX_FORECAST_HOURS)];
    let batch: Vec<FeatureVector> = hours
        .iter()
        .map(|h| features::from_observation(&h.time, location, panel, &h.weather))
        .collect();
    let watts = score(&batch);
    if watts.len() != batch.len() {
        warn!("[FORECAST] Model returned {} values for {} hours", watts.len(), batch.len());
    }

    // Hours the model left unscored count as zero
    let hourly_forecast: Vec<HourlyPrediction> = hours
        .iter()
        .enumerate()
        .map(|(i, h)| HourlyPrediction {
            hour: h.time.fixed_offset().to_rfc3339(),
            predicted_power_watts: round2(non_negative(watts.get(i).copied().unwrap_or(0.0))),
        })
        .collect();

    let total_wh: f64 = hourly_forecast.iter().map(|p| p.predicted_power_watts).sum();
    ForecastResponse {
        hourly_forecast,
        total_kwh_predicted: round2(total_wh / 1000.0),
    }
}

/// Owns the loaded regression model and answers prediction requests.
///
/// Construct once at startup and share; the model is never mutated.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn PowerRegressor>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn PowerRegressor>) -> Self {
        Self { model }
    }

    /// Loads a linear model artifact. Fails with `ModelUnavailable`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Arc::new(LinearRegressor::load(path)?)))
    }

    pub fn model_version(&self) -> &str {
        self.model.version()
    }

    fn site(request: &PredictionRequest) -> Result<(Location, PanelConfiguration)> {
        let location = Location::resolve(request.latitude, request.longitude, request.timezone.as_deref())?;
        let panel = PanelConfiguration::for_latitude(request.latitude)
            .with_orientation(request.tilt_angle, request.azimuth_angle);
        Ok((location, panel))
    }

    /// Instantaneous AC power (W) at `at` under the observed conditions.
    pub fn predict_now(
        &self,
        request: &PredictionRequest,
        weather: ObservedWeather,
        at: DateTime<Utc>,
    ) -> Result<f64> {
        let (location, panel) = Self::site(request)?;
        let sample = weather.into_sample()?;
        let time = TimePoint::from_utc(at, location.timezone());
        let fv = features::from_observation(&time, &location, &panel, &sample);
        let watts = non_negative(self.model.predict_one(&fv));
        debug!("[PREDICT] {} @ {} -> {:.2} W", location.timezone().name(), time.fixed_offset(), watts);
        Ok(watts)
    }

    /// Next-24-hour forecast. Hours with unusable timestamps or missing
    /// weather fields are skipped.
    pub fn predict_forecast(
        &self,
        request: &PredictionRequest,
        forecast: &HourlyForecastResponse,
    ) -> Result<ForecastResponse> {
        let (location, panel) = Self::site(request)?;
        let tz = location.timezone();

        let hours: Vec<ForecastHour> = forecast
            .hourly
            .iter()
            .take(MAX_FORECAST_HOURS)
            .filter_map(|entry| {
                let Some(time) = TimePoint::from_unix(entry.dt, tz) else {
                    warn!("[FORECAST] Skipping hour with invalid timestamp {}", entry.dt);
                    return None;
                };
                match ObservedWeather::from(entry).into_sample() {
                    Ok(weather) => Some(ForecastHour { time, weather }),
                    Err(e) => {
                        warn!("[FORECAST] Skipping hour {}: {}", time.fixed_offset(), e);
                        None
                    }
                }
            })
            .collect();

        Ok(aggregate(&hours, &location, &panel, |batch| self.model.predict(batch)))
    }
}
