use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{PvError, Result};
use crate::models::features::{FEATURE_COLUMNS, FeatureVector};

/// A trained power model: one prediction (W) per feature row.
///
/// Implementations are immutable once loaded and may be shared across
/// threads.
pub trait PowerRegressor: Send + Sync {
    fn predict(&self, batch: &[FeatureVector]) -> Vec<f64>;

    fn predict_one(&self, features: &FeatureVector) -> f64 {
        self.predict(std::slice::from_ref(features)).first().copied().unwrap_or(0.0)
    }

    /// Artifact identity, e.g. the file the model was loaded from.
    fn version(&self) -> &str;
}

/// Linear surrogate stored as JSON:
/// `{"version": "...", "intercept": 0.0, "coefficients": [10 numbers]}`
/// with coefficients in feature-column order.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressor {
    pub version: String,
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COLUMNS.len()],
}

impl LinearRegressor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| PvError::ModelUnavailable {
            path: PathBuf::from(path),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let model: Self = serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;
        info!("[MODEL] Loaded {} from {}", model.version, path.display());
        Ok(model)
    }
}

impl PowerRegressor for LinearRegressor {
    fn predict(&self, batch: &[FeatureVector]) -> Vec<f64> {
        batch
            .iter()
            .map(|fv| {
                fv.to_row()
                    .iter()
                    .zip(&self.coefficients)
                    .fold(self.intercept, |acc, (x, w)| acc + x * w)
            })
            .collect()
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_is_model_unavailable() {
        let err = LinearRegressor::load("/nonexistent/solar_power_model.json").unwrap_err();
        assert!(matches!(err, PvError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_linear_prediction() {
        let model: LinearRegressor = serde_json::from_str(
            r#"{"version": "test", "intercept": -5.0,
                "coefficients": [0, 0, 0, 0, 0, 0, 0.4, -1.0, 0, 0]}"#,
        )
        .unwrap();
        let fv = FeatureVector {
            hour_of_day: 12,
            day_of_year: 100,
            latitude: 20.0,
            longitude: 70.0,
            tilt_deg: 20.0,
            azimuth_deg: 180.0,
            ghi_w_m2: 1000.0,
            temperature_c: 35.0,
            cloud_cover_pct: 10.0,
            wind_speed_m_s: 2.0,
        };
        assert_eq!(model.predict_one(&fv), -5.0 + 400.0 - 35.0);
        assert_eq!(model.predict(&[fv, fv]).len(), 2);
    }
}
