use serde::{Deserialize, Serialize};

/// Column names of the regression model's input, in model order.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "Hour_of_Day",
    "Day_of_Year",
    "Latitude",
    "Longitude",
    "Tilt_Angle",
    "Azimuth_Angle",
    "GHI_W_per_sq_m",
    "Temperature_C",
    "Cloud_Cover_Percent",
    "Wind_Speed_mps",
];

/// The input row of the power regression model.
///
/// Produced by the same builder on the training and the inference path so the
/// two always agree on units and semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub hour_of_day: u32,
    pub day_of_year: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
    /// Cloud-attenuated global horizontal irradiance (W/m²)
    pub ghi_w_m2: f64,
    pub temperature_c: f64,
    pub cloud_cover_pct: f64,
    pub wind_speed_m_s: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_COLUMNS`] order.
    pub fn to_row(&self) -> [f64; 10] {
        [
            f64::from(self.hour_of_day),
            f64::from(self.day_of_year),
            self.latitude,
            self.longitude,
            self.tilt_deg,
            self.azimuth_deg,
            self.ghi_w_m2,
            self.temperature_c,
            self.cloud_cover_pct,
            self.wind_speed_m_s,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_column_order() {
        let fv = FeatureVector {
            hour_of_day: 12,
            day_of_year: 173,
            latitude: 28.7,
            longitude: 77.1,
            tilt_deg: 28.7,
            azimuth_deg: 180.0,
            ghi_w_m2: 950.0,
            temperature_c: 38.0,
            cloud_cover_pct: 5.0,
            wind_speed_m_s: 2.0,
        };
        let row = fv.to_row();
        assert_eq!(row.len(), FEATURE_COLUMNS.len());
        assert_eq!(row[0], 12.0);
        assert_eq!(row[6], 950.0);
        assert_eq!(row[9], 2.0);
    }
}
