use crate::models::features::FeatureVector;
use crate::models::site::{Location, PanelConfiguration, TimePoint};
use crate::models::weather::WeatherSample;
use crate::services::{irradiance, solar_algorithm};

/// Assembles the model input for one hour.
///
/// `ghi_w_m2` is the cloud-attenuated global horizontal irradiance, not the
/// plane-of-array value.
pub fn build(
    time: &TimePoint,
    location: &Location,
    panel: &PanelConfiguration,
    ghi_w_m2: f64,
    weather: &WeatherSample,
) -> FeatureVector {
    FeatureVector {
        hour_of_day: time.hour_of_day(),
        day_of_year: time.day_of_year(),
        latitude: location.latitude(),
        longitude: location.longitude(),
        tilt_deg: panel.tilt_deg,
        azimuth_deg: panel.azimuth_deg,
        ghi_w_m2: irradiance::non_negative(ghi_w_m2),
        temperature_c: weather.temperature_c,
        cloud_cover_pct: weather.cloud_cover_pct,
        wind_speed_m_s: weather.wind_speed_m_s,
    }
}

/// Inference-side features: GHI is derived from the sun and the observed
/// cloud cover through the same chain the training data uses.
pub fn from_observation(
    time: &TimePoint,
    location: &Location,
    panel: &PanelConfiguration,
    weather: &WeatherSample,
) -> FeatureVector {
    let sun = solar_algorithm::sun_state(location, time);
    let effective = irradiance::attenuate(&sun.clear_sky, weather.cloud_cover_pct, &sun.position);
    build(time, location, panel, effective.ghi, weather)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn delhi() -> Location {
        Location::new(28.7041, 77.1025, chrono_tz::Asia::Kolkata).unwrap()
    }

    #[test]
    fn test_noon_features() {
        let loc = delhi();
        let panel = PanelConfiguration::for_latitude(loc.latitude());
        let time = TimePoint::from_local(loc.timezone(), NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(), 12).unwrap();
        let weather = WeatherSample::new(0.0, 38.0, 2.0);
        let fv = from_observation(&time, &loc, &panel, &weather);
        assert_eq!(fv.hour_of_day, 12);
        assert_eq!(fv.day_of_year, 173);
        assert_eq!(fv.tilt_deg, 28.7041);
        assert!(fv.ghi_w_m2 > 0.0);
    }

    #[test]
    fn test_midnight_ghi_is_exactly_zero() {
        let loc = delhi();
        let panel = PanelConfiguration::for_latitude(loc.latitude());
        let time = TimePoint::from_local(loc.timezone(), NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(), 0).unwrap();
        let fv = from_observation(&time, &loc, &panel, &WeatherSample::new(0.0, 30.0, 1.0));
        assert_eq!(fv.ghi_w_m2, 0.0);
    }
}
