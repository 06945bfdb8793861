use approx::assert_relative_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;

use pv_forecast::models::power::{IrradianceComponents, SolarPosition};
use pv_forecast::models::site::{Location, PanelConfiguration, TimePoint};
use pv_forecast::models::weather::WeatherSample;
use pv_forecast::services::dataset::{self, TrainingSite};
use pv_forecast::services::forecast_service::{self, ForecastHour};
use pv_forecast::services::{features, irradiance, power_model, solar_algorithm};

fn delhi() -> Location {
    Location::new(28.7041, 77.1025, Kolkata).unwrap()
}

fn delhi_panel() -> PanelConfiguration {
    PanelConfiguration::for_latitude(28.7041).with_orientation(28.7, 180.0)
}

fn june_21(hour: u32) -> TimePoint {
    TimePoint::from_local(Kolkata, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(), hour).unwrap()
}

#[test]
fn delhi_clear_noon_produces_power() {
    let loc = delhi();
    let panel = delhi_panel();
    let sun = solar_algorithm::sun_state(&loc, &june_21(12));
    let irr = irradiance::irradiance_sample(&sun, 0.0, &panel);
    let power = power_model::evaluate(irr.poa.global, 35.0, 2.0, &panel, &sun.position);

    assert!(sun.position.elevation_deg > 0.0);
    assert!(irr.effective.ghi > 0.0);
    assert!(power.ac_power_w > 0.0);
    assert!(power.ac_power_w <= power.dc_power_w);
}

#[test]
fn delhi_midnight_is_exactly_zero() {
    let loc = delhi();
    let panel = delhi_panel();
    let sun = solar_algorithm::sun_state(&loc, &june_21(0));
    let irr = irradiance::irradiance_sample(&sun, 0.0, &panel);
    let power = power_model::evaluate(irr.poa.global, 30.0, 2.0, &panel, &sun.position);

    assert!(sun.position.elevation_deg < 0.0);
    assert_eq!(irr.effective.ghi, 0.0);
    assert_eq!(irr.poa.global, 0.0);
    assert_eq!(power.ac_power_w, 0.0);
}

#[test]
fn flat_100_watt_forecast_totals_2_4_kwh() {
    let loc = delhi();
    let panel = delhi_panel();
    let hours: Vec<ForecastHour> = (0..24)
        .map(|h| ForecastHour {
            time: june_21(h),
            weather: WeatherSample::new(30.0, 32.0, 3.0),
        })
        .collect();
    let forecast = forecast_service::aggregate(&hours, &loc, &panel, |batch| vec![100.0; batch.len()]);
    assert_eq!(forecast.hourly_forecast.len(), 24);
    assert_eq!(forecast.total_kwh_predicted, 2.4);
}

#[test]
fn max_cloud_cover_at_noon() {
    let clear = IrradianceComponents { dni: 900.0, dhi: 100.0, ghi: 1000.0 };
    let noon = SolarPosition { zenith_deg: 5.0, elevation_deg: 85.0, azimuth_deg: 180.0 };
    let eff = irradiance::attenuate(&clear, 95.0, &noon);
    assert_relative_eq!(eff.ghi, 136.36, epsilon = 0.01);
}

#[test]
fn training_and_inference_features_agree() {
    let loc = delhi();
    let site = TrainingSite {
        city: "Delhi".to_string(),
        state: "Delhi".to_string(),
        location: loc,
        panel: PanelConfiguration::for_latitude(loc.latitude()),
    };
    let rows = dataset::generate_site_year(&site, 2024).unwrap();

    for row in rows.iter().step_by(97) {
        let time = TimePoint::from_utc(row.timestamp.with_timezone(&Utc), Kolkata);
        let weather = WeatherSample::new(row.cloud_cover_percent, row.temperature_c, row.wind_speed_mps);
        let inferred = features::from_observation(&time, &loc, &site.panel, &weather);
        assert_eq!(inferred, row.features(), "mismatch at {}", row.timestamp);
    }
}

#[test]
fn power_is_never_negative_across_a_noisy_year() {
    let loc = Location::new(60.17, 24.94, chrono_tz::Europe::Helsinki).unwrap();
    let site = TrainingSite {
        city: "Helsinki".to_string(),
        state: "Uusimaa".to_string(),
        location: loc,
        panel: PanelConfiguration::for_latitude(loc.latitude()),
    };
    let rows = dataset::generate_site_year(&site, 2023).unwrap();
    assert_eq!(rows.len(), 8760);
    assert!(rows.iter().all(|r| r.power_output_w >= 0.0 && r.power_output_w.is_finite()));
}

#[test]
fn coordinates_alone_resolve_the_training_timezone() {
    let resolved = Location::resolve(28.7041, 77.1025, None).unwrap();
    assert_eq!(resolved.timezone(), Kolkata);

    // 12:00 IST
    let at = Utc.with_ymd_and_hms(2024, 6, 21, 6, 30, 0).unwrap();
    let panel = delhi_panel();
    let weather = WeatherSample::new(20.0, 34.0, 2.5);
    let inferred = features::from_observation(&TimePoint::from_utc(at, resolved.timezone()), &resolved, &panel, &weather);
    let training = features::from_observation(&TimePoint::from_utc(at, Kolkata), &delhi(), &panel, &weather);
    assert_eq!(inferred.hour_of_day, 12);
    assert_eq!(inferred, training);
}
