//! Synthetic hourly weather for training data.
//!
//! Each location gets its own reproducible random stream: the seed is the
//! 32-bit FNV-1a hash of the location name and the generator is PCG64, so the
//! same name always yields bit-identical weather on every platform and build.
//!
//! Draw order is fixed: one uniform per hour for clouds, then one normal per
//! hour for temperature, then one normal per hour for wind.

use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;
use std::f64::consts::PI;

use crate::models::power::SunState;
use crate::models::site::{Location, TimePoint};
use crate::models::weather::WeatherSample;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hours averaged to emulate cloud persistence.
const CLOUD_WINDOW_H: usize = 12;
/// Hours averaged to emulate gusts settling into a mean wind.
const WIND_WINDOW_H: usize = 6;

pub const CLOUD_MIN_PCT: f64 = 5.0;
pub const CLOUD_MAX_PCT: f64 = 95.0;
pub const NIGHT_CLOUD_PCT: f64 = 10.0;
const TEMPERATURE_NOISE_SIGMA_C: f64 = 1.5;

/// 32-bit FNV-1a over the UTF-8 bytes of `name`.
pub fn seed_from_name(name: &str) -> u32 {
    name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// One synthetic weather sample per time point.
///
/// `sun` must be aligned with `times`; it decides which hours are night.
pub fn synthesize(name: &str, location: &Location, times: &[TimePoint], sun: &[SunState]) -> Vec<WeatherSample> {
    debug_assert_eq!(times.len(), sun.len());
    let n = times.len();
    let mut rng = Pcg64::seed_from_u64(u64::from(seed_from_name(name)));

    let cloud_noise: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
    let temp_noise: Vec<f64> = (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
    let wind_noise: Vec<f64> = (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();

    let cloud_smoothed = centered_mean(&cloud_noise, CLOUD_WINDOW_H);
    let wind_smoothed = trailing_mean(&wind_noise, WIND_WINDOW_H);
    let base_temp = base_temperature(location.latitude());

    times
        .iter()
        .zip(sun)
        .enumerate()
        .map(|(i, (time, sun))| {
            let doy = f64::from(time.day_of_year());
            let hour = f64::from(time.hour_of_day());

            // ── Cloud cover ──
            let cloud_cover_pct = if sun.position.is_night() {
                NIGHT_CLOUD_PCT
            } else {
                (cloud_smoothed[i] * seasonal_cloud_factor(doy) * 150.0).clamp(CLOUD_MIN_PCT, CLOUD_MAX_PCT)
            };

            // ── Temperature ── trough at midnight-to-dawn, peak mid-afternoon
            let daily = -(2.0 * PI * hour / 24.0).cos() * 5.0;
            let seasonal = -(2.0 * PI * doy / 365.0).cos() * 8.0;
            let temperature_c = base_temp + seasonal + daily + temp_noise[i] * TEMPERATURE_NOISE_SIGMA_C;

            // ── Wind ──
            let wind_speed_m_s = (wind_smoothed[i] * 3.0 + 2.0).abs();

            WeatherSample {
                cloud_cover_pct,
                temperature_c,
                wind_speed_m_s,
            }
        })
        .collect()
}

/// Annual mean level, cooler away from the tropics.
pub fn base_temperature(latitude: f64) -> f64 {
    30.0 - (latitude - 15.0) * 0.5
}

/// Multiplier in [0.2, 0.6], peaking in early autumn.
pub fn seasonal_cloud_factor(day_of_year: f64) -> f64 {
    (2.0 * PI * (day_of_year - 150.0) / 365.0).sin() * 0.2 + 0.4
}

/// Moving average over `[i − w/2, i + w − w/2 − 1]`, shrunk at the edges.
fn centered_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let before = window / 2;
    let after = window - before;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = (i + after).min(n);
            mean(&values[start..end])
        })
        .collect()
}

/// Moving average over the last `window` values, partial at the start.
fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            mean(&values[start..=i])
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::solar_algorithm;
    use chrono::NaiveDate;

    fn week(location: &Location) -> (Vec<TimePoint>, Vec<SunState>) {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let times: Vec<TimePoint> = (0..7 * 24)
            .map(|h| {
                let date = start + chrono::Days::new(h / 24);
                TimePoint::from_local(location.timezone(), date, (h % 24) as u32).unwrap()
            })
            .collect();
        let sun = solar_algorithm::evaluate(location, &times);
        (times, sun)
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(seed_from_name(""), 0x811c_9dc5);
        assert_eq!(seed_from_name("a"), 0xe40c_292c);
        assert_eq!(seed_from_name("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_same_name_same_weather() {
        let loc = Location::new(19.076, 72.8777, chrono_tz::Asia::Kolkata).unwrap();
        let (times, sun) = week(&loc);
        let a = synthesize("Mumbai", &loc, &times, &sun);
        let b = synthesize("Mumbai", &loc, &times, &sun);
        assert_eq!(a, b);

        let c = synthesize("Chennai", &loc, &times, &sun);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cloud_cover_bounds_and_night_value() {
        let loc = Location::new(28.7041, 77.1025, chrono_tz::Asia::Kolkata).unwrap();
        let (times, sun) = week(&loc);
        let weather = synthesize("Delhi", &loc, &times, &sun);
        for (w, s) in weather.iter().zip(&sun) {
            assert!((CLOUD_MIN_PCT..=CLOUD_MAX_PCT).contains(&w.cloud_cover_pct));
            assert!(w.wind_speed_m_s >= 0.0);
            if s.position.is_night() {
                assert_eq!(w.cloud_cover_pct, NIGHT_CLOUD_PCT);
            }
        }
    }

    #[test]
    fn test_window_means() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let c = centered_mean(&v, 4);
        // window [i-2, i+1]
        assert_eq!(c[0], 1.5);
        assert_eq!(c[3], 3.5);
        assert_eq!(c[7], 7.0);
        let t = trailing_mean(&v, 3);
        assert_eq!(t[0], 1.0);
        assert_eq!(t[1], 1.5);
        assert_eq!(t[5], 5.0);
    }

    #[test]
    fn test_base_temperature_cooler_north() {
        assert_eq!(base_temperature(15.0), 30.0);
        assert!(base_temperature(40.0) < base_temperature(10.0));
    }
}
