//! Solar geometry and clear-sky irradiance.
//!
//! Algorithm pipeline:
//!  1. Solar geometry – fractional year, declination and equation of time
//!     (Spencer 1971), true solar time, hour angle, zenith and azimuth
//!  2. Atmospheric refraction – standard-atmosphere elevation correction
//!  3. Extraterrestrial irradiance – eccentricity-corrected solar constant
//!  4. Clear-sky model – Bird & Hulstrom simplified: DNI, DHI, GHI

use chrono::{Datelike, Timelike};
use std::f64::consts::PI;

use crate::models::power::{IrradianceComponents, SolarPosition, SunState};
use crate::models::site::{Location, TimePoint};

// ─── Physical constants ──────────────────────────────────────
const SC: f64 = 1361.0; // Solar constant W/m²
const DEG: f64 = PI / 180.0;

/// Refraction is only applied while the sun's upper limb can still be seen.
const REFRACTION_LIMIT_DEG: f64 = -0.83337;
const STANDARD_PRESSURE_HPA: f64 = 1010.0;
const STANDARD_TEMPERATURE_C: f64 = 10.0;

/// Apparent sun position and clear-sky irradiance for every time point.
pub fn evaluate(location: &Location, times: &[TimePoint]) -> Vec<SunState> {
    times.iter().map(|t| sun_state(location, t)).collect()
}

pub fn sun_state(location: &Location, time: &TimePoint) -> SunState {
    let position = solar_position(location, time);
    let clear_sky = clear_sky(&position, time);
    SunState { position, clear_sky }
}

/// Fractional year (radians) at the given instant, UTC based.
fn fractional_year(time: &TimePoint) -> (f64, f64) {
    let utc = time.utc();
    let doy = utc.ordinal() as f64;
    let ut_h = utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let b = 2.0 * PI * (doy - 1.0 + (ut_h - 12.0) / 24.0) / 365.0;
    (b, ut_h)
}

pub fn solar_position(location: &Location, time: &TimePoint) -> SolarPosition {
    let (b, ut_h) = fractional_year(time);

    // a) Declination (Spencer 1971, radians)
    let decl = 0.006918 - 0.399912 * b.cos() + 0.070257 * b.sin() - 0.006758 * (2.0 * b).cos()
        + 0.000907 * (2.0 * b).sin()
        - 0.002697 * (3.0 * b).cos()
        + 0.00148 * (3.0 * b).sin();

    // b) Equation of Time (minutes, Spencer 1971)
    let eot_min = 229.18
        * (0.000075 + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.04089 * (2.0 * b).sin());

    // c) True solar time (minutes) and hour angle (negative in the morning)
    let tst_min = ut_h * 60.0 + eot_min + 4.0 * location.longitude();
    let omega_deg = (tst_min / 4.0).rem_euclid(360.0) - 180.0;
    let omega = omega_deg * DEG;

    // d) Geometric zenith / elevation
    let lat = location.latitude() * DEG;
    let cos_zen = (lat.sin() * decl.sin() + lat.cos() * decl.cos() * omega.cos()).clamp(-1.0, 1.0);
    let zenith_rad = cos_zen.acos();
    let alpha_rad = PI / 2.0 - zenith_rad;
    let true_elevation_deg = alpha_rad / DEG;

    // e) Azimuth (degrees from North, clockwise)
    let denom = alpha_rad.cos() * lat.cos();
    let azimuth_deg = if denom.abs() > 1e-9 {
        let cos_az = (decl.sin() - alpha_rad.sin() * lat.sin()) / denom;
        let az_abs = cos_az.clamp(-1.0, 1.0).acos() / DEG;
        if omega_deg > 0.0 { 360.0 - az_abs } else { az_abs }
    } else if lat >= 0.0 {
        180.0
    } else {
        0.0
    };

    let elevation_deg = true_elevation_deg + refraction_correction(true_elevation_deg);

    SolarPosition {
        zenith_deg: 90.0 - elevation_deg,
        elevation_deg,
        azimuth_deg,
    }
}

/// Elevation correction (deg) for atmospheric refraction at standard
/// pressure and temperature.
pub fn refraction_correction(elevation_deg: f64) -> f64 {
    if elevation_deg < REFRACTION_LIMIT_DEG {
        return 0.0;
    }
    let arg = (elevation_deg + 10.3 / (elevation_deg + 5.11)) * DEG;
    (STANDARD_PRESSURE_HPA / 1010.0) * (283.0 / (273.0 + STANDARD_TEMPERATURE_C)) * 1.02
        / (60.0 * arg.tan())
}

/// Eccentricity-corrected extraterrestrial irradiance (W/m²).
pub fn extraterrestrial_irradiance(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 1.0) / 365.0;
    SC * (1.00011 + 0.034221 * b.cos() + 0.00128 * b.sin() + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin())
}

/// Kasten & Young (1989) relative air mass from apparent elevation.
pub fn air_mass(elevation_deg: f64) -> f64 {
    let sin_alpha = (elevation_deg * DEG).sin();
    (1.0 / (sin_alpha + 0.50572 * (elevation_deg + 6.07995_f64).powf(-1.6364))).max(1.0)
}

/// Clear-sky irradiance from the simplified Bird & Hulstrom model. Zero
/// while the sun is below the horizon.
pub fn clear_sky(position: &SolarPosition, time: &TimePoint) -> IrradianceComponents {
    let alpha_deg = position.elevation_deg;
    if alpha_deg <= 0.0 {
        return IrradianceComponents::ZERO;
    }
    let sin_alpha = (alpha_deg * DEG).sin();
    let e0 = extraterrestrial_irradiance(time.utc().ordinal());
    let am = air_mass(alpha_deg);

    // Rayleigh
    let tr = (-0.0903 * am.powf(0.84) * (1.0 + am - am.powf(1.01))).exp();
    // Ozone (standard column 0.3 atm-cm)
    let to = 1.0 - 0.0013 * am;
    // Aerosol (Linke turbidity 3.0 – typical continental)
    let tk = 3.0_f64;
    let ta = (-0.09 * tk.powf(0.978) * am.powf(0.9455)).exp();
    // Water vapour (precipitable water 1.5 cm)
    let tw = 1.0 - 0.0075 * am.powf(0.65);

    let total_t = tr * to * ta * tw;
    let dni = (0.9762 * e0 * total_t).max(0.0);
    // Diffuse (sky scatter + back-scatter)
    let dhi = (0.79 * e0 * sin_alpha * (1.0 - total_t) * (0.5 * (1.0 - tr) + ba_scatter_coeff(ta))
        / (1.0 - am + am.powf(1.02)))
    .max(0.0);
    let ghi = (dni * sin_alpha + dhi).max(0.0);

    IrradianceComponents { dni, dhi, ghi }
}

// ─── Helper: back-scatter term for Bird diffuse ──────────────
#[inline]
fn ba_scatter_coeff(ta: f64) -> f64 {
    // Approximated from Bird (1981) Table 2
    0.5 * (0.92 - ta.ln().abs() / 10.0).clamp(0.2, 0.5)
}
