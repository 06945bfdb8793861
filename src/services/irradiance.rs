//! Cloud attenuation and transposition onto the panel plane.

use std::f64::consts::PI;

use crate::models::power::{IrradianceComponents, IrradianceSample, PlaneOfArray, SolarPosition, SunState};
use crate::models::site::PanelConfiguration;

const DEG: f64 = PI / 180.0;

/// Fraction of clear-sky irradiance left under the given cloud cover (%).
///
/// Empirical curve the power model was trained against; keep it as is.
pub fn cloud_transmittance(cloud_cover_pct: f64) -> f64 {
    1.0 - cloud_cover_pct / 110.0
}

/// Non-negative, finite irradiance: NaN and negative values become 0.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Cloud-attenuated components. All zero while the sun is below the horizon.
pub fn attenuate(
    clear_sky: &IrradianceComponents,
    cloud_cover_pct: f64,
    position: &SolarPosition,
) -> IrradianceComponents {
    if position.is_night() {
        return IrradianceComponents::ZERO;
    }
    let k = cloud_transmittance(cloud_cover_pct);
    IrradianceComponents {
        dni: non_negative(clear_sky.dni * k),
        dhi: non_negative(clear_sky.dhi * k),
        ghi: non_negative(clear_sky.ghi * k),
    }
}

/// Cosine of the angle of incidence between the sun and the panel normal.
pub fn cos_angle_of_incidence(position: &SolarPosition, panel: &PanelConfiguration) -> f64 {
    let zen = position.zenith_deg * DEG;
    let tilt = panel.tilt_deg * DEG;
    let az_diff = (position.azimuth_deg - panel.azimuth_deg) * DEG;
    (zen.cos() * tilt.cos() + zen.sin() * tilt.sin() * az_diff.cos()).clamp(-1.0, 1.0)
}

/// Isotropic-sky transposition: beam on the plane, uniform sky diffuse and
/// ground-reflected light.
pub fn plane_of_array(
    effective: &IrradianceComponents,
    position: &SolarPosition,
    panel: &PanelConfiguration,
) -> PlaneOfArray {
    if position.is_night() {
        return PlaneOfArray::ZERO;
    }
    let tilt = panel.tilt_deg * DEG;

    let beam = non_negative(effective.dni * cos_angle_of_incidence(position, panel).max(0.0));
    let sky_diffuse = non_negative(effective.dhi * (1.0 + tilt.cos()) / 2.0);
    let ground_diffuse = non_negative(effective.ghi * panel.albedo * (1.0 - tilt.cos()) / 2.0);

    PlaneOfArray {
        beam,
        sky_diffuse,
        ground_diffuse,
        global: beam + sky_diffuse + ground_diffuse,
    }
}

/// Full irradiance chain for one hour: clear sky → clouds → panel plane.
pub fn irradiance_sample(sun: &SunState, cloud_cover_pct: f64, panel: &PanelConfiguration) -> IrradianceSample {
    let effective = attenuate(&sun.clear_sky, cloud_cover_pct, &sun.position);
    let poa = plane_of_array(&effective, &sun.position, panel);
    IrradianceSample {
        clear_sky: sun.clear_sky,
        effective,
        poa,
    }
}
