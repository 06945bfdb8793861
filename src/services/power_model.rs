//! Cell temperature and DC/AC conversion.

use crate::models::power::{PowerSample, SolarPosition};
use crate::models::site::PanelConfiguration;
use crate::services::irradiance::non_negative;

/// Faiman constant heat-loss factor, W/(m²·K), typical crystalline Si.
const FAIMAN_U0: f64 = 25.0;
/// Faiman convective heat-loss factor, W/(m²·K)/(m/s).
const FAIMAN_U1: f64 = 6.84;
/// Reference cell temperature of the power rating (°C).
const T_REF_C: f64 = 25.0;
/// Irradiance at standard test conditions (W/m²).
const G_STC: f64 = 1000.0;

/// T_cell = T_ambient + G_poa / (U0 + U1 · wind)
pub fn cell_temperature(poa_w_m2: f64, ambient_temp_c: f64, wind_speed_m_s: f64) -> f64 {
    let wind = if wind_speed_m_s.is_finite() { wind_speed_m_s.abs() } else { 0.0 };
    ambient_temp_c + non_negative(poa_w_m2) / (FAIMAN_U0 + FAIMAN_U1 * wind)
}

/// P_dc = P_stc · (G_poa / 1000) · [1 + γ · (T_cell − 25)]
///
/// No light means exactly zero, never NaN.
pub fn dc_power(poa_w_m2: f64, cell_temp_c: f64, panel: &PanelConfiguration) -> f64 {
    if !(poa_w_m2.is_finite() && poa_w_m2 > 0.0) {
        return 0.0;
    }
    let temp_factor = 1.0 + panel.gamma() * (cell_temp_c - T_REF_C);
    non_negative(panel.rated_power_w * (poa_w_m2 / G_STC) * temp_factor)
}

/// P_ac = P_dc · loss factor, zero at night.
pub fn ac_power(dc_power_w: f64, panel: &PanelConfiguration, position: &SolarPosition) -> f64 {
    if position.is_night() {
        return 0.0;
    }
    non_negative(dc_power_w * panel.system_loss_factor)
}

pub fn evaluate(
    poa_w_m2: f64,
    ambient_temp_c: f64,
    wind_speed_m_s: f64,
    panel: &PanelConfiguration,
    position: &SolarPosition,
) -> PowerSample {
    let cell_temp_c = cell_temperature(poa_w_m2, ambient_temp_c, wind_speed_m_s);
    let dc_power_w = dc_power(poa_w_m2, cell_temp_c, panel);
    let ac_power_w = ac_power(dc_power_w, panel, position);
    PowerSample {
        cell_temp_c,
        dc_power_w,
        ac_power_w,
    }
}
