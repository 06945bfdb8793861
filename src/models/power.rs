use serde::Serialize;

// ─── Solar geometry ──────────────────────────────────────────────────────────

/// Apparent (refraction-corrected) sun position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// Apparent zenith angle (deg)
    pub zenith_deg: f64,
    /// Apparent elevation angle (deg), 90 − zenith
    pub elevation_deg: f64,
    /// Azimuth (deg from north, clockwise)
    pub azimuth_deg: f64,
}

impl SolarPosition {
    pub fn is_night(&self) -> bool {
        self.elevation_deg < 0.0
    }
}

// ─── Irradiance ──────────────────────────────────────────────────────────────

/// Direct-normal, diffuse-horizontal and global-horizontal components (W/m²).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IrradianceComponents {
    pub dni: f64,
    pub dhi: f64,
    pub ghi: f64,
}

impl IrradianceComponents {
    pub const ZERO: Self = Self {
        dni: 0.0,
        dhi: 0.0,
        ghi: 0.0,
    };
}

/// Irradiance reaching a tilted surface (W/m²).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlaneOfArray {
    pub beam: f64,
    pub sky_diffuse: f64,
    pub ground_diffuse: f64,
    pub global: f64,
}

impl PlaneOfArray {
    pub const ZERO: Self = Self {
        beam: 0.0,
        sky_diffuse: 0.0,
        ground_diffuse: 0.0,
        global: 0.0,
    };
}

/// Everything the irradiance pipeline knows about one hour at one site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrradianceSample {
    pub clear_sky: IrradianceComponents,
    /// Clear-sky components after cloud attenuation
    pub effective: IrradianceComponents,
    pub poa: PlaneOfArray,
}

/// Sun position plus the clear-sky irradiance it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunState {
    pub position: SolarPosition,
    pub clear_sky: IrradianceComponents,
}

// ─── Power ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerSample {
    /// Cell temperature (°C)
    pub cell_temp_c: f64,
    /// DC power at the array terminals (W)
    pub dc_power_w: f64,
    /// AC power after system losses (W)
    pub ac_power_w: f64,
}
