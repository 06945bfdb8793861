use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{PvError, Result};

// ─── Training-run panel constants ────────────────────────────────────────────

pub const DEFAULT_PANEL_WATTAGE_STC: f64 = 450.0;
pub const DEFAULT_PANEL_AREA_M2: f64 = 2.1;
pub const DEFAULT_SYSTEM_LOSS_FACTOR: f64 = 0.85;
/// Power temperature coefficient (%/°C) of typical c-Si modules.
pub const DEFAULT_TEMPERATURE_COEFFICIENT_PCT: f64 = -0.35;
pub const DEFAULT_AZIMUTH_DEG: f64 = 180.0;
pub const DEFAULT_ALBEDO: f64 = 0.25;

// ─── Location ────────────────────────────────────────────────────────────────

/// A validated point on the globe together with the timezone its local
/// clock runs in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    timezone: Tz,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, timezone: Tz) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            timezone,
        })
    }

    /// Builds a location whose timezone is resolved from an optional
    /// caller-supplied IANA name, falling back to the coordinates.
    pub fn resolve(latitude: f64, longitude: f64, timezone: Option<&str>) -> Result<Self> {
        validate_coordinates(latitude, longitude)?;
        let tz = crate::services::timezone::resolve_timezone(latitude, longitude, timezone);
        Self::new(latitude, longitude, tz)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// Checks latitude ∈ [−90, 90] and longitude ∈ [−180, 180].
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(PvError::InvalidLocation {
            field: "latitude",
            value: latitude,
            range: "[-90, 90]",
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(PvError::InvalidLocation {
            field: "longitude",
            value: longitude,
            range: "[-180, 180]",
        });
    }
    Ok(())
}

// ─── Panel configuration ─────────────────────────────────────────────────────

/// Fixed-tilt array description.
///
/// `temperature_coefficient_pct` is expressed in %/°C (e.g. −0.35), the unit
/// found on module datasheets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelConfiguration {
    pub tilt_deg: f64,
    /// Degrees clockwise from north, 180 = south-facing.
    pub azimuth_deg: f64,
    pub rated_power_w: f64,
    pub temperature_coefficient_pct: f64,
    pub system_loss_factor: f64,
    pub area_m2: f64,
    pub albedo: f64,
}

impl PanelConfiguration {
    /// The training-run array: tilted at the site latitude, facing south.
    pub fn for_latitude(latitude: f64) -> Self {
        Self {
            tilt_deg: latitude,
            azimuth_deg: DEFAULT_AZIMUTH_DEG,
            rated_power_w: DEFAULT_PANEL_WATTAGE_STC,
            temperature_coefficient_pct: DEFAULT_TEMPERATURE_COEFFICIENT_PCT,
            system_loss_factor: DEFAULT_SYSTEM_LOSS_FACTOR,
            area_m2: DEFAULT_PANEL_AREA_M2,
            albedo: DEFAULT_ALBEDO,
        }
    }

    pub fn with_orientation(mut self, tilt_deg: f64, azimuth_deg: f64) -> Self {
        self.tilt_deg = tilt_deg;
        self.azimuth_deg = azimuth_deg;
        self
    }

    /// Temperature coefficient as a fraction per °C.
    pub fn gamma(&self) -> f64 {
        self.temperature_coefficient_pct / 100.0
    }
}

// ─── Time point ──────────────────────────────────────────────────────────────

/// A timezone-aware instant. Hour-of-day and day-of-year are read from the
/// local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    local: DateTime<Tz>,
}

impl TimePoint {
    pub fn from_utc(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            local: instant.with_timezone(&tz),
        }
    }

    /// Local wall-clock time at the top of the given hour. For ambiguous
    /// local times (DST fall-back) the earlier instant is used.
    pub fn from_local(tz: Tz, date: NaiveDate, hour: u32) -> Result<Self> {
        let naive = date
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| PvError::NonexistentLocalTime(format!("{date} {hour}:00"), tz.name().to_string()))?;
        let local = tz
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| PvError::NonexistentLocalTime(naive.to_string(), tz.name().to_string()))?;
        Ok(Self { local })
    }

    pub fn from_unix(seconds: i64, tz: Tz) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(seconds, 0).map(|utc| Self::from_utc(utc, tz))
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }

    pub fn local(&self) -> DateTime<Tz> {
        self.local
    }

    pub fn fixed_offset(&self) -> DateTime<FixedOffset> {
        self.local.fixed_offset()
    }

    /// 0–23
    pub fn hour_of_day(&self) -> u32 {
        self.local.hour()
    }

    /// 1–366
    pub fn day_of_year(&self) -> u32 {
        self.local.ordinal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        let err = Location::new(91.0, 0.0, Tz::UTC).unwrap_err();
        assert!(matches!(err, PvError::InvalidLocation { field: "latitude", .. }));

        let err = Location::new(10.0, -180.5, Tz::UTC).unwrap_err();
        assert!(matches!(err, PvError::InvalidLocation { field: "longitude", .. }));

        let err = Location::new(f64::NAN, 0.0, Tz::UTC).unwrap_err();
        assert!(matches!(err, PvError::InvalidLocation { field: "latitude", .. }));
    }

    #[test]
    fn test_time_point_reads_local_calendar() {
        // 2024-12-31 20:00 UTC is already 2025-01-01 01:30 in Kolkata
        let utc = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        let tp = TimePoint::from_utc(utc, chrono_tz::Asia::Kolkata);
        assert_eq!(tp.hour_of_day(), 1);
        assert_eq!(tp.day_of_year(), 1);
        assert_eq!(tp.utc(), utc);
    }

    #[test]
    fn test_leap_year_day_of_year() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let tp = TimePoint::from_local(Tz::UTC, date, 23).unwrap();
        assert_eq!(tp.day_of_year(), 366);
    }

    #[test]
    fn test_training_panel_defaults() {
        let panel = PanelConfiguration::for_latitude(28.7041);
        assert_eq!(panel.tilt_deg, 28.7041);
        assert_eq!(panel.azimuth_deg, 180.0);
        assert_eq!(panel.rated_power_w, 450.0);
        assert!((panel.gamma() + 0.0035).abs() < 1e-12);
    }
}
