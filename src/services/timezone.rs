use chrono_tz::Tz;
use std::sync::LazyLock;
use tracing::{debug, warn};
use tzf_rs::DefaultFinder;

use crate::models::site::validate_coordinates;

// Zone polygons are decoded once; the finder is read-only afterwards.
static FINDER: LazyLock<DefaultFinder> = LazyLock::new(DefaultFinder::new);

/// Resolves the timezone a site's local clock runs in.
///
/// An explicit, valid IANA name wins. Otherwise the zone is looked up from the
/// coordinates, and `UTC` is the last resort.
pub fn resolve_timezone(latitude: f64, longitude: f64, explicit: Option<&str>) -> Tz {
    if let Some(name) = explicit {
        match name.parse::<Tz>() {
            Ok(tz) => return tz,
            Err(_) => warn!("Ignoring unknown timezone '{}', falling back to coordinates", name),
        }
    }
    geographic_timezone(latitude, longitude).unwrap_or_else(|| {
        warn!("No timezone found at ({}, {}), using UTC", latitude, longitude);
        Tz::UTC
    })
}

/// IANA zone whose boundary polygon contains the site.
pub fn geographic_timezone(latitude: f64, longitude: f64) -> Option<Tz> {
    validate_coordinates(latitude, longitude).ok()?;
    let name = FINDER.get_tz_name(longitude, latitude);
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            debug!("Zone lookup at ({}, {}) returned '{}'", latitude, longitude, name);
            None
        }
    }
}
