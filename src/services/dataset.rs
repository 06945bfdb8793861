//! Yearly training dataset: simulation per site and CSV export.

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

use crate::errors::{PvError, Result};
use crate::models::dataset::DatasetRow;
use crate::models::site::{Location, PanelConfiguration, TimePoint};
use crate::services::{features, irradiance, power_model, solar_algorithm, weather_synth};

/// A named location of the training run.
#[derive(Debug, Clone)]
pub struct TrainingSite {
    pub city: String,
    pub state: String,
    pub location: Location,
    pub panel: PanelConfiguration,
}

/// Hourly instants from local midnight on 1 January up to, but excluding,
/// local midnight on 1 January of the following year.
pub fn year_time_points(tz: Tz, year: i32) -> Result<Vec<TimePoint>> {
    let jan_first = |y: i32| {
        NaiveDate::from_ymd_opt(y, 1, 1)
            .ok_or_else(|| PvError::NonexistentLocalTime(format!("{y}-01-01"), tz.name().to_string()))
            .and_then(|date| TimePoint::from_local(tz, date, 0))
    };
    let start = jan_first(year)?.utc();
    let end = jan_first(year + 1)?.utc();

    let hours = (end - start).num_hours();
    Ok((0..hours)
        .map(|h| TimePoint::from_utc(start + Duration::hours(h), tz))
        .collect())
}

/// Simulates one site for a full year.
pub fn generate_site_year(site: &TrainingSite, year: i32) -> Result<Vec<DatasetRow>> {
    let location = &site.location;
    let panel = &site.panel;
    let times = year_time_points(location.timezone(), year)?;
    let sun = solar_algorithm::evaluate(location, &times);
    let weather = weather_synth::synthesize(&site.city, location, &times, &sun);

    let rows: Vec<DatasetRow> = times
        .iter()
        .zip(&sun)
        .zip(&weather)
        .map(|((time, sun), weather)| {
            let irr = irradiance::irradiance_sample(sun, weather.cloud_cover_pct, panel);
            let power = power_model::evaluate(
                irr.poa.global,
                weather.temperature_c,
                weather.wind_speed_m_s,
                panel,
                &sun.position,
            );
            let fv = features::build(time, location, panel, irr.effective.ghi, weather);

            DatasetRow {
                city: site.city.clone(),
                state: site.state.clone(),
                timestamp: time.fixed_offset(),
                hour_of_day: fv.hour_of_day,
                day_of_year: fv.day_of_year,
                latitude: fv.latitude,
                longitude: fv.longitude,
                tilt_angle: fv.tilt_deg,
                azimuth_angle: fv.azimuth_deg,
                panel_wattage_stc: panel.rated_power_w,
                panel_area_sq_m: panel.area_m2,
                system_losses_factor: panel.system_loss_factor,
                ghi_w_per_sq_m: fv.ghi_w_m2,
                temperature_c: fv.temperature_c,
                cloud_cover_percent: fv.cloud_cover_pct,
                wind_speed_mps: fv.wind_speed_m_s,
                effective_irradiance: irr.poa.global,
                power_output_w: power.ac_power_w,
            }
        })
        .collect();

    debug!(
        "[DATASET] {} ({}): {} hourly rows, {:.1} kWh AC",
        site.city,
        location.timezone().name(),
        rows.len(),
        rows.iter().map(|r| r.power_output_w).sum::<f64>() / 1000.0
    );
    Ok(rows)
}

pub fn write_csv<W: Write>(rows: &[DatasetRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<DatasetRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let rows = rdr.deserialize().collect::<std::result::Result<Vec<DatasetRow>, _>>()?;
    Ok(rows)
}

pub fn export(path: impl AsRef<Path>, rows: &[DatasetRow]) -> Result<()> {
    write_csv(rows, File::create(path)?)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<DatasetRow>> {
    read_csv(File::open(path)?)
}
