use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, Level};

use pv_forecast::config::Config;
use pv_forecast::models::forecast::{PredictionRequest, PredictionResponse};
use pv_forecast::models::weather::{CurrentConditionsResponse, HourlyForecastResponse, ObservedWeather};
use pv_forecast::services::dataset::{self, TrainingSite};
use pv_forecast::services::forecast_service::PredictionService;

#[derive(Parser)]
#[command(name = "pv-forecast", version, about = "Photovoltaic power dataset generator and forecaster")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a year of hourly weather and panel output for every configured site
    Generate {
        #[arg(long, default_value = "config.json")]
        config: PathBuf,
        /// Overrides `output_path` from the configuration
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Predict the current power from a current-conditions payload
    Now {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        request: PathBuf,
        #[arg(long)]
        weather: PathBuf,
    },
    /// Predict the next 24 hours from an hourly-forecast payload
    Forecast {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        request: PathBuf,
        #[arg(long)]
        weather: PathBuf,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let level = if cfg!(feature = "verbose_log") { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Generate { config, output } => generate(&config, output).await,
        Command::Now { model, request, weather } => {
            let service = PredictionService::load(&model)?;
            let request: PredictionRequest = read_json(&request)?;
            let current: CurrentConditionsResponse = read_json(&weather)?;
            let watts = service.predict_now(&request, ObservedWeather::from(&current), Utc::now())?;
            let response = PredictionResponse { predicted_power_watts: watts };
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Forecast { model, request, weather } => {
            let service = PredictionService::load(&model)?;
            let request: PredictionRequest = read_json(&request)?;
            let hourly: HourlyForecastResponse = read_json(&weather)?;
            let forecast = service.predict_forecast(&request, &hourly)?;
            info!(
                "[FORECAST] {} hours, {:.2} kWh (model {})",
                forecast.hourly_forecast.len(),
                forecast.total_kwh_predicted,
                service.model_version()
            );
            println!("{}", serde_json::to_string_pretty(&forecast)?);
            Ok(())
        }
    }
}

async fn generate(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    // 1. Load configuration
    let config = Config::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!("Configuration loaded: {} sites, year {}", config.locations.len(), config.year);

    let mut sites = Vec::with_capacity(config.locations.len());
    for site in &config.locations {
        let location = site.location().with_context(|| format!("site {}", site.city))?;
        sites.push(TrainingSite {
            city: site.city.clone(),
            state: site.state.clone(),
            location,
            panel: config.panel.for_site(site.latitude),
        });
    }

    // 2. One blocking task per site; sites share nothing
    let started = Instant::now();
    let year = config.year;
    let handles: Vec<_> = sites
        .into_iter()
        .map(|site| tokio::task::spawn_blocking(move || (site.city.clone(), dataset::generate_site_year(&site, year))))
        .collect();

    let mut rows = Vec::new();
    for handle in handles {
        let (city, result) = handle.await.context("site generation task panicked")?;
        match result {
            Ok(site_rows) => {
                info!("[DATASET] {}: {} rows", city, site_rows.len());
                rows.extend(site_rows);
            }
            Err(e) => {
                error!("[DATASET] {} failed: {}", city, e);
                return Err(e.into());
            }
        }
    }

    // 3. Export
    let output = output.unwrap_or_else(|| PathBuf::from(&config.output_path));
    dataset::export(&output, &rows)?;
    info!(
        "Dataset complete: {} rows written to {} in {:.1}s",
        rows.len(),
        output.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
