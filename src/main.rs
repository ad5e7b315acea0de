//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vakit::adapters::clock::SystemClock;
use vakit::adapters::geocode::{FixedPlaceName, NominatimGeocoder};
use vakit::adapters::location::ConfiguredLocation;
use vakit::adapters::sensor::{CsvMagnetometer, NoMagnetometer, SimulatedMagnetometer};
use vakit::adapters::time::{AladhanTimeProvider, JsonFileTimeProvider};
use vakit::adapters::ui::tui::TuiInputPort;
use vakit::ports::{Geocoder, HeadingSensor, LocationProvider, TimeProvider};
use vakit::shared::config::{AppConfig, SensorKind};
use vakit::usecases::{FallbackPlace, PrayerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    vakit::adapters::ui::init_ui();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration; using defaults");
            AppConfig::default()
        }
    };

    // --- Location ---
    let observer = cfg.observer()?;
    if observer.is_none() {
        info!("VAKIT_LATITUDE / VAKIT_LONGITUDE not set; location will be unavailable");
    }
    let location: Arc<dyn LocationProvider> = Arc::new(ConfiguredLocation::new(
        observer,
        cfg.location_enabled_or_default(),
    ));

    // --- Place name ---
    let geocoder: Arc<dyn Geocoder> = match cfg.location_name() {
        Some(name) => Arc::new(FixedPlaceName::new(name)),
        None => Arc::new(NominatimGeocoder::new(cfg.geocoder_url_or_default())),
    };

    // --- Prayer times provider ---
    let time_provider: Arc<dyn TimeProvider> = match &cfg.timings_file {
        Some(path) => {
            info!(path = %path, "prayer times from file");
            Arc::new(JsonFileTimeProvider::new(path))
        }
        None => {
            let url = cfg.aladhan_url_or_default();
            let method = cfg.calculation_method_or_default();
            info!(url = %url, method, "prayer times from Aladhan");
            Arc::new(AladhanTimeProvider::new(url, method))
        }
    };

    // --- Compass sensor ---
    let rate_hz = cfg.sensor_rate_hz_or_default();
    let sensor: Arc<dyn HeadingSensor> = match cfg.sensor_or_default() {
        SensorKind::Simulated => {
            warn!("using simulated magnetometer (set VAKIT_SENSOR=csv to replay a recording)");
            Arc::new(SimulatedMagnetometer::new(
                rate_hz,
                cfg.simulated_spin_or_default(),
            ))
        }
        SensorKind::Csv => match &cfg.sensor_csv_path {
            Some(path) => Arc::new(CsvMagnetometer::new(path, rate_hz)),
            None => {
                warn!("VAKIT_SENSOR=csv but VAKIT_SENSOR_CSV_PATH is not set; compass disabled");
                Arc::new(NoMagnetometer)
            }
        },
        SensorKind::Absent => Arc::new(NoMagnetometer),
    };

    // --- Services ---
    let tick = Duration::from_millis(cfg.clock_tick_ms_or_default());
    let prayer_service = Arc::new(PrayerService::new(
        time_provider,
        Arc::clone(&location),
        geocoder,
        Arc::new(SystemClock),
        FallbackPlace {
            point: cfg.fallback_point()?,
            name: cfg.fallback_name_or_default(),
        },
        tick,
    ));

    let tui = TuiInputPort::new(prayer_service, sensor, location);

    // --- Run (main menu -> Prayer times / Qibla compass) ---
    tui.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
