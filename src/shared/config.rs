//! Application configuration. Observer location, time provider, compass source.

use crate::domain::{DomainError, GeoPoint};
use serde::Deserialize;

/// Used by the prayer flow when the observer cannot be located (Istanbul).
pub const DEFAULT_FALLBACK_LATITUDE: f64 = 41.0082;
pub const DEFAULT_FALLBACK_LONGITUDE: f64 = 28.9784;
/// Place label shown with the fallback times.
pub const DEFAULT_FALLBACK_NAME: &str = "İstanbul, Türkiye";

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

pub const DEFAULT_ALADHAN_URL: &str = "https://api.aladhan.com/v1";
/// Aladhan calculation method 3: Muslim World League.
pub const DEFAULT_CALCULATION_METHOD: u8 = 3;

/// Countdown refresh period.
pub const DEFAULT_CLOCK_TICK_MS: u64 = 1000;

pub const DEFAULT_SENSOR_RATE_HZ: u32 = 10;
pub const DEFAULT_SIMULATED_SPIN_DEG_PER_SEC: f64 = 15.0;

/// Which magnetometer adapter backs the compass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    #[default]
    Simulated,
    Csv,
    #[serde(rename = "none")]
    Absent,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Observer latitude. Read from VAKIT_LATITUDE.
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Observer longitude. Read from VAKIT_LONGITUDE.
    #[serde(default)]
    pub longitude: Option<f64>,

    /// When false, location access is treated as denied. Read from VAKIT_LOCATION_ENABLED.
    #[serde(default)]
    pub location_enabled: Option<bool>,

    #[serde(default)]
    pub fallback_latitude: Option<f64>,

    #[serde(default)]
    pub fallback_longitude: Option<f64>,

    /// Label for the fallback position. Read from VAKIT_FALLBACK_NAME.
    #[serde(default)]
    pub fallback_name: Option<String>,

    /// Fixed place name for the observer; skips reverse geocoding. Read from VAKIT_LOCATION_NAME.
    #[serde(default)]
    pub location_name: Option<String>,

    /// Nominatim base URL. Read from VAKIT_GEOCODER_URL.
    #[serde(default)]
    pub geocoder_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Prayer times provider
    // ─────────────────────────────────────────────────────────────────────────
    /// Offline timings in Aladhan response shape. Replaces the HTTP provider when set.
    #[serde(default)]
    pub timings_file: Option<String>,

    /// Aladhan API base URL. Read from VAKIT_ALADHAN_URL.
    #[serde(default)]
    pub aladhan_url: Option<String>,

    /// Aladhan `method` query parameter. Read from VAKIT_CALCULATION_METHOD.
    #[serde(default)]
    pub calculation_method: Option<u8>,

    /// Countdown refresh period in ms. Read from VAKIT_CLOCK_TICK_MS.
    #[serde(default)]
    pub clock_tick_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Compass
    // ─────────────────────────────────────────────────────────────────────────
    /// `simulated`, `csv` or `none`. Read from VAKIT_SENSOR.
    #[serde(default)]
    pub sensor: Option<SensorKind>,

    /// Replay file for the `csv` sensor (columns `x,y[,z]`). Read from VAKIT_SENSOR_CSV_PATH.
    #[serde(default)]
    pub sensor_csv_path: Option<String>,

    #[serde(default)]
    pub sensor_rate_hz: Option<u32>,

    #[serde(default)]
    pub simulated_spin_deg_per_sec: Option<f64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("VAKIT").try_parsing(true));
        if let Ok(path) = std::env::var("VAKIT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Configured observer position. `Ok(None)` when either coordinate is missing.
    pub fn observer(&self) -> Result<Option<GeoPoint>, DomainError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }

    pub fn location_enabled_or_default(&self) -> bool {
        self.location_enabled.unwrap_or(true)
    }

    /// Fallback position for prayer times. Defaults to Istanbul.
    pub fn fallback_point(&self) -> Result<GeoPoint, DomainError> {
        GeoPoint::new(
            self.fallback_latitude.unwrap_or(DEFAULT_FALLBACK_LATITUDE),
            self.fallback_longitude.unwrap_or(DEFAULT_FALLBACK_LONGITUDE),
        )
    }

    pub fn fallback_name_or_default(&self) -> String {
        self.fallback_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FALLBACK_NAME.to_string())
    }

    /// Configured observer place name, if any. Blank values count as unset.
    pub fn location_name(&self) -> Option<&str> {
        self.location_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn geocoder_url_or_default(&self) -> String {
        self.geocoder_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string())
    }

    pub fn aladhan_url_or_default(&self) -> String {
        self.aladhan_url
            .clone()
            .unwrap_or_else(|| DEFAULT_ALADHAN_URL.to_string())
    }

    pub fn calculation_method_or_default(&self) -> u8 {
        self.calculation_method.unwrap_or(DEFAULT_CALCULATION_METHOD)
    }

    /// Returns the countdown tick in ms. Zero is bumped to the default.
    pub fn clock_tick_ms_or_default(&self) -> u64 {
        match self.clock_tick_ms {
            Some(ms) if ms > 0 => ms,
            _ => DEFAULT_CLOCK_TICK_MS,
        }
    }

    pub fn sensor_or_default(&self) -> SensorKind {
        self.sensor.unwrap_or_default()
    }

    /// Returns the sensor sample rate. Zero is bumped to the default.
    pub fn sensor_rate_hz_or_default(&self) -> u32 {
        match self.sensor_rate_hz {
            Some(hz) if hz > 0 => hz,
            _ => DEFAULT_SENSOR_RATE_HZ,
        }
    }

    pub fn simulated_spin_or_default(&self) -> f64 {
        self.simulated_spin_deg_per_sec
            .unwrap_or(DEFAULT_SIMULATED_SPIN_DEG_PER_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.observer().unwrap().is_none());
        assert!(cfg.location_enabled_or_default());
        let fallback = cfg.fallback_point().unwrap();
        assert_eq!(fallback.latitude_deg, DEFAULT_FALLBACK_LATITUDE);
        assert_eq!(fallback.longitude_deg, DEFAULT_FALLBACK_LONGITUDE);
        assert_eq!(cfg.fallback_name_or_default(), "İstanbul, Türkiye");
        assert_eq!(cfg.location_name(), None);
        assert_eq!(cfg.geocoder_url_or_default(), DEFAULT_GEOCODER_URL);
        assert_eq!(cfg.aladhan_url_or_default(), DEFAULT_ALADHAN_URL);
        assert_eq!(cfg.calculation_method_or_default(), 3);
        assert_eq!(cfg.clock_tick_ms_or_default(), 1000);
        assert_eq!(cfg.sensor_or_default(), SensorKind::Simulated);
        assert_eq!(cfg.sensor_rate_hz_or_default(), 10);
    }

    #[test]
    fn test_zero_periods_fall_back() {
        let cfg = AppConfig {
            clock_tick_ms: Some(0),
            sensor_rate_hz: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.clock_tick_ms_or_default(), DEFAULT_CLOCK_TICK_MS);
        assert_eq!(cfg.sensor_rate_hz_or_default(), DEFAULT_SENSOR_RATE_HZ);
    }

    #[test]
    fn test_observer_requires_both_coordinates() {
        let half = AppConfig {
            latitude: Some(41.0),
            ..Default::default()
        };
        assert!(half.observer().unwrap().is_none());

        let bad = AppConfig {
            latitude: Some(123.0),
            longitude: Some(10.0),
            ..Default::default()
        };
        assert!(matches!(
            bad.observer(),
            Err(DomainError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_location_name_ignores_blank() {
        let blank = AppConfig {
            location_name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(blank.location_name(), None);

        let named = AppConfig {
            location_name: Some(" Fatih, Türkiye ".into()),
            ..Default::default()
        };
        assert_eq!(named.location_name(), Some("Fatih, Türkiye"));
    }

    #[test]
    fn test_sensor_kind_deserializes_lowercase() {
        let kind: SensorKind = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(kind, SensorKind::Csv);
        let kind: SensorKind = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(kind, SensorKind::Absent);
    }
}
