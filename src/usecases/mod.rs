//! Application use cases. Orchestrate domain logic via ports.

pub mod compass_service;
pub mod prayer_service;

pub use compass_service::{CompassPhase, CompassState, QiblaCompass};
pub use prayer_service::{
    ClockTick, FallbackPlace, PERMISSION_REQUIRED_LABEL, PrayerDay, PrayerService,
};
