//! Core domain layer. No external I/O dependencies.
//!
//! Entities and the two pure computations (next-prayer resolution and Qibla
//! bearing) live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod qibla;
pub mod schedule;

pub use entities::{
    Bearing, DayTimings, GeoPoint, HeadingSample, HijriDate, NextPrayer, Prayer, PrayerSlot,
    RelativeRotation, TimeOfDay,
};
pub use errors::{DomainError, UnavailableReason};
pub use qibla::{MECCA, compute_target_bearing, on_heading_sample};
pub use schedule::{DailySchedule, resolve};
