//! Infrastructure adapters. Implement outbound ports.
//!
//! Aladhan HTTP / JSON file timings, configured location, place names,
//! magnetometer sources, system clock, terminal UI. Map errors to DomainError.

pub mod clock;
pub mod geocode;
pub mod location;
pub mod sensor;
pub mod time;
pub mod ui;
