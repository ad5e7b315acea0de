//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DayTimings, DomainError, GeoPoint};
use crate::ports::HeadingSubscription;
use chrono::NaiveDateTime;

/// Supplies the six daily boundaries for a place on the day containing `at`.
///
/// Raw `HH:MM` strings are parsed here; the core only ever sees `TimeOfDay`.
#[async_trait::async_trait]
pub trait TimeProvider: Send + Sync {
    async fn day_timings(&self, point: GeoPoint, at: NaiveDateTime)
    -> Result<DayTimings, DomainError>;
}

/// Supplies the observer's position once per request.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    /// Failures are reported as `DomainError::Unavailable` with the matching reason
    /// (permission denied, no fix).
    async fn locate(&self) -> Result<GeoPoint, DomainError>;
}

/// Reverse geocoding: a position to a display name such as `"Kadıköy, Türkiye"`.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    async fn place_name(&self, point: GeoPoint) -> Result<String, DomainError>;
}

/// Magnetometer. Streams raw field samples at its own rate.
#[async_trait::async_trait]
pub trait HeadingSensor: Send + Sync {
    async fn is_available(&self) -> bool;

    /// Start streaming. The returned handle owns the stream; releasing or dropping it
    /// stops the producer.
    async fn subscribe(&self) -> Result<HeadingSubscription, DomainError>;
}

/// Local wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
