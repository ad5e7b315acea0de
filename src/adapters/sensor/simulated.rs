//! Simulated magnetometer for development without hardware.
//!
//! Produces a horizontal field vector that turns at a constant rate, as if the
//! device were slowly rotated on a table.

use super::{period_for_rate, spawn_stream};
use crate::domain::{DomainError, HeadingSample};
use crate::ports::{HeadingSensor, HeadingSubscription};
use tracing::info;

/// Typical horizontal field strength in µT.
const FIELD_STRENGTH_UT: f64 = 30.0;

pub struct SimulatedMagnetometer {
    rate_hz: u32,
    spin_deg_per_sec: f64,
    start_heading_deg: f64,
}

impl SimulatedMagnetometer {
    pub fn new(rate_hz: u32, spin_deg_per_sec: f64) -> Self {
        Self {
            rate_hz: rate_hz.max(1),
            spin_deg_per_sec,
            start_heading_deg: 0.0,
        }
    }

    pub fn with_start_heading(mut self, degrees: f64) -> Self {
        self.start_heading_deg = degrees;
        self
    }

    /// Field vector `tick` samples after the start.
    fn sample_at(&self, tick: u64) -> HeadingSample {
        let elapsed_secs = tick as f64 / f64::from(self.rate_hz);
        let heading = (self.start_heading_deg + self.spin_deg_per_sec * elapsed_secs).to_radians();
        HeadingSample::new(
            heading.cos() * FIELD_STRENGTH_UT,
            heading.sin() * FIELD_STRENGTH_UT,
        )
    }
}

#[async_trait::async_trait]
impl HeadingSensor for SimulatedMagnetometer {
    async fn is_available(&self) -> bool {
        true
    }

    async fn subscribe(&self) -> Result<HeadingSubscription, DomainError> {
        info!(
            rate_hz = self.rate_hz,
            spin_deg_per_sec = self.spin_deg_per_sec,
            "[SIM] magnetometer stream started"
        );
        let sim = Self {
            rate_hz: self.rate_hz,
            spin_deg_per_sec: self.spin_deg_per_sec,
            start_heading_deg: self.start_heading_deg,
        };
        Ok(spawn_stream(period_for_rate(self.rate_hz), move |tick| {
            Some(sim.sample_at(tick))
        }))
    }
}
