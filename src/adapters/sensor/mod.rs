//! Magnetometer adapters. Implement HeadingSensor.
//!
//! Every subscription is backed by one spawned producer task feeding a bounded
//! channel; releasing the subscription aborts the task.

pub mod absent;
pub mod csv_replay;
pub mod simulated;

pub use absent::NoMagnetometer;
pub use csv_replay::CsvMagnetometer;
pub use simulated::SimulatedMagnetometer;

use crate::domain::HeadingSample;
use crate::ports::HeadingSubscription;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Samples buffered between the producer task and the compass.
const SAMPLE_BUFFER: usize = 16;

/// Sample period for a rate in Hz (clamped to at least 1 Hz).
pub(crate) fn period_for_rate(rate_hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)))
}

/// Spawn a producer calling `next(tick)` once per `period` until it returns `None`
/// or the subscription is released.
pub(crate) fn spawn_stream<F>(period: Duration, mut next: F) -> HeadingSubscription
where
    F: FnMut(u64) -> Option<HeadingSample> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(SAMPLE_BUFFER);
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut tick = 0u64;
        loop {
            interval.tick().await;
            let Some(sample) = next(tick) else { break };
            if tx.send(sample).await.is_err() {
                break;
            }
            tick += 1;
        }
        debug!(samples = tick, "heading producer finished");
    });
    HeadingSubscription::new(rx, move || handle.abort())
}
