//! Qibla compass use case: a small state machine around the bearing engine.
//!
//! `Uninitialized -> Armed -> Tracking -> Uninitialized` (teardown).
//! `Unavailable` is terminal: once arming fails the instance reports the reason
//! and never retries. The heading subscription is owned by the `Tracking` state
//! and released exactly once when that state is left.

use crate::domain::{
    Bearing, DomainError, GeoPoint, MECCA, RelativeRotation, UnavailableReason,
    compute_target_bearing, on_heading_sample,
};
use crate::ports::{HeadingSensor, HeadingSubscription, LocationProvider};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum CompassState {
    Uninitialized,
    Armed {
        observer: GeoPoint,
        target: Bearing,
    },
    Tracking {
        observer: GeoPoint,
        target: Bearing,
        subscription: HeadingSubscription,
    },
    Unavailable(UnavailableReason),
}

/// Data-free view of [`CompassState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPhase {
    Uninitialized,
    Armed,
    Tracking,
    Unavailable,
}

pub struct QiblaCompass {
    sensor: Arc<dyn HeadingSensor>,
    location: Arc<dyn LocationProvider>,
    target_point: GeoPoint,
    state: CompassState,
    last_rotation: Option<RelativeRotation>,
}

impl QiblaCompass {
    /// Compass pointing at the Kaaba.
    pub fn new(sensor: Arc<dyn HeadingSensor>, location: Arc<dyn LocationProvider>) -> Self {
        Self {
            sensor,
            location,
            target_point: MECCA,
            state: CompassState::Uninitialized,
            last_rotation: None,
        }
    }

    pub fn state(&self) -> &CompassState {
        &self.state
    }

    pub fn phase(&self) -> CompassPhase {
        match self.state {
            CompassState::Uninitialized => CompassPhase::Uninitialized,
            CompassState::Armed { .. } => CompassPhase::Armed,
            CompassState::Tracking { .. } => CompassPhase::Tracking,
            CompassState::Unavailable(_) => CompassPhase::Unavailable,
        }
    }

    pub fn target_bearing(&self) -> Option<Bearing> {
        match self.state {
            CompassState::Armed { target, .. } | CompassState::Tracking { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match &self.state {
            CompassState::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }

    /// Most recent rotation while tracking.
    pub fn last_rotation(&self) -> Option<RelativeRotation> {
        self.last_rotation
    }

    /// Check the sensor, locate the observer and fix the target bearing.
    ///
    /// Arming an already armed compass returns the existing bearing.
    pub async fn arm(&mut self) -> Result<Bearing, DomainError> {
        match &self.state {
            CompassState::Uninitialized => {}
            CompassState::Armed { target, .. } => return Ok(*target),
            CompassState::Tracking { .. } => {
                return Err(DomainError::InvalidState(
                    "compass is already tracking".into(),
                ));
            }
            CompassState::Unavailable(reason) => {
                return Err(DomainError::Unavailable(reason.clone()));
            }
        }

        if !self.sensor.is_available().await {
            return Err(self.mark_unavailable(UnavailableReason::SensorMissing));
        }

        let observer = match self.location.locate().await {
            Ok(point) => point,
            Err(DomainError::Unavailable(reason)) => return Err(self.mark_unavailable(reason)),
            Err(other) => {
                return Err(
                    self.mark_unavailable(UnavailableReason::AcquisitionFailed(other.to_string()))
                );
            }
        };

        let target = compute_target_bearing(observer, self.target_point);
        info!(%observer, bearing = %target, "compass armed");
        self.state = CompassState::Armed { observer, target };
        Ok(target)
    }

    /// Subscribe to the heading stream. Only valid from `Armed`; a no-op while tracking.
    /// A failed subscription leaves the compass armed.
    pub async fn start_tracking(&mut self) -> Result<(), DomainError> {
        let (observer, target) = match &self.state {
            CompassState::Armed { observer, target } => (*observer, *target),
            CompassState::Tracking { .. } => return Ok(()),
            CompassState::Unavailable(reason) => {
                return Err(DomainError::Unavailable(reason.clone()));
            }
            CompassState::Uninitialized => {
                return Err(DomainError::InvalidState(
                    "compass must be armed before tracking".into(),
                ));
            }
        };

        let subscription = self.sensor.subscribe().await?;
        info!("compass tracking");
        self.state = CompassState::Tracking {
            observer,
            target,
            subscription,
        };
        Ok(())
    }

    /// Wait for the next heading sample and turn it into an indicator rotation.
    /// `None` when not tracking or when the stream has ended.
    pub async fn next_rotation(&mut self) -> Option<RelativeRotation> {
        let CompassState::Tracking {
            target,
            subscription,
            ..
        } = &mut self.state
        else {
            return None;
        };
        let raw = subscription.next_sample().await?;
        let rotation = on_heading_sample(raw, *target);
        self.last_rotation = Some(rotation);
        Some(rotation)
    }

    /// Leave `Armed`/`Tracking` for `Uninitialized`, releasing the heading
    /// subscription if one is held. Returns `true` when a subscription was released.
    /// `Unavailable` is kept.
    pub fn teardown(&mut self) -> bool {
        match std::mem::replace(&mut self.state, CompassState::Uninitialized) {
            CompassState::Tracking {
                mut subscription, ..
            } => {
                self.last_rotation = None;
                let released = subscription.release();
                info!(released, "compass torn down");
                released
            }
            CompassState::Armed { .. } => {
                debug!("compass disarmed");
                false
            }
            CompassState::Unavailable(reason) => {
                self.state = CompassState::Unavailable(reason);
                false
            }
            CompassState::Uninitialized => false,
        }
    }

    /// Arm if needed, track, and feed every rotation to `on_rotation` until
    /// `shutdown` completes or the stream ends. Always tears down before returning.
    pub async fn run<S, F>(&mut self, shutdown: S, mut on_rotation: F) -> Result<usize, DomainError>
    where
        S: Future<Output = ()>,
        F: FnMut(RelativeRotation),
    {
        if self.phase() == CompassPhase::Uninitialized {
            self.arm().await?;
        }
        self.start_tracking().await?;
        tokio::pin!(shutdown);

        let mut samples = 0usize;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                next = self.next_rotation() => match next {
                    Some(rotation) => {
                        on_rotation(rotation);
                        samples += 1;
                    }
                    None => {
                        warn!(samples, "heading stream ended");
                        break;
                    }
                },
            }
        }

        self.teardown();
        Ok(samples)
    }

    fn mark_unavailable(&mut self, reason: UnavailableReason) -> DomainError {
        warn!(%reason, "compass unavailable");
        self.state = CompassState::Unavailable(reason.clone());
        DomainError::Unavailable(reason)
    }
}

impl Drop for QiblaCompass {
    fn drop(&mut self) {
        self.teardown();
    }
}
