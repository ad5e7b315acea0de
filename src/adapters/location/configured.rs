//! Implements LocationProvider from configured coordinates.
//!
//! Stands in for a device location service: `enabled = false` behaves like a
//! denied permission, missing coordinates like a receiver without a fix.

use crate::domain::{DomainError, GeoPoint, UnavailableReason};
use crate::ports::LocationProvider;
use tracing::debug;

pub struct ConfiguredLocation {
    point: Option<GeoPoint>,
    enabled: bool,
}

impl ConfiguredLocation {
    pub fn new(point: Option<GeoPoint>, enabled: bool) -> Self {
        Self { point, enabled }
    }
}

#[async_trait::async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn locate(&self) -> Result<GeoPoint, DomainError> {
        if !self.enabled {
            return Err(UnavailableReason::PermissionDenied.into());
        }
        let point = self.point.ok_or(UnavailableReason::NoFix)?;
        debug!(%point, "location resolved from configuration");
        Ok(point)
    }
}
