//! Device without a magnetometer.

use crate::domain::DomainError;
use crate::ports::{HeadingSensor, HeadingSubscription};

pub struct NoMagnetometer;

#[async_trait::async_trait]
impl HeadingSensor for NoMagnetometer {
    async fn is_available(&self) -> bool {
        false
    }

    async fn subscribe(&self) -> Result<HeadingSubscription, DomainError> {
        Err(DomainError::Sensor("no magnetometer present".into()))
    }
}
