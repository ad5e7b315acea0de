//! Implements Geocoder with a configured name. No network.

use crate::domain::{DomainError, GeoPoint};
use crate::ports::Geocoder;

pub struct FixedPlaceName {
    name: String,
}

impl FixedPlaceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl Geocoder for FixedPlaceName {
    async fn place_name(&self, _point: GeoPoint) -> Result<String, DomainError> {
        Ok(self.name.clone())
    }
}
