//! Nominatim adapter. Implements Geocoder via the OpenStreetMap reverse geocoding API.

use super::place_label;
use crate::domain::{DomainError, GeoPoint};
use crate::ports::Geocoder;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// City-level detail.
const REVERSE_ZOOM: &str = "10";

/// Calls `{base_url}/reverse?format=jsonv2&lat=..&lon=..`.
///
/// Nominatim requires an identifying User-Agent; names are requested in Turkish
/// to match the prayer labels.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    error: Option<String>,
}

/// Nominatim fills only one of city / town / village depending on settlement size.
#[derive(Debug, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl NominatimGeocoder {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://nominatim.openstreetmap.org"
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .user_agent(concat!("vakit/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }
}

fn label_from_response(body: ReverseResponse) -> Result<String, DomainError> {
    if let Some(error) = body.error {
        return Err(DomainError::Geocoder(error));
    }
    let address = body
        .address
        .ok_or_else(|| DomainError::Geocoder("response has no address".into()))?;
    let city = address.city.or(address.town).or(address.village);
    Ok(place_label(city.as_deref(), address.country.as_deref()))
}

#[async_trait::async_trait]
impl Geocoder for NominatimGeocoder {
    async fn place_name(&self, point: GeoPoint) -> Result<String, DomainError> {
        let url = self.reverse_url();
        debug!(%url, %point, "reverse geocoding");

        let res = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", point.latitude_deg.to_string()),
                ("lon", point.longitude_deg.to_string()),
                ("zoom", REVERSE_ZOOM.to_string()),
                ("accept-language", "tr".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Geocoder(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(DomainError::Geocoder(format!(
                "Nominatim error {}",
                res.status()
            )));
        }

        let body: ReverseResponse = res
            .json()
            .await
            .map_err(|e| DomainError::Geocoder(format!("Invalid response: {}", e)))?;
        label_from_response(body)
    }
}
