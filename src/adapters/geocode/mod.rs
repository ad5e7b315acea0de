//! Geocoder adapters. Turn the observer's position into a place name for the header.

pub mod fixed;
pub mod nominatim;

pub use fixed::FixedPlaceName;
pub use nominatim::NominatimGeocoder;

/// Stands in for a missing city name.
pub const UNKNOWN_CITY: &str = "Bilinmeyen";

/// `"{city}, {country}"`, with [`UNKNOWN_CITY`] when the city is missing.
pub fn place_label(city: Option<&str>, country: Option<&str>) -> String {
    let city = city.filter(|c| !c.trim().is_empty()).unwrap_or(UNKNOWN_CITY);
    match country.filter(|c| !c.trim().is_empty()) {
        Some(country) => format!("{}, {}", city, country),
        None => city.to_string(),
    }
}
