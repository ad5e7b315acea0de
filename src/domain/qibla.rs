//! Bearing engine: great-circle bearing to the Kaaba and compass-relative rotation.
//!
//! Spherical Earth model. Coincident observer and target degrade to
//! `atan2(0, 0) == 0`, which is accepted as is.

use super::entities::{Bearing, GeoPoint, HeadingSample, RelativeRotation};

/// The Kaaba, Mecca.
pub const MECCA: GeoPoint = GeoPoint {
    latitude_deg: 21.4225,
    longitude_deg: 39.8262,
};

/// Initial great-circle bearing (forward azimuth) from `observer` to `target`.
pub fn compute_target_bearing(observer: GeoPoint, target: GeoPoint) -> Bearing {
    let phi_o = observer.latitude_deg.to_radians();
    let phi_t = target.latitude_deg.to_radians();
    let delta_lambda = (target.longitude_deg - observer.longitude_deg).to_radians();

    let y = delta_lambda.sin() * phi_t.cos();
    let x = phi_o.cos() * phi_t.sin() - phi_o.sin() * phi_t.cos() * delta_lambda.cos();

    Bearing::from_degrees((y.atan2(x).to_degrees() + 360.0) % 360.0)
}

/// Compass heading from the horizontal field components, rounded to whole degrees.
///
/// The rounded value may be exactly 360 for vectors just west of north; it is
/// only ever used as an operand of the rotation delta.
pub fn heading_degrees(raw: HeadingSample) -> f64 {
    let degrees = (raw.y.atan2(raw.x).to_degrees() + 360.0) % 360.0;
    degrees.round()
}

/// Rotation for the direction indicator: `heading - target_bearing`, unnormalised.
pub fn on_heading_sample(raw: HeadingSample, target_bearing: Bearing) -> RelativeRotation {
    RelativeRotation(heading_degrees(raw) - target_bearing.degrees())
}
