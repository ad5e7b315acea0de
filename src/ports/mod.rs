//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure (time, location, compass, clock)

pub mod heading;
pub mod inbound;
pub mod outbound;

pub use heading::HeadingSubscription;
pub use inbound::InputPort;
pub use outbound::{Clock, Geocoder, HeadingSensor, LocationProvider, TimeProvider};
