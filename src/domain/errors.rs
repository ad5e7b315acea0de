//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Resolver asked for the next prayer before any slots were supplied.
    /// The caller should show a loading state instead.
    #[error("prayer times are not available yet")]
    InsufficientData,

    /// Bearing engine could not arm. Terminal for the compass instance.
    #[error("Qibla compass unavailable: {0}")]
    Unavailable(UnavailableReason),

    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Time provider error: {0}")]
    TimeProvider(String),

    #[error("Geocoder error: {0}")]
    Geocoder(String),

    #[error("Heading sensor error: {0}")]
    Sensor(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("UI error: {0}")]
    Ui(String),
}

/// Why the compass could not obtain what it needs to arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No magnetometer on this device.
    SensorMissing,
    /// Location access was not granted.
    PermissionDenied,
    /// Location access granted but no position could be determined.
    NoFix,
    /// Anything else that went wrong while acquiring location or sensor data.
    AcquisitionFailed(String),
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SensorMissing => write!(f, "this device has no compass sensor"),
            Self::PermissionDenied => {
                write!(f, "location permission is required to find the Qibla")
            }
            Self::NoFix => write!(
                f,
                "could not determine your location; enable GPS and try again"
            ),
            Self::AcquisitionFailed(detail) => {
                write!(f, "failed to read location or sensor data: {}", detail)
            }
        }
    }
}

impl From<UnavailableReason> for DomainError {
    fn from(reason: UnavailableReason) -> Self {
        DomainError::Unavailable(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_reasons_have_distinct_messages() {
        let reasons = [
            UnavailableReason::SensorMissing,
            UnavailableReason::PermissionDenied,
            UnavailableReason::NoFix,
            UnavailableReason::AcquisitionFailed("timeout".into()),
        ];
        let messages: std::collections::HashSet<String> =
            reasons.iter().map(|r| r.to_string()).collect();
        assert_eq!(messages.len(), reasons.len());
    }

    #[test]
    fn test_unavailable_wraps_reason() {
        let err: DomainError = UnavailableReason::NoFix.into();
        assert!(matches!(
            err,
            DomainError::Unavailable(UnavailableReason::NoFix)
        ));
        assert!(err.to_string().contains("GPS"));
    }
}
