//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// City search input was empty after trimming
    #[error("Please enter a city name")]
    EmptyCityName,

    /// Coordinates outside the valid latitude/longitude ranges
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_city_message_is_user_facing() {
        assert_eq!(
            DomainError::EmptyCityName.to_string(),
            "Please enter a city name"
        );
    }

    #[test]
    fn invalid_coordinates_message_names_both_axes() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("91"));
        assert!(msg.contains("latitude"));
        assert!(msg.contains("longitude"));
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
