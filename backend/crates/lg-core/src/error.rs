use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid coordinates: latitude={latitude}, longitude={longitude} {location}")]
    InvalidCoordinates {
        latitude: f64,
        longitude: f64,
        location: ErrorLocation,
    },

    #[error("Invalid identity: {value:?} {location}")]
    InvalidIdentity {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Creates a Validation error for `field` at caller location.
    #[track_caller]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates an InvalidCoordinates error at caller location.
    #[track_caller]
    pub fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            Self::InvalidCoordinates { .. } => Some("coordinates"),
            Self::InvalidIdentity { .. } => Some("id"),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
