use lg_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Identity acquisition failed: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    #[error("Position sample failed: {message} {location}")]
    Sensor {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store write to {collection}/{key} failed: {message} {location}")]
    Write {
        collection: String,
        key: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Subscription to {collection} failed: {message} {location}")]
    Subscription {
        collection: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {source} {location}")]
    Validation {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Invalid broadcaster state: {message} {location}")]
    InvalidState {
        message: String,
        location: ErrorLocation,
    },
}

impl SyncError {
    #[track_caller]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn sensor(message: impl Into<String>) -> Self {
        Self::Sensor {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn write(collection: &str, key: &str, message: impl Into<String>) -> Self {
        Self::Write {
            collection: collection.to_string(),
            key: key.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn subscription(collection: &str, message: impl Into<String>) -> Self {
        Self::Subscription {
            collection: collection.to_string(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "AUTH_FAILURE",
            Self::Sensor { .. } => "SENSOR_FAILURE",
            Self::Write { .. } => "WRITE_FAILURE",
            Self::Subscription { .. } => "SUBSCRIPTION_FAILURE",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidState { .. } => "INVALID_STATE",
        }
    }

    /// Short message suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { .. } => {
                "Could not sign in to start broadcasting. Check your connection and try again."
                    .to_string()
            }
            Self::Sensor { message, .. } => format!("Location unavailable: {message}"),
            Self::Write { .. } => {
                "Could not reach the location store. Your position may be out of date."
                    .to_string()
            }
            Self::Subscription { .. } => {
                "Live locations are unavailable right now. No data is shown.".to_string()
            }
            Self::Validation { source, .. } => match source {
                CoreError::Validation { message, .. } => message.clone(),
                other => other.to_string(),
            },
            Self::InvalidState { message, .. } => message.clone(),
        }
    }
}

impl From<CoreError> for SyncError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Validation {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
