use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("{category} error: {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Create a config error
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::generic("Config", message)
    }

    /// Create a simulation settings error
    #[track_caller]
    pub fn simulation<S: Into<String>>(message: S) -> Self {
        Self::generic("Simulation", message)
    }

    /// Create a store settings error
    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::generic("Store", message)
    }

    /// Create a client settings error
    #[track_caller]
    pub fn client<S: Into<String>>(message: S) -> Self {
        Self::generic("Client", message)
    }

    /// Create a logging error
    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::generic("Logging", message)
    }

    #[track_caller]
    fn generic<S: Into<String>>(category: &'static str, message: S) -> Self {
        ConfigError::Generic {
            category,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl serde::de::Error for ConfigError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        ConfigError::generic("Serde", msg.to_string())
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
