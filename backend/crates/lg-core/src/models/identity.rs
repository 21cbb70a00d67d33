use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque per-session broadcaster identity. Doubles as the store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Fresh random identity, as an anonymous sign-in would hand out.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    #[track_caller]
    pub fn parse(value: &str) -> CoreErrorResult<Self> {
        if value.trim().is_empty() {
            return Err(CoreError::InvalidIdentity {
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
