//! BroadcastRecord - the full published state of one active broadcaster.

use crate::{ANONYMOUS_LABEL, Coordinates, CoreError, Identity, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per broadcasting identity, stored under `id`.
/// Every write replaces the record wholesale; fields are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRecord {
    pub id: Identity,
    #[serde(rename = "name")]
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// When the sample behind this record was produced (source clock)
    pub timestamp: DateTime<Utc>,
    pub is_simulated: bool,
}

impl BroadcastRecord {
    /// Build a record from a sample, rejecting invalid coordinates.
    #[track_caller]
    pub fn new(
        id: Identity,
        display_name: String,
        coordinates: Coordinates,
        timestamp: DateTime<Utc>,
        is_simulated: bool,
    ) -> CoreErrorResult<Self> {
        if !coordinates.is_valid() {
            return Err(CoreError::invalid_coordinates(
                coordinates.latitude,
                coordinates.longitude,
            ));
        }

        Ok(Self {
            id,
            display_name,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            timestamp,
            is_simulated,
        })
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Check a record received from elsewhere (e.g. decoded from a store).
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.display_name.trim().is_empty() {
            return Err(CoreError::validation("name", "display name is empty"));
        }
        if !self.coordinates().is_valid() {
            return Err(CoreError::invalid_coordinates(self.latitude, self.longitude));
        }
        Ok(())
    }

    /// Display name, or "Anonymous" when blank.
    pub fn label(&self) -> &str {
        let trimmed = self.display_name.trim();
        if trimmed.is_empty() {
            ANONYMOUS_LABEL
        } else {
            trimmed
        }
    }

    /// Uppercased first character of the display name, `'?'` when blank.
    pub fn initial(&self) -> char {
        self.display_name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}
