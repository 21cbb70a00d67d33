//! Geographic position value type.

use crate::{CoreError, Result as CoreErrorResult};

use serde::{Deserialize, Serialize};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting non-finite or out-of-range values.
    #[track_caller]
    pub fn new(latitude: f64, longitude: f64) -> CoreErrorResult<Self> {
        let coordinates = Self {
            latitude,
            longitude,
        };

        if !coordinates.is_valid() {
            return Err(CoreError::invalid_coordinates(latitude, longitude));
        }

        Ok(coordinates)
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }

    /// Shift by the given per-axis offsets. The result is not range checked.
    pub fn offset(&self, delta_latitude: f64, delta_longitude: f64) -> Self {
        Self {
            latitude: self.latitude + delta_latitude,
            longitude: self.longitude + delta_longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
