pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::broadcast_record::BroadcastRecord;
pub use models::coordinates::Coordinates;
pub use models::display_name::validate_display_name;
pub use models::identity::Identity;

#[cfg(test)]
mod tests;

/// Starting point for simulated walks and the observer's empty-map center.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    latitude: 40.741895,
    longitude: -73.989308,
};

/// Spread (degrees) of a simulated walk's starting point around
/// `DEFAULT_COORDINATES`, about 1km at the equator.
pub const COORDINATE_VARIATION: f64 = 0.02;

/// Spread (degrees) of each simulated step, about 100m at the equator.
pub const SIMULATION_STEP: f64 = 0.001;

/// Fixed cadence of simulated samples.
pub const SIMULATION_TICK_INTERVAL_MS: u64 = 2000;

/// Store collection holding one record per active broadcaster.
pub const LOCATIONS_COLLECTION: &str = "locations";

/// Longest display name a broadcaster accepts unless configured otherwise.
pub const DEFAULT_MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Buffered change notifications per collection.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Label shown for records without a usable display name.
pub const ANONYMOUS_LABEL: &str = "Anonymous";
