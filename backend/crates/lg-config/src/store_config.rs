use crate::{ConfigError, ConfigErrorResult};

use lg_core::{DEFAULT_CHANNEL_CAPACITY, LOCATIONS_COLLECTION};
use serde::Deserialize;

// Notification buffer per collection
pub const MIN_CHANNEL_CAPACITY: usize = 1;
pub const MAX_CHANNEL_CAPACITY: usize = 10000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection holding broadcast records
    pub collection: String,
    /// Buffered notifications per collection before slow observers resync
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: String::from(LOCATIONS_COLLECTION),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.collection.trim().is_empty() {
            return Err(ConfigError::store("store.collection cannot be empty"));
        }

        if self.channel_capacity < MIN_CHANNEL_CAPACITY
            || self.channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(ConfigError::store(format!(
                "store.channel_capacity must be {}-{}, got {}",
                MIN_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY, self.channel_capacity
            )));
        }

        Ok(())
    }
}
