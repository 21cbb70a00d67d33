use crate::{ConfigError, ConfigErrorResult};

use lg_core::DEFAULT_MAX_DISPLAY_NAME_LENGTH;
use serde::Deserialize;

pub const MIN_DISPLAY_NAME_LENGTH: usize = 1;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 500;

/// Input limits applied before a broadcast session starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum display name length, in characters
    pub max_display_name_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_display_name_length: DEFAULT_MAX_DISPLAY_NAME_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_display_name_length < MIN_DISPLAY_NAME_LENGTH
            || self.max_display_name_length > MAX_DISPLAY_NAME_LENGTH
        {
            return Err(ConfigError::config(format!(
                "validation.max_display_name_length must be {}-{}, got {}",
                MIN_DISPLAY_NAME_LENGTH, MAX_DISPLAY_NAME_LENGTH, self.max_display_name_length
            )));
        }

        Ok(())
    }
}
