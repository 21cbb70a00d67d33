use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MAX_CLIENT_BROADCASTERS: usize = 100;

/// What the bundled client process runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// One simulated broadcaster is started per name
    pub display_names: Vec<String>,
    /// Stop after N seconds (0 = run until Ctrl+C)
    pub run_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            display_names: vec![String::from("Alice"), String::from("Bob")],
            run_secs: 0,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self, max_display_name_length: usize) -> ConfigErrorResult<()> {
        if self.display_names.len() > MAX_CLIENT_BROADCASTERS {
            return Err(ConfigError::client(format!(
                "client.display_names supports at most {} entries, got {}",
                MAX_CLIENT_BROADCASTERS,
                self.display_names.len()
            )));
        }

        for name in &self.display_names {
            lg_core::validate_display_name(name, max_display_name_length)
                .map_err(|e| ConfigError::client(format!("client.display_names: {e}")))?;
        }

        Ok(())
    }
}
