use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ClientConfig, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, SimulationConfig, StoreConfig, ValidationConfig,
};

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub store: StoreConfig,
    pub validation: ValidationConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for LG_CONFIG_DIR env var, else use ./.livegps/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply LG_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LG_CONFIG_DIR env var > ./.livegps/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.simulation.validate()?;
        self.store.validate()?;
        self.validation.validate()?;
        self.client
            .validate(self.validation.max_display_name_length)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Absolute log file path, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file))),
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  simulation: origin=({}, {}), variation={}, step={}",
            self.simulation.default_latitude,
            self.simulation.default_longitude,
            self.simulation.coordinate_variation,
            self.simulation.simulation_step
        );
        info!(
            "  store: collection={}, channel_capacity={}",
            self.store.collection, self.store.channel_capacity
        );
        info!(
            "  validation: max_display_name_length={}",
            self.validation.max_display_name_length
        );
        info!(
            "  client: broadcasters={:?}, run_secs={}",
            self.client.display_names, self.client.run_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Simulation
        Self::apply_env_parse(
            "LG_SIM_DEFAULT_LATITUDE",
            &mut self.simulation.default_latitude,
        );
        Self::apply_env_parse(
            "LG_SIM_DEFAULT_LONGITUDE",
            &mut self.simulation.default_longitude,
        );
        Self::apply_env_parse(
            "LG_SIM_COORDINATE_VARIATION",
            &mut self.simulation.coordinate_variation,
        );
        Self::apply_env_parse("LG_SIM_STEP", &mut self.simulation.simulation_step);

        // Store
        Self::apply_env_string("LG_STORE_COLLECTION", &mut self.store.collection);
        Self::apply_env_parse(
            "LG_STORE_CHANNEL_CAPACITY",
            &mut self.store.channel_capacity,
        );

        // Validation
        Self::apply_env_parse(
            "LG_MAX_DISPLAY_NAME_LENGTH",
            &mut self.validation.max_display_name_length,
        );

        // Client
        if let Ok(names) = std::env::var("LG_CLIENT_DISPLAY_NAMES") {
            self.client.display_names = names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
        }
        Self::apply_env_parse("LG_CLIENT_RUN_SECS", &mut self.client.run_secs);

        // Logging
        Self::apply_env_parse("LG_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LG_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LG_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(key: &str, target: &mut String) {
        if let Ok(value) = std::env::var(key) {
            *target = value;
        }
    }

    fn apply_env_option_string(key: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(key) {
            *target = if value.is_empty() { None } else { Some(value) };
        }
    }

    fn apply_env_bool(key: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(key) {
            *target = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    fn apply_env_parse<T: FromStr>(key: &str, target: &mut T) {
        if let Ok(value) = std::env::var(key) {
            match value.parse() {
                Ok(parsed) => *target = parsed,
                Err(_) => warn!("Ignoring {key}={value:?}: cannot parse"),
            }
        }
    }
}
