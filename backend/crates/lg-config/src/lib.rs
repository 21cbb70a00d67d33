mod client_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod simulation_config;
mod store_config;
mod validation_config;

#[cfg(test)]
mod tests;

pub use client_config::ClientConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use simulation_config::SimulationConfig;
pub use store_config::StoreConfig;
pub use validation_config::ValidationConfig;

const CONFIG_DIR_ENV: &str = "LG_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".livegps";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
