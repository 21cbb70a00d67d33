use crate::{DEFAULT_LOG_COLORED, DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_LEVEL, LogLevel};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Colored stdout output (ignored when logging to a file)
    pub colored: bool,
    /// Log directory, relative to the config dir
    pub dir: String,
    /// Log file name inside `dir`; None logs to stdout
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: DEFAULT_LOG_COLORED,
            dir: String::from(DEFAULT_LOG_DIRECTORY),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Log paths stay inside the config dir.
    pub fn validate(&self) -> crate::ConfigErrorResult<()> {
        let escapes = |value: &str| {
            std::path::Path::new(value).is_absolute() || value.contains("..")
        };

        if escapes(&self.dir) {
            return Err(crate::ConfigError::logging(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        if let Some(ref file) = self.file {
            if file.is_empty() || file.contains('/') || file.contains('\\') || escapes(file) {
                return Err(crate::ConfigError::logging(format!(
                    "logging.file must be a plain file name, got {file:?}"
                )));
            }
        }

        Ok(())
    }
}
