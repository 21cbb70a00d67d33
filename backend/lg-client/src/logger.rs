use crate::error::{ClientError, Result as ClientErrorResult};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: lg_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ClientErrorResult<()> {
    let level_filter = log_level.0;

    let dispatch = match log_file {
        Some(ref log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| ClientError::Logger {
                    message: format!("Failed to open log file {}: {}", log_path.display(), e),
                })?;

            plain_format().chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{file}:{line}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = colors.color(record.level()),
                        message = message,
                        file = record.file().unwrap_or("unknown"),
                        line = record.line().unwrap_or(0),
                    ))
                })
                .chain(std::io::stdout())
        }
        None => plain_format().chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(dispatch)
        .apply()
        .map_err(|e| ClientError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

/// Uncolored format for files and non-TTY stdout
fn plain_format() -> Dispatch {
    Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = record.level(),
            message = message,
            file = record.file().unwrap_or("unknown"),
            line = record.line().unwrap_or(0),
        ))
    })
}
