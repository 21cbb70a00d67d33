use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Config error: {0}")]
    Config(#[from] lg_config::ConfigError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
