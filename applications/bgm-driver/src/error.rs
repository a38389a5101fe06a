/// Driver error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Unplayable audio file: {0}")]
    Probe(String),

    #[error("Playback error: {0}")]
    Playback(#[from] soul_bgm::BgmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for DriverError {
    fn from(err: config::ConfigError) -> Self {
        DriverError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for DriverError {
    fn from(err: toml::de::Error) -> Self {
        DriverError::Script(err.to_string())
    }
}
