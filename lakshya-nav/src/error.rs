//! Error types for LakshyaNav

use thiserror::Error;

/// LakshyaNav error type
#[derive(Error, Debug)]
pub enum LakshyaError {
    #[error("Hardware error: {0}")]
    Hal(#[from] drishti_io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan error: {0}")]
    Scan(String),
}

impl From<toml::de::Error> for LakshyaError {
    fn from(e: toml::de::Error) -> Self {
        LakshyaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LakshyaError>;
