//! Error types for DrishtiIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DrishtiIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Measurement source has shut down
    #[error("Measurement channel closed")]
    ChannelClosed,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
