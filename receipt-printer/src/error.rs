//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// TCP connection to a network printer failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Device file could not be opened (unplugged, permissions, wrong path)
    #[error("Device {path} unavailable: {source}")]
    Device {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error while streaming a job
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connect or write did not finish in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
