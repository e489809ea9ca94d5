//! Error types for the chat sentiment pipeline

use crate::utils::config::ConfigError;
use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// A record reached day aggregation with a timestamp that has no usable date
    #[error("Malformed timestamp {timestamp:?} in record #{index}: {reason}")]
    DataFormat {
        index: usize,
        timestamp: String,
        reason: String,
    },

    /// A keyword is empty or cannot be turned into a search pattern
    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),

    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Index of the offending input record, if the error is tied to one
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Error::DataFormat { index, .. } => Some(*index),
            _ => None,
        }
    }
}
