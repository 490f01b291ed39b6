//! Error types for the filter engine

use pkgsift_core::CoreError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid replay script: {message}")]
    InvalidScript { message: String },

    #[error("Debounce of {delay:?} does not fit in the clock")]
    DeadlineOverflow { delay: Duration },

    #[error("Failed to parse replay script: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
