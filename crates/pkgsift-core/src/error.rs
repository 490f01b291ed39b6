//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: String },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Package '{package}' has no field '{field}'")]
    MissingField {
        package: String,
        field: String,
        suggestion: Option<String>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid URL fragment: {message}")]
    InvalidFragment { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Suggestion text attached to this error, if any
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            CoreError::MissingField { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
