//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use pkgsift_core::CoreError;
use pkgsift_engine::EngineError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Catalog could not be loaded
    #[error("Catalog error: {message}")]
    #[diagnostic(code(pkgsift::cli::catalog))]
    Catalog {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    #[diagnostic(code(pkgsift::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Filter could not be applied
    #[error("Filter error: {message}")]
    #[diagnostic(code(pkgsift::cli::filter))]
    Filter {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Invalid command line input
    #[error("{message}")]
    #[diagnostic(code(pkgsift::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(pkgsift::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(pkgsift::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Catalog { .. } => exit_codes::CATALOG_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Filter { .. } => exit_codes::FILTER_ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a usage error (user provided invalid input)
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: None,
        }
    }

    /// Create a filter error with help text
    pub fn filter_with_help(message: impl Into<String>, help: Option<String>) -> Self {
        Self::Filter {
            message: message.into(),
            help,
        }
    }

    /// Wrap a config loading failure
    pub fn config(err: CoreError) -> Self {
        Self::Config {
            message: err.to_string(),
            help: Some("Check `ownPackages` and `debounce` in the config file".to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CatalogNotFound { .. } => CliError::Catalog {
                message: err.to_string(),
                help: Some("Pass the path to a catalog YAML or JSON file".to_string()),
            },
            CoreError::InvalidCatalog { .. }
            | CoreError::YamlParse(_)
            | CoreError::JsonParse(_) => CliError::Catalog {
                message: err.to_string(),
                help: None,
            },
            CoreError::MissingField { .. } => {
                let help = err.suggestion().map(str::to_string);
                CliError::Filter {
                    message: err.to_string(),
                    help,
                }
            }
            CoreError::InvalidConfig { .. } => CliError::config(err),
            CoreError::InvalidFragment { .. } => CliError::Usage {
                message: err.to_string(),
                help: None,
            },
            CoreError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Core(e) => e.into(),
            EngineError::DeadlineOverflow { .. } => CliError::Config {
                message: err.to_string(),
                help: Some("Lower `debounce` in the config file".to_string()),
            },
            EngineError::InvalidScript { .. } | EngineError::Yaml(_) => CliError::Usage {
                message: err.to_string(),
                help: Some("Scripts are YAML lists of `{at, type, ...}` steps".to_string()),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
