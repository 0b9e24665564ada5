//! Error handling for the Strata core layer.
//!
//! This module defines the error types shared by the foundational services
//! of the Strata window manager. The main error type is [`CoreError`],
//! which wraps the more specific [`ConfigError`] and [`LoggingError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Strata foundation layer.
///
/// Used as the common error type of `strata-core`, usually by wrapping a
/// more specific error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur during the initialization of the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// Filesystem operations that are not covered by a more specific
    /// configuration or logging error.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by other variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided to a core function.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file as TOML.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value failed validation after parsing.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// No configuration file was found at any of the expected locations.
    #[error("Configuration file not found at expected locations: {locations:?}")]
    NotFound { locations: Vec<PathBuf> },

    /// A required base directory (e.g. the XDG config home) could not be
    /// determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to initialize the logging system.
    #[error("Failed to initialize logging: {0}")]
    InitializationError(String),

    /// Failed to set or parse a log filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    /// An I/O error occurred during logging.
    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}
