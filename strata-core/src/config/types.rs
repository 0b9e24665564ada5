//! Configuration data structures.
//!
//! These structs are populated by deserializing `config.toml` (see
//! [`super::loader::ConfigLoader`]); fields missing from the file fall
//! back to the functions in [`super::defaults`]. Unknown fields are
//! rejected.

use super::defaults;
use crate::types::RectInt;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for the logging subsystem.
///
/// Consumed by [`crate::logging::init_logging`] to set up the global
/// `tracing` subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path of a log file. `None` disables file logging.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// Format of log messages written to the file: "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Physical screen geometry.
///
/// The visibility tracker and the compositing engine need the full screen
/// rectangle to decide coverage; it is configuration rather than a runtime
/// query because the engine is display-server agnostic.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScreenConfig {
    /// Screen width in pixels.
    #[serde(default = "defaults::default_screen_width")]
    pub width: i32,
    /// Screen height in pixels.
    #[serde(default = "defaults::default_screen_height")]
    pub height: i32,
}

impl ScreenConfig {
    /// The full screen rectangle at the natural orientation.
    pub fn rect(&self) -> RectInt {
        RectInt::new(0, 0, self.width, self.height)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        defaults::default_screen_config()
    }
}

/// Root configuration for the Strata core system.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Logging subsystem configuration.
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    /// Screen geometry.
    #[serde(default = "defaults::default_screen_config")]
    pub screen: ScreenConfig,
}
