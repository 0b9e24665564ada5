//! Default configuration values.
//!
//! These functions back the `serde` `default` attributes in the
//! configuration structures so that a partially specified `config.toml`
//! still yields a complete [`CoreConfig`](super::CoreConfig).

use super::{LoggingConfig, ScreenConfig};
use std::path::PathBuf;

/// Default `LoggingConfig`, used when the `logging` section is missing.
pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

/// Default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Default log file path (`None`, file logging disabled).
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Default `ScreenConfig`, used when the `screen` section is missing.
///
/// 864x480 is the panel of the reference handset hardware.
pub(super) fn default_screen_config() -> ScreenConfig {
    ScreenConfig {
        width: default_screen_width(),
        height: default_screen_height(),
    }
}

/// Default screen width in pixels.
pub(super) fn default_screen_width() -> i32 {
    864
}

/// Default screen height in pixels.
pub(super) fn default_screen_height() -> i32 {
    480
}
