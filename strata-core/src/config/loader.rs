//! Configuration loading and validation.
//!
//! [`ConfigLoader`] locates `config.toml` in the platform configuration
//! directory, parses it, applies defaults for missing sections, and
//! validates the result. A missing file is not an error: the default
//! configuration is used, so a first boot works without any provisioning.

use std::fs;
use std::path::PathBuf;

use directories_next::ProjectDirs;

use super::CoreConfig;
use crate::error::{ConfigError, CoreError};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Namespace struct for configuration loading logic.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Config` when the file exists but cannot be
    /// read, parsed, or validated.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = Self::config_file_path()?;
        Self::load_from_path(path)
    }

    /// Loads and validates the configuration from an explicit path.
    ///
    /// A nonexistent file yields the default configuration.
    pub fn load_from_path(path: PathBuf) -> Result<CoreConfig, CoreError> {
        let config = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str::<CoreConfig>(&content)
                .map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CoreConfig::default(),
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError { path, source: e }));
            }
        };
        Self::validate(&config)?;
        Ok(config)
    }

    /// Location of the application configuration file.
    fn config_file_path() -> Result<PathBuf, CoreError> {
        let dirs = ProjectDirs::from("org", "strata-wm", "strata").ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "XDG config home".to_string(),
            })
        })?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Checks the invariants a parsed configuration must uphold.
    fn validate(config: &CoreConfig) -> Result<(), CoreError> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        const FORMATS: [&str; 2] = ["text", "json"];

        let level = config.logging.level.to_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "unknown log level '{}'",
                config.logging.level
            ))));
        }
        let format = config.logging.format.to_lowercase();
        if !FORMATS.contains(&format.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "unknown log format '{}'",
                config.logging.format
            ))));
        }
        if config.screen.width <= 0 || config.screen.height <= 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "screen geometry must be positive, got {}x{}",
                config.screen.width, config.screen.height
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from_path(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.screen.width, 864);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let (_dir, path) = write_config(
            r#"
            [logging]
            level = "trace"
            format = "json"

            [screen]
            width = 1024
            height = 600
            "#,
        );
        let config = ConfigLoader::load_from_path(path).unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.screen.height, 600);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let (_dir, path) = write_config(
            r#"
            [logging]
            level = "verbose"
            "#,
        );
        let err = ConfigLoader::load_from_path(path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_invalid_screen_is_rejected() {
        let (_dir, path) = write_config(
            r#"
            [screen]
            width = 0
            "#,
        );
        assert!(ConfigLoader::load_from_path(path).is_err());
    }

    #[test]
    fn test_garbage_toml_is_a_parse_error() {
        let (_dir, path) = write_config("not really = [ toml");
        let err = ConfigLoader::load_from_path(path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseError(_))));
    }
}
