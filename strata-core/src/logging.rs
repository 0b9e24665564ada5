//! Logging setup for the Strata core layer.
//!
//! Built on the `tracing` ecosystem: a console layer filtered through
//! `RUST_LOG`/configuration, plus an optional non-blocking file layer in
//! text or JSON format.

use crate::config::LoggingConfig;
use crate::error::CoreError;
use crate::utils;

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests and early startup before configuration is loaded.
/// Filters via `RUST_LOG`, defaulting to "info". Errors (e.g. a global
/// subscriber already being set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Holds the file logger's worker guard for the lifetime of the process
/// so buffered log lines are flushed on shutdown.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Creates the file logging layer with a daily-rolling appender.
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("strata.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: Box<dyn Layer<Registry> + Send + Sync + 'static> =
        if format.eq_ignore_ascii_case("json") {
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::layer().with_writer(writer).with_ansi(false).boxed()
        };
    Ok((layer, guard))
}

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// Installs a `stderr` layer and, when `file_path` is set, a non-blocking
/// file layer whose worker guard is stashed for the process lifetime.
///
/// # Errors
///
/// Returns `CoreError::LoggingInitialization` when the level is invalid
/// or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoreError> {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            return Err(CoreError::LoggingInitialization(format!(
                "invalid log level '{}'",
                other
            )));
        }
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_filter(EnvFilter::new(level.to_string()))
        .boxed();

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = vec![console_layer];
    let mut file_guard: Option<WorkerGuard> = None;
    if let Some(path) = &config.file_path {
        let (layer, guard) = create_file_layer(path, &config.format)?;
        layers.push(layer.with_filter(EnvFilter::new(level.to_string())).boxed());
        file_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();

    if result.is_ok() {
        *LOG_WORKER_GUARD
            .lock()
            .expect("log worker guard mutex poisoned") = file_guard;
    }

    result.map_err(|e| CoreError::LoggingInitialization(e.to_string()))
}
