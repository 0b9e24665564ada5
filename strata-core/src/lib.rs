//! # Strata Core Library (`strata-core`)
//!
//! `strata-core` is the foundational library of the Strata window
//! manager. It provides the shared building blocks the policy engine in
//! `strata-domain` is written against:
//!
//! - **Error Handling**: a unified error system through [`CoreError`]
//!   and the specific [`ConfigError`] and [`LoggingError`] types.
//! - **Core Data Types**: geometry primitives ([`Point`], [`Size`],
//!   [`Rect`], [`RectInt`]) and the screen [`OrientationAngle`].
//! - **Configuration**: TOML-based loading with defaults and validation
//!   through [`ConfigLoader`] and [`CoreConfig`].
//! - **Logging**: a `tracing`-based framework configurable for console
//!   and file output.
//!
//! ```rust,ignore
//! use strata_core::config::ConfigLoader;
//! use strata_core::error::CoreError;
//! use strata_core::logging::init_logging;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging)?;
//!     tracing::info!("strata core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, ScreenConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{OrientationAngle, Point, Rect, RectInt, Size};
