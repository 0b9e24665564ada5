//! Configuration management for the Strata core layer.

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, ScreenConfig};
