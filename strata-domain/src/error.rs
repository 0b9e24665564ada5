//! Error handling for the Strata domain layer.
//!
//! Each component defines its own error enum; [`DomainError`] aggregates
//! them for the service facade.

use crate::registry::RegistryError;
use crate::stacking::StackingError;
use crate::transiency::TransiencyError;
use thiserror::Error;

/// Domain-level error type aggregating the component errors.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Window registry errors (unknown handles, duplicate desktop).
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Transiency graph errors (self-reference, unresolvable cycles).
    #[error("Transiency error: {0}")]
    Transiency(#[from] TransiencyError),

    /// Stacking engine errors. These indicate broken internal invariants
    /// and are logged loudly before being surfaced.
    #[error("Stacking error: {0}")]
    Stacking(#[from] StackingError),

    /// Catch-all for unexpected internal errors in the domain layer.
    #[error("Internal domain error: {0}")]
    Internal(String),
}
