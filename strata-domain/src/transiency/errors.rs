use thiserror::Error;

use crate::registry::WindowHandle;

/// Errors of the transiency graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransiencyError {
    /// A window cannot be transient for itself.
    #[error("Window {0} cannot be transient for itself.")]
    SelfReference(WindowHandle),

    /// The requested edge would close a cycle longer than the direct
    /// pair, which has no standard resolution.
    #[error("Making {child} transient for {parent} would create a transiency cycle.")]
    Cycle {
        child: WindowHandle,
        parent: WindowHandle,
    },
}
