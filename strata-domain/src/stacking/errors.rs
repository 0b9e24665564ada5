use thiserror::Error;

use crate::registry::WindowHandle;

/// Errors of the stacking engine.
///
/// These indicate broken internal invariants: the registry and the
/// stacking list are kept in lockstep by the control loop, so neither
/// variant is reachable through the public protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackingError {
    /// A window in the stacking list is unknown to the registry.
    #[error("Window {0} is in the stacking order but not in the registry.")]
    UnknownWindow(WindowHandle),

    /// The recomputed order lost or duplicated windows.
    #[error("Stacking produced a non-total order ({got} of {expected} windows).")]
    NonTotalOrder { expected: usize, got: usize },
}
