use thiserror::Error;

use super::types::WindowHandle;

/// Errors of the window registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The referenced window is unknown or already destroyed.
    #[error("Window {0} is not known to the registry.")]
    NotFound(WindowHandle),

    /// A desktop window already exists; there can be only one.
    #[error("A desktop window already exists ({0}).")]
    DuplicateDesktop(WindowHandle),
}
