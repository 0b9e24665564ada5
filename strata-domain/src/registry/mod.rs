//! The window registry: identity, attributes, and lifecycle of known
//! windows.

mod errors;
#[allow(clippy::module_inception)]
mod registry;
mod types;

pub use errors::RegistryError;
pub use registry::WindowRegistry;
pub use types::{
    OpaqueOverride, StackPlacement, StackRequest, WindowAttributes, WindowHandle, WindowState,
    WindowType,
};
