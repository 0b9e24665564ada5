//! The control loop service: atomic request application and the
//! published snapshot.

mod manager;
#[cfg(test)]
mod manager_tests;
mod state;
mod types;

pub use manager::{DefaultWindowManagerService, WindowManagerService};
pub use state::EngineState;
pub use types::{CreateWindowSpec, DeviceState, PropertyChange, StackRow, StackSnapshot};
