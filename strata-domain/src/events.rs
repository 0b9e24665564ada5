//! Domain events published by the control loop.

use strata_core::types::OrientationAngle;

use crate::compositing::RenderMode;
use crate::registry::WindowHandle;
use crate::visibility::Visibility;

/// An observable state change, broadcast after a committed recompute.
///
/// Observers only ever see post-recompute state: events for one request
/// are published together, after the new snapshot is in place.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
    /// A window was created.
    WindowCreated { handle: WindowHandle },
    /// A window was destroyed.
    WindowDestroyed { handle: WindowHandle },
    /// The stacking order changed. Carries the new order, front to back.
    StackingChanged { order: Vec<WindowHandle> },
    /// A window's visibility changed.
    VisibilityChanged {
        handle: WindowHandle,
        visibility: Visibility,
    },
    /// A window's render mode changed.
    RenderModeChanged {
        handle: WindowHandle,
        mode: RenderMode,
    },
    /// The screen orientation changed.
    OrientationChanged { angle: OrientationAngle },
    /// The derived current-application changed.
    CurrentApplicationChanged { handle: Option<WindowHandle> },
}
