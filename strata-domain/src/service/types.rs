//! Request and snapshot types of the window-control and state-reporting
//! protocols.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strata_core::types::{OrientationAngle, RectInt};

use crate::compositing::RenderMode;
use crate::registry::{OpaqueOverride, WindowHandle, WindowType};
use crate::visibility::Visibility;

/// Attributes requested when creating a window.
///
/// Everything not present here starts unset and is changed later through
/// [`PropertyChange`] requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWindowSpec {
    /// The window type.
    pub window_type: WindowType,
    /// Initial screen geometry.
    pub geometry: RectInt,
    /// Transient owner, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient_for: Option<WindowHandle>,
    /// Whether the window is modal.
    #[serde(default)]
    pub modal: bool,
    /// Whether the window has an ARGB visual.
    #[serde(default)]
    pub has_alpha: bool,
    /// Whether the window wants server-side decoration.
    #[serde(default)]
    pub decorated: bool,
    /// Whether the window claims the whole screen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Keep-above hint.
    #[serde(default)]
    pub always_on_top: bool,
    /// Stacking layer hint (0 = unset).
    #[serde(default)]
    pub stacking_layer: u8,
}

impl CreateWindowSpec {
    /// A spec with the given type and geometry and every hint unset.
    pub fn new(window_type: WindowType, geometry: RectInt) -> Self {
        Self {
            window_type,
            geometry,
            transient_for: None,
            modal: false,
            has_alpha: false,
            decorated: false,
            fullscreen: false,
            always_on_top: false,
            stacking_layer: 0,
        }
    }
}

/// A named property change on an existing window.
///
/// Mirrors the property side of the window-control protocol; an invalid
/// or absent value is expressed as the variant's unset form (e.g.
/// `OpaqueOverride(Unset)`), reverting to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyChange {
    /// Opacity override hint.
    OpaqueOverride(OpaqueOverride),
    /// Low-power mode hint.
    LowPowerMode(bool),
    /// Refuse-iconification hint.
    CannotMinimize(bool),
    /// Stacking layer (0 clears it).
    StackingLayer(u8),
    /// Statusbar geometry painted by the window itself.
    StatusbarGeometry(Option<RectInt>),
    /// Keep-above hint.
    AlwaysOnTop(bool),
    /// Modality.
    Modal(bool),
    /// Fullscreen state.
    Fullscreen(bool),
    /// Move/resize.
    Geometry(RectInt),
}

/// External device state feeding the policy: display power and ongoing
/// calls are inputs of the visibility and decoration rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    /// Whether the display is powered off.
    pub display_off: bool,
    /// Whether a call is ongoing; fullscreen windows that do not paint
    /// their own statusbar are decorated while one is.
    pub ongoing_call: bool,
}

/// One row of the reported stack, front to back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRow {
    /// The window.
    pub handle: WindowHandle,
    /// Its type.
    pub window_type: WindowType,
    /// Whether the window is mapped and part of the viewable stack.
    pub viewable: bool,
    /// Render mode; `None` while unmapped.
    pub render_mode: Option<RenderMode>,
    /// Visibility; `None` while unmapped.
    pub visibility: Option<Visibility>,
}

/// The published state of the engine after a committed recompute.
///
/// Always reflects the most recent commit; observers never see partial
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// All known windows, front to back, including unmapped ones.
    pub rows: Vec<StackRow>,
    /// The active screen orientation.
    pub orientation: OrientationAngle,
    /// The derived current application, if any.
    pub current_app: Option<WindowHandle>,
    /// When this snapshot was committed.
    pub computed_at: DateTime<Utc>,
}

impl StackSnapshot {
    /// All handles, front to back.
    pub fn order(&self) -> Vec<WindowHandle> {
        self.rows.iter().map(|r| r.handle).collect()
    }

    /// Mapped handles only, front to back.
    pub fn viewable_order(&self) -> Vec<WindowHandle> {
        self.rows
            .iter()
            .filter(|r| r.viewable)
            .map(|r| r.handle)
            .collect()
    }

    /// The row of a specific window.
    pub fn row(&self, handle: WindowHandle) -> Option<&StackRow> {
        self.rows.iter().find(|r| r.handle == handle)
    }
}
