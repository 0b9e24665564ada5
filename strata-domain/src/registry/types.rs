//! Window identity and attribute types.

use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::types::RectInt;

/// Opaque handle identifying a window.
///
/// Handles are allocated serially by the registry, so a handle also
/// encodes creation order; the stacking engine relies on that for
/// tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowHandle(pub(crate) u64);

impl WindowHandle {
    /// The raw handle value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// The type of a window, as requested at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowType {
    /// The home screen. At most one desktop window may exist; it is the
    /// stacking floor when nothing else claims precedence.
    Desktop,
    /// Ordinary application content.
    #[default]
    Application,
    /// A dialog. Modal dialogs without a transient owner are
    /// system-modal and block the whole window set below them.
    Dialog,
    /// An input method window (e.g. a virtual keyboard).
    Input,
    /// A notification banner.
    Notification,
    /// A dock window.
    Dock,
    /// The decorator providing server-side window chrome.
    Decorator,
    /// A window that manages its own stacking outside normal policy
    /// (menus, tooltips).
    OverrideRedirect,
    /// A splash screen shown while an application starts.
    Splash,
}

/// Mapping lifecycle state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowState {
    /// Not mapped and not iconified.
    #[default]
    Withdrawn,
    /// Mapped and part of the normal stack.
    Normal,
    /// Iconified: still known and stacked, but demoted below the desktop.
    Iconic,
}

/// External opacity hint overriding the window's visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OpaqueOverride {
    /// No override; the alpha rule applies.
    #[default]
    Unset,
    /// Treat the window as opaque even if it has an alpha channel.
    ForceOpaque,
    /// Treat the window as transparent even without an alpha channel.
    ForceTransparent,
}

/// Direction of an explicit stacking request relative to a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackPlacement {
    /// Stack above the sibling (or to the top of the band).
    Above,
    /// Stack below the sibling (or to the bottom of the band).
    Below,
}

/// An explicit client stacking request.
///
/// Persisted across map/unmap and re-applied verbatim when the window is
/// mapped again. A `sibling` of `None` means the extremum of the
/// window's own band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRequest {
    /// The sibling to stack relative to, if any.
    pub sibling: Option<WindowHandle>,
    /// Whether to stack above or below.
    pub placement: StackPlacement,
}

/// The full attribute record of a known window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowAttributes {
    /// Window type, fixed at creation.
    pub window_type: WindowType,
    /// Screen geometry.
    pub geometry: RectInt,
    /// Whether the window is currently mapped.
    pub mapped: bool,
    /// Mapping lifecycle state.
    pub window_state: WindowState,
    /// The transient owner, mirroring the transiency graph. The graph is
    /// authoritative; this field is kept in sync by the registry.
    pub transient_for: Option<WindowHandle>,
    /// Whether the window is modal.
    pub modal: bool,
    /// Stacking layer hint; 0 means unset, higher values claim more
    /// system-like priority bands.
    pub stacking_layer: u8,
    /// External opacity override.
    pub opaque_override: OpaqueOverride,
    /// Low-power mode hint: the window stays visible on a dimmed display
    /// and wants direct rendering.
    pub low_power_mode: bool,
    /// Whether the window has an ARGB visual.
    pub has_alpha: bool,
    /// Whether the window wants server-side decoration.
    pub decorated: bool,
    /// Whether the window claims the whole screen.
    pub fullscreen: bool,
    /// Keep-above hint.
    pub always_on_top: bool,
    /// Statusbar geometry painted by the window itself; a window that
    /// paints its own statusbar is not decorated during an ongoing call.
    pub statusbar_geometry: Option<RectInt>,
    /// Whether iconification requests must be refused.
    pub cannot_minimize: bool,
    /// Persisted explicit stacking request.
    pub stack_request: Option<StackRequest>,
}

impl WindowAttributes {
    /// Creates an attribute record with the given type and geometry and
    /// all hints unset.
    pub fn new(window_type: WindowType, geometry: RectInt) -> Self {
        Self {
            window_type,
            geometry,
            mapped: false,
            window_state: WindowState::Withdrawn,
            transient_for: None,
            modal: false,
            stacking_layer: 0,
            opaque_override: OpaqueOverride::Unset,
            low_power_mode: false,
            has_alpha: false,
            decorated: false,
            fullscreen: false,
            always_on_top: false,
            statusbar_geometry: None,
            cannot_minimize: false,
            stack_request: None,
        }
    }

    /// Whether the window blocks the entire window set below it: modal
    /// with no transient owner.
    pub fn is_system_modal(&self) -> bool {
        self.modal && self.transient_for.is_none()
    }

    /// Whether the window paints its own statusbar.
    pub fn paints_own_statusbar(&self) -> bool {
        self.statusbar_geometry
            .map(|r| !r.is_empty())
            .unwrap_or(false)
    }

    /// Effective opacity after applying the override: an opaque window
    /// hides everything behind it.
    pub fn is_opaque(&self) -> bool {
        match self.opaque_override {
            OpaqueOverride::ForceOpaque => true,
            OpaqueOverride::ForceTransparent => false,
            OpaqueOverride::Unset => !self.has_alpha,
        }
    }
}
