//! Priority bands: the pure ranking function behind the stacking order.
//!
//! Every window maps to a [`StackingLevel`], a fixed-point band value
//! (ten units per stacking-layer step). Bands, lowest first: desktop,
//! default content, system-modal dialogs, layer 1 and up, with the
//! elevated band (input methods, override-redirect, keep-above) and the
//! notification band wedged between layers 3/4 and 5/6 respectively.
//!
//! The asymmetry is deliberate and scenario-confirmed: a layer >= 1
//! window outranks a system-modal dialog, while the system-modal dialog
//! outranks all ordinary dialogs and applications.

use crate::registry::{WindowRegistry, WindowHandle, WindowType};
use crate::transiency::TransiencyGraph;

/// A window's priority band, comparable across all windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackingLevel(i16);

impl StackingLevel {
    /// The desktop floor, below all other content.
    pub const DESKTOP: StackingLevel = StackingLevel(-10);
    /// Default band for applications, dialogs, and splash screens.
    pub const DEFAULT: StackingLevel = StackingLevel(0);
    /// System-modal dialogs: above ordinary content, below layer 1.
    pub const SYSTEM_MODAL: StackingLevel = StackingLevel(5);
    /// Input methods, override-redirect windows, and keep-above windows.
    pub const ELEVATED: StackingLevel = StackingLevel(40);
    /// Notification banners.
    pub const NOTIFICATION: StackingLevel = StackingLevel(55);

    /// The band of an explicit stacking layer (1 and up).
    pub fn from_layer(layer: u8) -> Self {
        StackingLevel(i16::from(layer) * 10)
    }
}

/// Computes the effective priority band of a window.
///
/// An explicit stacking layer always wins. A window without one inherits
/// the band of its closest visible transient ancestor: a transient
/// window rides its owner regardless of type. Only windows with neither
/// fall through to the type-based defaults.
pub fn effective_level(
    handle: WindowHandle,
    registry: &WindowRegistry,
    graph: &TransiencyGraph,
) -> StackingLevel {
    let Ok(attrs) = registry.get(handle) else {
        return StackingLevel::DEFAULT;
    };
    if attrs.stacking_layer > 0 {
        return StackingLevel::from_layer(attrs.stacking_layer);
    }
    if attrs.window_type == WindowType::Desktop {
        return StackingLevel::DESKTOP;
    }
    if let Some(parent) = graph.last_visible_parent(handle, registry) {
        return effective_level(parent, registry, graph);
    }
    match attrs.window_type {
        WindowType::Notification => StackingLevel::NOTIFICATION,
        WindowType::Input | WindowType::OverrideRedirect => StackingLevel::ELEVATED,
        _ if attrs.always_on_top => StackingLevel::ELEVATED,
        WindowType::Dialog if attrs.modal => StackingLevel::SYSTEM_MODAL,
        _ => StackingLevel::DEFAULT,
    }
}
