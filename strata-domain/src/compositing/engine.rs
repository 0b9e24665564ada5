//! The compositing decision engine: composited or direct, per window.
//!
//! Compositing costs a copy of every frame, so the engine bypasses it
//! whenever the topmost content window can safely be scanned out
//! directly: fullscreen, effectively opaque, and undecorated. Anything
//! else keeps the whole stack redirected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strata_core::types::RectInt;
use tracing::debug;

use crate::registry::{
    OpaqueOverride, WindowAttributes, WindowHandle, WindowRegistry, WindowType,
};
use crate::transiency::TransiencyGraph;

/// How a window's pixels reach the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// The window is redirected and composited by the manager.
    Composited,
    /// The window is scanned out directly.
    Direct,
}

/// Whether a window's own visual demands compositing.
///
/// Decoration always does. An alpha visual does unless the opaque
/// override suppresses it or the window is in low-power mode (power
/// saving wins over blending fidelity). The transparent override forces
/// compositing even without an alpha visual.
pub fn needs_compositing(attrs: &WindowAttributes) -> bool {
    if attrs.decorated {
        return true;
    }
    if attrs.window_type == WindowType::Decorator
        && attrs.opaque_override != OpaqueOverride::ForceOpaque
    {
        return true;
    }
    match attrs.opaque_override {
        OpaqueOverride::ForceTransparent => true,
        OpaqueOverride::ForceOpaque => false,
        OpaqueOverride::Unset => attrs.has_alpha && !attrs.low_power_mode,
    }
}

/// Decides the render mode of every mapped window.
#[derive(Debug, Clone)]
pub struct CompositingEngine {
    screen: RectInt,
}

impl CompositingEngine {
    /// Creates an engine for the given screen rectangle.
    pub fn new(screen: RectInt) -> Self {
        Self { screen }
    }

    /// Recomputes render modes for the given bottom-to-top order.
    ///
    /// `decorated_window` is the window currently carrying the
    /// decorator, which forces it into compositing regardless of its own
    /// visual. The display's power state is deliberately not an input:
    /// low-power windows stay direct with the display off, and clearing
    /// the flag switches them back to composited even then.
    pub fn recompute(
        &self,
        order: &[WindowHandle],
        registry: &WindowRegistry,
        graph: &TransiencyGraph,
        decorated_window: Option<WindowHandle>,
    ) -> HashMap<WindowHandle, RenderMode> {
        let mut modes: HashMap<WindowHandle, RenderMode> = HashMap::new();
        for &handle in order {
            if registry.get(handle).map(|a| a.mapped).unwrap_or(false) {
                modes.insert(handle, RenderMode::Composited);
            }
        }

        let mut candidate = None;
        for &handle in order.iter().rev() {
            let Ok(attrs) = registry.get(handle) else {
                continue;
            };
            if !attrs.mapped {
                continue;
            }
            // An input method window composites its own owner: the input
            // window is scanned out directly while the owner (and
            // everything below) stays redirected.
            if attrs.window_type == WindowType::Input {
                if let Some(parent) = graph.parent_of(handle) {
                    if registry.get(parent).map(|a| a.mapped).unwrap_or(false) {
                        debug!(%handle, %parent, "input window renders direct over its owner");
                        modes.insert(handle, RenderMode::Direct);
                        return modes;
                    }
                }
            }
            if needs_compositing(attrs)
                || Some(handle) == decorated_window
                || !attrs.geometry.contains_rect(&self.screen)
            {
                // The topmost content window prevents direct rendering;
                // the whole stack stays composited.
                return modes;
            }
            candidate = Some(handle);
            break;
        }

        let Some(candidate) = candidate else {
            return modes;
        };
        debug!(window = %candidate, "topmost window renders direct");
        modes.insert(candidate, RenderMode::Direct);

        // Docks and override-redirect windows riding above the direct
        // window are scanned out with it.
        let candidate_pos = order
            .iter()
            .position(|h| *h == candidate)
            .unwrap_or(order.len());
        for &handle in &order[candidate_pos + 1..] {
            if let Ok(attrs) = registry.get(handle) {
                if attrs.mapped
                    && matches!(
                        attrs.window_type,
                        WindowType::Dock | WindowType::OverrideRedirect
                    )
                {
                    modes.insert(handle, RenderMode::Direct);
                }
            }
        }
        modes
    }
}
