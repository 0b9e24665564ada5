//! The visibility tracker: who is covered by whom.
//!
//! Walks the stack front to back, accumulating the rectangles of the
//! windows that actually hide content: mapped, effectively opaque, and
//! not an input method (a virtual keyboard composites its owner itself,
//! so the owner must stay unobscured underneath it).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strata_core::types::RectInt;

use crate::registry::{WindowHandle, WindowRegistry, WindowType};

/// Obscuring state of a mapped window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// No window above intersects this one.
    Unobscured,
    /// Intersected, but not fully covered, by windows above.
    PartiallyObscured,
    /// Fully covered by a window above.
    FullyObscured,
}

/// Recomputes per-window visibility from the stacking order.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    screen: RectInt,
}

impl VisibilityTracker {
    /// Creates a tracker for the given screen rectangle.
    pub fn new(screen: RectInt) -> Self {
        Self { screen }
    }

    /// The screen rectangle the tracker clips against.
    pub fn screen(&self) -> RectInt {
        self.screen
    }

    /// Computes the visibility of every mapped window.
    ///
    /// `order` is bottom to top. With the display off every window is
    /// obscured except low-power-mode windows that still reach the
    /// screen surface; content visibility itself is independent of the
    /// display's power state.
    pub fn recompute(
        &self,
        order: &[WindowHandle],
        registry: &WindowRegistry,
        display_off: bool,
    ) -> HashMap<WindowHandle, Visibility> {
        let mut result = HashMap::new();
        let mut cover: Vec<RectInt> = Vec::new();

        for &handle in order.iter().rev() {
            let Ok(attrs) = registry.get(handle) else {
                continue;
            };
            if !attrs.mapped {
                continue;
            }
            let geometry = match attrs.geometry.intersection(&self.screen) {
                Some(g) => g,
                None => {
                    // Entirely off-screen counts as covered.
                    result.insert(handle, Visibility::FullyObscured);
                    continue;
                }
            };

            let mut visibility = Visibility::Unobscured;
            for rect in &cover {
                if rect.contains_rect(&geometry) {
                    visibility = Visibility::FullyObscured;
                    break;
                }
                if rect.intersects(&geometry) {
                    visibility = Visibility::PartiallyObscured;
                }
            }
            if display_off && !(attrs.low_power_mode && visibility != Visibility::FullyObscured) {
                visibility = Visibility::FullyObscured;
            } else if display_off {
                visibility = Visibility::Unobscured;
            }
            result.insert(handle, visibility);

            if attrs.is_opaque() && attrs.window_type != WindowType::Input {
                cover.push(geometry);
            }
        }
        result
    }
}
