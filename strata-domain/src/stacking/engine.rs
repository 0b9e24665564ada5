//! The stacking engine: the canonical bottom-to-top window order.
//!
//! The engine keeps a persistent stacking list across events. Explicit
//! operations (raise, lower, configure relative to a sibling) splice the
//! list directly; [`StackingEngine::rough_sort`] then restores the policy
//! invariants in three deterministic passes:
//!
//! 1. a stable sort by the pure `(state, band)` key — windows never move
//!    unless a rule demands it, which makes recomputation idempotent;
//! 2. transient-tree linearization — every window with a live owner is
//!    re-emitted directly above it, whole chains move as one unit;
//! 3. decorator placement — the decorator rides the window it manages,
//!    or sinks to the bottom when unused.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::errors::StackingError;
use super::layers::{effective_level, StackingLevel};
use crate::registry::{
    StackPlacement, WindowAttributes, WindowHandle, WindowRegistry, WindowState, WindowType,
};
use crate::transiency::TransiencyGraph;

/// Rank of a window's lifecycle state in the sort key: iconified and
/// below-desktop windows sort under everything in normal state.
fn state_rank(
    attrs: &WindowAttributes,
    handle: WindowHandle,
    old_index: &HashMap<WindowHandle, usize>,
    desktop_index: Option<usize>,
) -> u8 {
    match attrs.window_state {
        WindowState::Normal => 1,
        WindowState::Iconic => 0,
        // A withdrawn window has no state of its own; it counts as
        // iconified while it sits below the desktop, so an explicit
        // "stack to bottom" survives until the window is mapped.
        WindowState::Withdrawn => match (desktop_index, old_index.get(&handle)) {
            (Some(di), Some(wi)) if *wi < di => 0,
            _ => 1,
        },
    }
}

/// Maintains the canonical bottom-to-top order of all known windows.
#[derive(Debug, Default)]
pub struct StackingEngine {
    list: Vec<WindowHandle>,
}

impl StackingEngine {
    /// Creates an empty stacking order.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current order, bottom to top. Includes unmapped windows,
    /// which keep a conceptual position for later sibling references.
    pub fn order(&self) -> &[WindowHandle] {
        &self.list
    }

    /// Whether the window participates in the order.
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.list.contains(&handle)
    }

    /// Adds a newly created window on top of the stack.
    pub fn add(&mut self, handle: WindowHandle) {
        debug!(%handle, "adding window to stack");
        self.remove(handle);
        self.list.push(handle);
    }

    /// Removes a destroyed window from the order.
    pub fn remove(&mut self, handle: WindowHandle) {
        self.list.retain(|h| *h != handle);
    }

    /// Moves a window to the absolute top of the list; the following
    /// sort confines it to the top of its own band.
    pub fn to_top(&mut self, handle: WindowHandle) {
        if self.contains(handle) {
            debug!(%handle, "positioning window to top");
            self.remove(handle);
            self.list.push(handle);
        }
    }

    /// Moves a window to the absolute bottom of the list; the following
    /// sort confines it to the bottom of its own band.
    pub fn to_bottom(&mut self, handle: WindowHandle) {
        if self.contains(handle) {
            debug!(%handle, "positioning window to bottom");
            self.remove(handle);
            self.list.insert(0, handle);
        }
    }

    /// Applies an explicit stacking request relative to a sibling.
    ///
    /// A missing or unknown sibling means the extremum of the window's
    /// own band, per the configure-request contract.
    pub fn place_relative(
        &mut self,
        handle: WindowHandle,
        sibling: Option<WindowHandle>,
        placement: StackPlacement,
    ) {
        if !self.contains(handle) {
            return;
        }
        let sibling = sibling.filter(|s| *s != handle && self.contains(*s));
        match sibling {
            Some(sibling) => {
                self.remove(handle);
                if let Some(pos) = self.list.iter().position(|h| *h == sibling) {
                    match placement {
                        StackPlacement::Above => self.list.insert(pos + 1, handle),
                        StackPlacement::Below => self.list.insert(pos, handle),
                    }
                }
            }
            None => match placement {
                StackPlacement::Above => self.to_top(handle),
                StackPlacement::Below => self.to_bottom(handle),
            },
        }
    }

    /// Restores the stacking invariants after mutations.
    ///
    /// `decorator_above` names the window the decorator currently
    /// manages; when `None` the decorator is parked at the bottom.
    pub fn rough_sort(
        &mut self,
        registry: &WindowRegistry,
        graph: &TransiencyGraph,
        decorator_above: Option<WindowHandle>,
    ) -> Result<(), StackingError> {
        let old_index: HashMap<WindowHandle, usize> = self
            .list
            .iter()
            .enumerate()
            .map(|(i, h)| (*h, i))
            .collect();
        let desktop_index = registry.desktop().and_then(|d| old_index.get(&d)).copied();

        let mut keys: HashMap<WindowHandle, (u8, StackingLevel)> = HashMap::new();
        for &handle in &self.list {
            let attrs = registry
                .get(handle)
                .map_err(|_| StackingError::UnknownWindow(handle))?;
            keys.insert(
                handle,
                (
                    state_rank(attrs, handle, &old_index, desktop_index),
                    effective_level(handle, registry, graph),
                ),
            );
        }

        let mut sorted = self.list.clone();
        sorted.sort_by_key(|h| keys[h]);

        let position: HashMap<WindowHandle, usize> = sorted
            .iter()
            .enumerate()
            .map(|(i, h)| (*h, i))
            .collect();

        // Transient windows are emitted directly above their owner, so a
        // whole chain rides its root and keeps its internal order.
        let mut result = Vec::with_capacity(sorted.len());
        let mut emitted = HashSet::new();
        for &root in sorted.iter() {
            let has_live_parent = graph
                .parent_of(root)
                .map(|p| position.contains_key(&p))
                .unwrap_or(false);
            if has_live_parent {
                continue;
            }
            let mut stack = vec![root];
            while let Some(handle) = stack.pop() {
                if !emitted.insert(handle) {
                    continue;
                }
                result.push(handle);
                let mut kids: Vec<WindowHandle> = graph
                    .children_of(handle)
                    .iter()
                    .copied()
                    .filter(|c| position.contains_key(c))
                    .collect();
                kids.sort_by_key(|c| position[c]);
                for &kid in kids.iter().rev() {
                    stack.push(kid);
                }
            }
        }

        self.place_decorators(registry, decorator_above, &mut result);

        if result.len() != self.list.len() {
            warn!(
                expected = self.list.len(),
                got = result.len(),
                "stacking recomputation lost windows"
            );
            return Err(StackingError::NonTotalOrder {
                expected: self.list.len(),
                got: result.len(),
            });
        }
        self.list = result;
        Ok(())
    }

    /// The decorator rides directly above the window it manages; an
    /// unused decorator goes below everything else.
    fn place_decorators(
        &self,
        registry: &WindowRegistry,
        decorator_above: Option<WindowHandle>,
        result: &mut Vec<WindowHandle>,
    ) {
        let decorators: Vec<WindowHandle> = result
            .iter()
            .copied()
            .filter(|h| {
                registry
                    .get(*h)
                    .map(|a| a.window_type == WindowType::Decorator)
                    .unwrap_or(false)
            })
            .collect();
        if decorators.is_empty() {
            return;
        }
        result.retain(|h| !decorators.contains(h));
        let mut rest = decorators.as_slice();
        if let Some(target) = decorator_above {
            if let Some(pos) = result.iter().position(|h| *h == target) {
                result.insert(pos + 1, decorators[0]);
                rest = &decorators[1..];
            }
        }
        for &deco in rest.iter().rev() {
            result.insert(0, deco);
        }
    }
}
