//! The serialized engine state.
//!
//! [`EngineState`] owns the registry, the transiency graph, and the
//! derived stacking/visibility/compositing tables. Every request is
//! applied atomically: registry mutation, graph validation, then one
//! full recompute pass committing a new snapshot. Callers (the service
//! facade) serialize access, so no two passes ever interleave.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, error};

use strata_core::types::{OrientationAngle, RectInt};

use super::types::{CreateWindowSpec, DeviceState, PropertyChange, StackRow, StackSnapshot};
use crate::compositing::{CompositingEngine, RenderMode};
use crate::error::DomainError;
use crate::events::EngineEvent;
use crate::registry::{
    StackRequest, WindowAttributes, WindowHandle, WindowRegistry, WindowState, WindowType,
};
use crate::stacking::StackingEngine;
use crate::transiency::TransiencyGraph;
use crate::visibility::{Visibility, VisibilityTracker};

/// The complete, single-writer state of the window manager core.
pub struct EngineState {
    registry: WindowRegistry,
    graph: TransiencyGraph,
    stacking: StackingEngine,
    visibility: VisibilityTracker,
    compositing: CompositingEngine,
    orientation: OrientationAngle,
    device: DeviceState,
    visibility_map: HashMap<WindowHandle, Visibility>,
    render_modes: HashMap<WindowHandle, RenderMode>,
    current_app: Option<WindowHandle>,
    snapshot: StackSnapshot,
}

impl EngineState {
    /// Creates an empty engine for the given screen rectangle.
    pub fn new(screen: RectInt) -> Self {
        Self {
            registry: WindowRegistry::new(),
            graph: TransiencyGraph::new(),
            stacking: StackingEngine::new(),
            visibility: VisibilityTracker::new(screen),
            compositing: CompositingEngine::new(screen),
            orientation: OrientationAngle::default(),
            device: DeviceState::default(),
            visibility_map: HashMap::new(),
            render_modes: HashMap::new(),
            current_app: None,
            snapshot: StackSnapshot {
                rows: Vec::new(),
                orientation: OrientationAngle::default(),
                current_app: None,
                computed_at: Utc::now(),
            },
        }
    }

    /// The latest committed snapshot.
    pub fn snapshot(&self) -> StackSnapshot {
        self.snapshot.clone()
    }

    /// The active orientation.
    pub fn orientation(&self) -> OrientationAngle {
        self.orientation
    }

    /// Creates a window and commits a recompute.
    pub fn create_window(
        &mut self,
        spec: CreateWindowSpec,
    ) -> Result<(WindowHandle, Vec<EngineEvent>), DomainError> {
        if let Some(parent) = spec.transient_for {
            if !self.registry.contains(parent) {
                return Err(crate::registry::RegistryError::NotFound(parent).into());
            }
        }
        let mut attrs = WindowAttributes::new(spec.window_type, spec.geometry);
        attrs.modal = spec.modal;
        attrs.has_alpha = spec.has_alpha;
        attrs.decorated = spec.decorated;
        attrs.fullscreen = spec.fullscreen;
        attrs.always_on_top = spec.always_on_top;
        attrs.stacking_layer = spec.stacking_layer;
        attrs.transient_for = spec.transient_for;

        let handle = self.registry.create(attrs)?;
        if let Some(parent) = spec.transient_for {
            // A fresh handle can neither self-reference nor close a cycle.
            self.graph.set_parent(handle, Some(parent))?;
        }
        self.stacking.add(handle);

        let mut events = vec![EngineEvent::WindowCreated { handle }];
        events.extend(self.recompute()?);
        Ok((handle, events))
    }

    /// Destroys a window; transient children are promoted to their own
    /// band in the same pass.
    pub fn destroy_window(
        &mut self,
        handle: WindowHandle,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        self.registry.destroy(handle)?;
        let promoted = self.graph.remove_window(handle);
        for orphan in promoted {
            if let Ok(attrs) = self.registry.get_mut(orphan) {
                attrs.transient_for = None;
            }
        }
        self.stacking.remove(handle);
        self.visibility_map.remove(&handle);
        self.render_modes.remove(&handle);

        let mut events = vec![EngineEvent::WindowDestroyed { handle }];
        events.extend(self.recompute()?);
        Ok(events)
    }

    /// Maps a window. A remembered stacking request is re-applied
    /// verbatim.
    pub fn map_window(&mut self, handle: WindowHandle) -> Result<Vec<EngineEvent>, DomainError> {
        let below_desktop = self.is_below_desktop(handle);
        let attrs = self.registry.get_mut(handle)?;
        attrs.mapped = true;
        attrs.window_state = if below_desktop {
            WindowState::Iconic
        } else {
            WindowState::Normal
        };
        let request = attrs.stack_request;
        if let Some(request) = request {
            self.stacking
                .place_relative(handle, request.sibling, request.placement);
        }
        self.recompute()
    }

    /// Unmaps (withdraws) a window. It keeps its conceptual position in
    /// the stack for later sibling references.
    pub fn unmap_window(&mut self, handle: WindowHandle) -> Result<Vec<EngineEvent>, DomainError> {
        let attrs = self.registry.get_mut(handle)?;
        attrs.mapped = false;
        attrs.window_state = WindowState::Withdrawn;
        self.recompute()
    }

    /// Raises a window: the whole transient chain moves together, and
    /// higher bands (system-modal dialogs, notifications) stay above it.
    pub fn activate_window(
        &mut self,
        handle: WindowHandle,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        self.registry.get(handle)?;
        let root = self
            .graph
            .last_visible_parent(handle, &self.registry)
            .unwrap_or(handle);
        self.set_chain_state(root, WindowState::Normal);
        self.stacking.to_top(root);
        self.recompute()
    }

    /// Iconifies a window together with its transient chain. Refused
    /// when the window carries the cannot-minimize hint.
    pub fn iconify_window(
        &mut self,
        handle: WindowHandle,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        let attrs = self.registry.get(handle)?;
        if attrs.cannot_minimize || attrs.stacking_layer == 1 {
            // Layer 1 is the screen/device lock; it never iconifies.
            debug!(%handle, "ignoring iconify request, window cannot be minimized");
            return Ok(Vec::new());
        }
        let root = self
            .graph
            .last_visible_parent(handle, &self.registry)
            .unwrap_or(handle);
        self.set_chain_state(root, WindowState::Iconic);
        self.recompute()
    }

    /// Applies an explicit stacking request and persists it across
    /// map/unmap cycles. An unknown sibling degrades to "none".
    pub fn configure_stacking(
        &mut self,
        handle: WindowHandle,
        request: StackRequest,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        let attrs = self.registry.get_mut(handle)?;
        attrs.stack_request = Some(request);
        self.stacking
            .place_relative(handle, request.sibling, request.placement);
        self.recompute()
    }

    /// Sets or clears the transient owner of a window.
    pub fn set_transient_for(
        &mut self,
        handle: WindowHandle,
        parent: Option<WindowHandle>,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        self.registry.get(handle)?;
        if let Some(parent) = parent {
            self.registry.get(parent)?;
        }
        self.graph.set_parent(handle, parent)?;
        // Re-sync the registry mirrors; a broken two-cycle may have
        // dropped the counterpart's edge as well.
        self.registry.get_mut(handle)?.transient_for = parent;
        if let Some(parent) = parent {
            let parent_edge = self.graph.parent_of(parent);
            self.registry.get_mut(parent)?.transient_for = parent_edge;
        }
        self.recompute()
    }

    /// Applies a named property change.
    pub fn apply_property(
        &mut self,
        handle: WindowHandle,
        change: PropertyChange,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        let attrs = self.registry.get_mut(handle)?;
        let mut raise = false;
        match change {
            PropertyChange::OpaqueOverride(value) => attrs.opaque_override = value,
            PropertyChange::LowPowerMode(value) => attrs.low_power_mode = value,
            PropertyChange::CannotMinimize(value) => attrs.cannot_minimize = value,
            PropertyChange::StackingLayer(value) => {
                attrs.stacking_layer = value;
                // A layer change raises the window on top of its
                // same-leveled peers.
                raise = attrs.window_state == WindowState::Normal;
            }
            PropertyChange::StatusbarGeometry(value) => attrs.statusbar_geometry = value,
            PropertyChange::AlwaysOnTop(value) => attrs.always_on_top = value,
            PropertyChange::Modal(value) => attrs.modal = value,
            PropertyChange::Fullscreen(value) => attrs.fullscreen = value,
            PropertyChange::Geometry(value) => attrs.geometry = value,
        }
        if raise {
            self.stacking.to_top(handle);
        }
        self.recompute()
    }

    /// Sets the screen orientation. Rotation never alters stacking.
    pub fn set_orientation(
        &mut self,
        angle: OrientationAngle,
    ) -> Result<Vec<EngineEvent>, DomainError> {
        let changed = self.orientation != angle;
        self.orientation = angle;
        let mut events = Vec::new();
        if changed {
            events.push(EngineEvent::OrientationChanged { angle });
        }
        events.extend(self.recompute()?);
        Ok(events)
    }

    /// Sets the display power state.
    pub fn set_display_state(&mut self, off: bool) -> Result<Vec<EngineEvent>, DomainError> {
        self.device.display_off = off;
        self.recompute()
    }

    /// Sets the ongoing-call state; fullscreen windows that do not paint
    /// their own statusbar get decorated while a call is active.
    pub fn set_call_state(&mut self, ongoing: bool) -> Result<Vec<EngineEvent>, DomainError> {
        self.device.ongoing_call = ongoing;
        self.recompute()
    }

    /// Sets `state` on a window and all its transient descendants.
    fn set_chain_state(&mut self, root: WindowHandle, state: WindowState) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Ok(attrs) = self.registry.get_mut(handle) {
                if attrs.mapped {
                    attrs.window_state = state;
                }
            }
            stack.extend(self.graph.children_of(handle).iter().copied());
        }
    }

    /// Whether the window currently sits below the desktop.
    fn is_below_desktop(&self, handle: WindowHandle) -> bool {
        let order = self.stacking.order();
        let Some(desktop) = self.registry.desktop() else {
            return false;
        };
        match (
            order.iter().position(|h| *h == handle),
            order.iter().position(|h| *h == desktop),
        ) {
            (Some(wi), Some(di)) => wi < di,
            _ => false,
        }
    }

    /// The window the decorator should manage right now: the topmost
    /// mapped window above the desktop that needs decoration, provided a
    /// decorator window exists at all.
    fn decorated_window(&self) -> Option<WindowHandle> {
        let has_decorator = self.registry.all().any(|h| {
            self.registry
                .get(h)
                .map(|a| a.window_type == WindowType::Decorator && a.mapped)
                .unwrap_or(false)
        });
        if !has_decorator {
            return None;
        }
        for &handle in self.stacking.order().iter().rev() {
            let Ok(attrs) = self.registry.get(handle) else {
                continue;
            };
            if attrs.window_type == WindowType::Desktop {
                break;
            }
            if !attrs.mapped
                || attrs.window_state != WindowState::Normal
                || matches!(
                    attrs.window_type,
                    WindowType::Input | WindowType::Decorator | WindowType::OverrideRedirect
                )
            {
                continue;
            }
            let call_decorated = self.device.ongoing_call
                && attrs.fullscreen
                && !attrs.paints_own_statusbar();
            if attrs.decorated || call_decorated {
                return Some(handle);
            }
        }
        None
    }

    /// The derived current application: the topmost mapped application
    /// window in normal state above the desktop.
    fn compute_current_app(&self) -> Option<WindowHandle> {
        for &handle in self.stacking.order().iter().rev() {
            let Ok(attrs) = self.registry.get(handle) else {
                continue;
            };
            if attrs.window_type == WindowType::Desktop {
                break;
            }
            if attrs.mapped
                && attrs.window_state == WindowState::Normal
                && attrs.window_type == WindowType::Application
            {
                return Some(handle);
            }
        }
        None
    }

    /// One full recompute pass: stacking, state sync, visibility,
    /// compositing, snapshot. Returns the observable change events.
    fn recompute(&mut self) -> Result<Vec<EngineEvent>, DomainError> {
        let decorated = self.decorated_window();
        if let Err(e) = self
            .stacking
            .rough_sort(&self.registry, &self.graph, decorated)
        {
            error!(error = %e, "stacking recomputation violated an internal invariant");
            return Err(e.into());
        }

        let order: Vec<WindowHandle> = self.stacking.order().to_vec();

        // Windows below the desktop are iconic, everything else in the
        // viewable stack is normal. This is what makes an explicit
        // "stack to bottom" stick across map/unmap cycles.
        if let Some(di) = self
            .registry
            .desktop()
            .and_then(|d| order.iter().position(|h| *h == d))
        {
            for (i, &handle) in order.iter().enumerate() {
                if let Ok(attrs) = self.registry.get_mut(handle) {
                    if attrs.mapped && attrs.window_type != WindowType::Desktop {
                        attrs.window_state = if i < di {
                            WindowState::Iconic
                        } else {
                            WindowState::Normal
                        };
                    }
                }
            }
        }

        let visibility_map =
            self.visibility
                .recompute(&order, &self.registry, self.device.display_off);
        let render_modes =
            self.compositing
                .recompute(&order, &self.registry, &self.graph, decorated);
        let current_app = self.compute_current_app();

        let mut events = Vec::new();
        let front_to_back: Vec<WindowHandle> = order.iter().rev().copied().collect();
        if self.snapshot.order() != front_to_back {
            events.push(EngineEvent::StackingChanged {
                order: front_to_back.clone(),
            });
        }
        for (&handle, &visibility) in &visibility_map {
            if self.visibility_map.get(&handle) != Some(&visibility) {
                events.push(EngineEvent::VisibilityChanged { handle, visibility });
            }
        }
        for (&handle, &mode) in &render_modes {
            if self.render_modes.get(&handle) != Some(&mode) {
                events.push(EngineEvent::RenderModeChanged { handle, mode });
            }
        }
        if self.current_app != current_app {
            events.push(EngineEvent::CurrentApplicationChanged {
                handle: current_app,
            });
        }

        let rows: Vec<StackRow> = front_to_back
            .iter()
            .map(|&handle| {
                let attrs = self.registry.get(handle).ok();
                StackRow {
                    handle,
                    window_type: attrs.map(|a| a.window_type).unwrap_or_default(),
                    viewable: attrs.map(|a| a.mapped).unwrap_or(false),
                    render_mode: render_modes.get(&handle).copied(),
                    visibility: visibility_map.get(&handle).copied(),
                }
            })
            .collect();

        self.visibility_map = visibility_map;
        self.render_modes = render_modes;
        self.current_app = current_app;
        self.snapshot = StackSnapshot {
            rows,
            orientation: self.orientation,
            current_app,
            computed_at: Utc::now(),
        };
        Ok(events)
    }
}
