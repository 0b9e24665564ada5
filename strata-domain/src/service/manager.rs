//! The window manager service facade.
//!
//! [`WindowManagerService`] is the async surface of the engine: the
//! window-control protocol (consumed), the state-reporting protocol
//! (exposed), and the orientation protocol. The default implementation
//! wraps the serialized [`EngineState`] behind a single write lock, so
//! every request is applied atomically and in arrival order; readers
//! only ever observe committed snapshots.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::trace;

use strata_core::types::{OrientationAngle, RectInt};

use super::state::EngineState;
use super::types::{CreateWindowSpec, PropertyChange, StackSnapshot};
use crate::error::DomainError;
use crate::events::EngineEvent;
use crate::registry::{StackRequest, WindowHandle};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The async service surface of the stacking and compositing engine.
#[async_trait]
pub trait WindowManagerService: Send + Sync {
    /// Creates a window and returns its handle synchronously.
    async fn create_window(&self, spec: CreateWindowSpec) -> Result<WindowHandle, DomainError>;
    /// Destroys a window; its transient children are promoted in the
    /// same pass.
    async fn destroy_window(&self, handle: WindowHandle) -> Result<(), DomainError>;
    /// Maps a window.
    async fn map_window(&self, handle: WindowHandle) -> Result<(), DomainError>;
    /// Unmaps a window.
    async fn unmap_window(&self, handle: WindowHandle) -> Result<(), DomainError>;
    /// Raises a window and its transient chain.
    async fn activate_window(&self, handle: WindowHandle) -> Result<(), DomainError>;
    /// Iconifies a window and its transient chain.
    async fn iconify_window(&self, handle: WindowHandle) -> Result<(), DomainError>;
    /// Applies an explicit stacking request relative to a sibling.
    async fn configure_stacking(
        &self,
        handle: WindowHandle,
        request: StackRequest,
    ) -> Result<(), DomainError>;
    /// Sets or clears a window's transient owner.
    async fn set_transient_for(
        &self,
        handle: WindowHandle,
        parent: Option<WindowHandle>,
    ) -> Result<(), DomainError>;
    /// Applies a named property change.
    async fn set_property(
        &self,
        handle: WindowHandle,
        change: PropertyChange,
    ) -> Result<(), DomainError>;
    /// Requests a screen rotation.
    async fn set_orientation(&self, angle: OrientationAngle) -> Result<(), DomainError>;
    /// The active screen orientation.
    async fn orientation(&self) -> OrientationAngle;
    /// Sets the display power state.
    async fn set_display_off(&self, off: bool) -> Result<(), DomainError>;
    /// Sets the ongoing-call state.
    async fn set_call_ongoing(&self, ongoing: bool) -> Result<(), DomainError>;
    /// The latest committed snapshot, front to back.
    async fn snapshot(&self) -> StackSnapshot;
    /// Subscribes to engine events.
    fn subscribe(&self) -> broadcast::Receiver<EngineEvent>;
}

/// Default in-process implementation of [`WindowManagerService`].
pub struct DefaultWindowManagerService {
    state: Arc<RwLock<EngineState>>,
    event_sender: broadcast::Sender<EngineEvent>,
}

impl DefaultWindowManagerService {
    /// Creates a service for the given screen rectangle.
    pub fn new(screen: RectInt) -> Self {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(EngineState::new(screen))),
            event_sender,
        }
    }

    fn publish(&self, events: Vec<EngineEvent>) {
        for event in events {
            // A send only fails when nobody subscribed, which is fine.
            if self.event_sender.send(event).is_err() {
                trace!("no event subscribers");
            }
        }
    }
}

#[async_trait]
impl WindowManagerService for DefaultWindowManagerService {
    async fn create_window(&self, spec: CreateWindowSpec) -> Result<WindowHandle, DomainError> {
        let (handle, events) = self.state.write().await.create_window(spec)?;
        self.publish(events);
        Ok(handle)
    }

    async fn destroy_window(&self, handle: WindowHandle) -> Result<(), DomainError> {
        let events = self.state.write().await.destroy_window(handle)?;
        self.publish(events);
        Ok(())
    }

    async fn map_window(&self, handle: WindowHandle) -> Result<(), DomainError> {
        let events = self.state.write().await.map_window(handle)?;
        self.publish(events);
        Ok(())
    }

    async fn unmap_window(&self, handle: WindowHandle) -> Result<(), DomainError> {
        let events = self.state.write().await.unmap_window(handle)?;
        self.publish(events);
        Ok(())
    }

    async fn activate_window(&self, handle: WindowHandle) -> Result<(), DomainError> {
        let events = self.state.write().await.activate_window(handle)?;
        self.publish(events);
        Ok(())
    }

    async fn iconify_window(&self, handle: WindowHandle) -> Result<(), DomainError> {
        let events = self.state.write().await.iconify_window(handle)?;
        self.publish(events);
        Ok(())
    }

    async fn configure_stacking(
        &self,
        handle: WindowHandle,
        request: StackRequest,
    ) -> Result<(), DomainError> {
        let events = self
            .state
            .write()
            .await
            .configure_stacking(handle, request)?;
        self.publish(events);
        Ok(())
    }

    async fn set_transient_for(
        &self,
        handle: WindowHandle,
        parent: Option<WindowHandle>,
    ) -> Result<(), DomainError> {
        let events = self.state.write().await.set_transient_for(handle, parent)?;
        self.publish(events);
        Ok(())
    }

    async fn set_property(
        &self,
        handle: WindowHandle,
        change: PropertyChange,
    ) -> Result<(), DomainError> {
        let events = self.state.write().await.apply_property(handle, change)?;
        self.publish(events);
        Ok(())
    }

    async fn set_orientation(&self, angle: OrientationAngle) -> Result<(), DomainError> {
        let events = self.state.write().await.set_orientation(angle)?;
        self.publish(events);
        Ok(())
    }

    async fn orientation(&self) -> OrientationAngle {
        self.state.read().await.orientation()
    }

    async fn set_display_off(&self, off: bool) -> Result<(), DomainError> {
        let events = self.state.write().await.set_display_state(off)?;
        self.publish(events);
        Ok(())
    }

    async fn set_call_ongoing(&self, ongoing: bool) -> Result<(), DomainError> {
        let events = self.state.write().await.set_call_state(ongoing)?;
        self.publish(events);
        Ok(())
    }

    async fn snapshot(&self) -> StackSnapshot {
        self.state.read().await.snapshot()
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_sender.subscribe()
    }
}
