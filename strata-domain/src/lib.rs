//! # Strata Domain Library (`strata-domain`)
//!
//! The policy core of the Strata window manager: given a set of windows
//! and a stream of control requests, it maintains the canonical
//! front-to-back stacking order, tracks which windows are obscured, and
//! decides per window whether it is composited or scanned out directly.
//!
//! ## Components
//!
//! - [`registry`] — the window registry: identity, attributes, lifecycle.
//! - [`transiency`] — the transient-for graph with deterministic cycle
//!   resolution.
//! - [`stacking`] — the stacking policy engine: priority bands plus a
//!   stable, idempotent re-sort.
//! - [`visibility`] — the obscured/unobscured tracker.
//! - [`compositing`] — the composited/direct decision engine.
//! - [`service`] — the serialized control loop and the async
//!   [`WindowManagerService`](service::WindowManagerService) facade
//!   exposing the window-control, state-reporting, and orientation
//!   protocols.
//!
//! All mutations flow through the service one request at a time; every
//! request commits a full recompute, so observers only ever see
//! consistent snapshots.

pub use strata_core as core;

pub mod compositing;
pub mod error;
pub mod events;
pub mod registry;
pub mod service;
pub mod stacking;
pub mod transiency;
pub mod visibility;

pub use compositing::{needs_compositing, CompositingEngine, RenderMode};
pub use error::DomainError;
pub use events::EngineEvent;
pub use registry::{
    OpaqueOverride, RegistryError, StackPlacement, StackRequest, WindowAttributes, WindowHandle,
    WindowRegistry, WindowState, WindowType,
};
pub use service::{
    CreateWindowSpec, DefaultWindowManagerService, DeviceState, EngineState, PropertyChange,
    StackRow, StackSnapshot, WindowManagerService,
};
pub use stacking::{effective_level, StackingEngine, StackingError, StackingLevel};
pub use transiency::{TransiencyError, TransiencyGraph, TransiencyRelation};
pub use visibility::{Visibility, VisibilityTracker};
