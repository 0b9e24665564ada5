//! The compositing decision engine: redirect or scan out directly.

mod engine;

pub use engine::{needs_compositing, CompositingEngine, RenderMode};
