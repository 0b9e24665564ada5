//! The visibility tracker: obscured/unobscured classification.

mod tracker;

pub use tracker::{Visibility, VisibilityTracker};
