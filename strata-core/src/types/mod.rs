//! Fundamental data types shared across the Strata layers.

pub mod geometry;
pub mod orientation;

pub use geometry::{Point, Rect, RectInt, Size};
pub use orientation::OrientationAngle;
