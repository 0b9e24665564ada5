//! Screen orientation types.
//!
//! The compositor accepts rotation requests in the four right-angle
//! orientations and republishes the active angle as external state.
//! Rotation is purely presentational: it never participates in stacking
//! decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four right-angle screen orientations, measured in degrees
/// of counter-clockwise rotation from the natural display orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrientationAngle {
    /// Natural orientation.
    #[default]
    Deg0,
    /// Rotated by 90 degrees.
    Deg90,
    /// Upside down.
    Deg180,
    /// Rotated by 270 degrees.
    Deg270,
}

impl OrientationAngle {
    /// The angle in degrees (0, 90, 180, or 270).
    pub fn degrees(&self) -> u16 {
        match self {
            OrientationAngle::Deg0 => 0,
            OrientationAngle::Deg90 => 90,
            OrientationAngle::Deg180 => 180,
            OrientationAngle::Deg270 => 270,
        }
    }

    /// Parses an angle in degrees. Any value other than the four right
    /// angles is rejected.
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(OrientationAngle::Deg0),
            90 => Some(OrientationAngle::Deg90),
            180 => Some(OrientationAngle::Deg180),
            270 => Some(OrientationAngle::Deg270),
            _ => None,
        }
    }

    /// The next orientation when rotating a quarter turn clockwise.
    pub fn rotated_clockwise(&self) -> Self {
        match self {
            OrientationAngle::Deg0 => OrientationAngle::Deg270,
            OrientationAngle::Deg90 => OrientationAngle::Deg0,
            OrientationAngle::Deg180 => OrientationAngle::Deg90,
            OrientationAngle::Deg270 => OrientationAngle::Deg180,
        }
    }

    /// Whether the screen's long edge runs vertically at this angle,
    /// assuming a landscape-natural display.
    pub fn is_portrait(&self) -> bool {
        matches!(self, OrientationAngle::Deg90 | OrientationAngle::Deg270)
    }

    /// Opposite of [`is_portrait`](Self::is_portrait).
    pub fn is_landscape(&self) -> bool {
        !self.is_portrait()
    }
}

impl fmt::Display for OrientationAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
