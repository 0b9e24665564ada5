//! Geometric primitives like points, sizes, and rectangles.
//!
//! The window registry stores every window's screen geometry as a
//! [`RectInt`]; the visibility tracker and the compositing engine work in
//! terms of rectangle containment, intersection, and coverage.

use num_traits::{Num, Zero};
use serde::{Deserialize, Serialize};

/// A 2D point with generic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point<T> {
    /// The x-coordinate of the point.
    pub x: T,
    /// The y-coordinate of the point.
    pub y: T,
}

impl<T: Num + Copy> Point<T> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// A 2D size (width and height) with generic dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size<T> {
    /// The width component.
    pub w: T,
    /// The height component.
    pub h: T,
}

impl<T: Num + Copy> Size<T> {
    /// Creates a new size with the given dimensions.
    pub const fn new(w: T, h: T) -> Self {
        Size { w, h }
    }

    /// A size is empty when either dimension is zero (or negative for
    /// signed types, which cannot enclose anything).
    pub fn is_empty(&self) -> bool
    where
        T: PartialOrd + Zero,
    {
        self.w <= T::zero() || self.h <= T::zero()
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect<T> {
    /// The x-coordinate of the top-left corner.
    pub x: T,
    /// The y-coordinate of the top-left corner.
    pub y: T,
    /// The width of the rectangle.
    pub w: T,
    /// The height of the rectangle.
    pub h: T,
}

/// Integer rectangle in screen coordinates.
pub type RectInt = Rect<i32>;

impl<T: Num + Copy + PartialOrd> Rect<T> {
    /// Creates a new rectangle from its top-left corner and size.
    pub const fn new(x: T, y: T, w: T, h: T) -> Self {
        Rect { x, y, w, h }
    }

    /// The exclusive right edge (`x + w`).
    pub fn right(&self) -> T {
        self.x + self.w
    }

    /// The exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> T {
        self.y + self.h
    }

    /// A rectangle is empty when it has no area.
    pub fn is_empty(&self) -> bool {
        self.w <= T::zero() || self.h <= T::zero()
    }

    /// Whether the given point lies inside this rectangle.
    pub fn contains_point(&self, p: Point<T>) -> bool {
        !self.is_empty()
            && p.x >= self.x
            && p.y >= self.y
            && p.x < self.right()
            && p.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle.
    ///
    /// An empty `other` is never considered contained.
    pub fn contains_rect(&self, other: &Rect<T>) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether this rectangle and `other` overlap in at least one point.
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping region of this rectangle and `other`, if any.
    pub fn intersection(&self, other: &Rect<T>) -> Option<Rect<T>> {
        if !self.intersects(other) {
            return None;
        }
        let x = if self.x > other.x { self.x } else { other.x };
        let y = if self.y > other.y { self.y } else { other.y };
        let right = if self.right() < other.right() {
            self.right()
        } else {
            other.right()
        };
        let bottom = if self.bottom() < other.bottom() {
            self.bottom()
        } else {
            other.bottom()
        };
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// The smallest rectangle containing both this rectangle and `other`.
    pub fn union(&self, other: &Rect<T>) -> Rect<T> {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = if self.x < other.x { self.x } else { other.x };
        let y = if self.y < other.y { self.y } else { other.y };
        let right = if self.right() > other.right() {
            self.right()
        } else {
            other.right()
        };
        let bottom = if self.bottom() > other.bottom() {
            self.bottom()
        } else {
            other.bottom()
        };
        Rect::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rect_edges() {
        let r = RectInt::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert!(!r.is_empty());
        assert!(RectInt::new(0, 0, 0, 10).is_empty());
        assert!(RectInt::new(0, 0, 10, -5).is_empty());
    }

    #[test]
    fn test_contains_point() {
        let r = RectInt::new(0, 0, 10, 10);
        assert!(r.contains_point(Point::new(0, 0)));
        assert!(r.contains_point(Point::new(9, 9)));
        assert!(!r.contains_point(Point::new(10, 10)));
        assert!(!r.contains_point(Point::new(-1, 5)));
    }

    #[test]
    fn test_contains_rect() {
        let screen = RectInt::new(0, 0, 864, 480);
        assert!(screen.contains_rect(&RectInt::new(0, 0, 864, 480)));
        assert!(screen.contains_rect(&RectInt::new(100, 100, 200, 200)));
        assert!(!screen.contains_rect(&RectInt::new(800, 400, 100, 100)));
        assert!(!screen.contains_rect(&RectInt::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_intersection() {
        let a = RectInt::new(0, 0, 10, 10);
        let b = RectInt::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(RectInt::new(5, 5, 5, 5)));
        let c = RectInt::new(20, 20, 5, 5);
        assert_eq!(a.intersection(&c), None);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_union() {
        let a = RectInt::new(0, 0, 10, 10);
        let b = RectInt::new(20, 5, 10, 10);
        assert_eq!(a.union(&b), RectInt::new(0, 0, 30, 15));
        let empty = RectInt::new(0, 0, 0, 0);
        assert_eq!(a.union(&empty), a);
    }

    #[test]
    fn test_serde_round_trip() {
        let r = RectInt::new(1, 2, 3, 4);
        let json = serde_json::to_string(&r).unwrap();
        let back: RectInt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
