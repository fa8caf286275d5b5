//! Axis-aligned rectangle geometry
//!
//! Every entity is collided as the box spanning `pos` to `pos + (width, height)`
//! in screen space (y grows downward).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Entity extent. Height comes first to match sprite sheet conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub height: f64,
    pub width: f64,
}

impl Size {
    pub const fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    /// Grow or shrink both dimensions by the same amount
    #[inline]
    pub fn grown(self, delta: f64) -> Self {
        Self::new(self.height + delta, self.width + delta)
    }

    #[inline]
    pub fn both_below(self, limit: f64) -> bool {
        self.height < limit && self.width < limit
    }

    #[inline]
    pub fn both_above(self, limit: f64) -> bool {
        self.height > limit && self.width > limit
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: DVec2, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Strict intersection test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && self.right() > other.origin.x
            && self.origin.y < other.bottom()
            && self.bottom() > other.origin.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(DVec2::new(x, y), Size::new(h, w))
    }

    #[test]
    fn test_overlap_interior() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // a.x + a.width == b.x
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        // a.y + a.height == b.y
        assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
        // corner contact only
        assert!(!a.overlaps(&rect(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_size_thresholds() {
        let size = Size::new(9.0, 9.5);
        assert!(size.both_below(10.0));
        assert!(!size.grown(1.0).both_below(10.0));
        assert!(Size::new(44.0, 50.0).both_above(43.0));
        assert!(!Size::new(44.0, 43.0).both_above(43.0));
    }
}
