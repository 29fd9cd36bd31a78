//! Axis-aligned rectangles in world kilometres.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
///
/// Containment is half-open: a point on the minimum edge is inside, a point
/// on the maximum edge is not. Adjacent rectangles therefore never both
/// claim the same point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum (top-left) corner.
    pub min: DVec2,
    /// Width and height.
    pub size: DVec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    /// Creates a rectangle of `size` centred on `center`.
    #[must_use]
    pub fn from_center(center: DVec2, size: DVec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Maximum (bottom-right) corner.
    #[must_use]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        self.min + self.size * 0.5
    }

    /// Returns `true` if `point` lies inside (half-open on the max edges).
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_max() {
        let r = Rect::new(100.0, 200.0, 300.0, 200.0);
        assert_eq!(r.center(), DVec2::new(250.0, 300.0));
        assert_eq!(r.max(), DVec2::new(400.0, 400.0));
    }

    #[test]
    fn from_center_roundtrips_center() {
        let r = Rect::from_center(DVec2::new(5000.0, 7000.0), DVec2::new(300.0, 200.0));
        assert_eq!(r.min, DVec2::new(4850.0, 6900.0));
        assert_eq!(r.center(), DVec2::new(5000.0, 7000.0));
    }

    #[test]
    fn containment_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(DVec2::new(0.0, 0.0)));
        assert!(r.contains(DVec2::new(9.999, 9.999)));
        assert!(!r.contains(DVec2::new(10.0, 5.0)));
        assert!(!r.contains(DVec2::new(5.0, 10.0)));
        assert!(!r.contains(DVec2::new(-0.001, 5.0)));
    }
}
