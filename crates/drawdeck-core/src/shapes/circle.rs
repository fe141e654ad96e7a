//! Circle shape.

use crate::geometry;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A perfect circle. A single radius field keeps the
/// radius_x == radius_y constraint structural.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius, never negative.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Geometry for a completed drag. The cursor is projected at its
    /// own angle onto the circle of radius |cursor − start| around the
    /// start point, so dragging only ever changes the radius. Preview
    /// and commit share this constructor, which keeps the constraint
    /// identical in both.
    pub fn from_drag(start: Point, cursor: Point) -> Self {
        Self::new(start, geometry::distance(start, cursor))
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::ellipse_contains(self.center, self.radius, self.radius, point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(Point::new(self.center.x + dx, self.center.y + dy), self.radius)
    }

    pub fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_drag_horizontal() {
        let circle = Circle::from_drag(Point::new(100.0, 100.0), Point::new(160.0, 100.0));
        assert!((circle.center.x - 100.0).abs() < f64::EPSILON);
        assert!((circle.center.y - 100.0).abs() < f64::EPSILON);
        assert!((circle.radius - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_drag_radius_symmetric() {
        let horizontal = Circle::from_drag(Point::new(100.0, 100.0), Point::new(160.0, 100.0));
        let vertical = Circle::from_drag(Point::new(100.0, 100.0), Point::new(100.0, 160.0));
        assert!((horizontal.radius - vertical.radius).abs() < f64::EPSILON);
        assert!((horizontal.bounds().width() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.contains(Point::new(5.0, 5.0)));
        assert!(!circle.contains(Point::new(8.0, 8.0)));
        assert!(circle.contains(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_zero_radius_contains_nothing() {
        let circle = Circle::new(Point::new(0.0, 0.0), 0.0);
        assert!(!circle.contains(Point::new(0.0, 0.0)));
    }
}
