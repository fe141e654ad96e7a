//! Line shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Geometry for a completed drag from `start` to `end`.
    pub fn from_drag(start: Point, end: Point) -> Self {
        Self::new(start, end)
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Bounding-box containment. Stroke thickness is intentionally
    /// ignored; the box between the endpoints is the hit region.
    pub fn contains(&self, point: Point) -> bool {
        geometry::rect_contains(self.bounds(), point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            Point::new(self.start.x + dx, self.start.y + dy),
            Point::new(self.end.x + dx, self.end.y + dy),
        )
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }
}
