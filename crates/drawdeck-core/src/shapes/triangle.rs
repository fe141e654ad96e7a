//! Triangle shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A triangle as exactly three vertices, kept in click order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub points: [Point; 3],
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(points: [Point; 3]) -> Self {
        Self { points }
    }

    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points)
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::polygon_contains(&self.points, point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.points.map(|p| Point::new(p.x + dx, p.y + dy)))
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        path.line_to(self.points[1]);
        path.line_to(self.points[2]);
        path.close_path();
        path
    }
}
