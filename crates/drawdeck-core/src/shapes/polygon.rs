//! Polygon shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A closed polygon as an ordered vertex list. The last vertex
/// implicitly connects back to the first; committed polygons always
/// have at least [`Polygon::MIN_POINTS`] vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Fewest vertices a committed polygon may have.
    pub const MIN_POINTS: usize = 3;

    /// Create a new polygon. The vertex-count invariant is enforced
    /// where shapes are built (`Shape::new`) and decoded, so previews
    /// can hold partial outlines.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points)
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::polygon_contains(&self.points, point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        )
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };
        path.move_to(*first);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_contains() {
        assert!(square().contains(Point::new(5.0, 5.0)));
        assert!(!square().contains(Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        let degenerate = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert!(!degenerate.contains(Point::new(5.0, 0.0)));
    }

    #[test]
    fn test_bounds() {
        let bounds = square().bounds();
        assert!((bounds.width() - 10.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translated() {
        let moved = square().translated(5.0, -5.0);
        assert!((moved.points[0].x - 5.0).abs() < f64::EPSILON);
        assert!((moved.points[0].y + 5.0).abs() < f64::EPSILON);
        assert_eq!(moved.vertex_count(), 4);
    }
}
