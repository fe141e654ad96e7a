//! Oval shape.

use crate::geometry;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned ellipse described by center and radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oval {
    /// Center point.
    pub center: Point,
    /// Horizontal radius, never negative.
    pub radius_x: f64,
    /// Vertical radius, never negative.
    pub radius_y: f64,
}

impl Oval {
    /// Create a new oval.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    /// Geometry for a completed drag: inscribed in the normalized box
    /// between the two drag corners, whatever the drag direction.
    pub fn from_drag(a: Point, b: Point) -> Self {
        let rect = Rect::from_points(a, b);
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    /// Normalized ellipse test; a zero radius contains nothing.
    pub fn contains(&self, point: Point) -> bool {
        geometry::ellipse_contains(self.center, self.radius_x, self.radius_y, point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            Point::new(self.center.x + dx, self.center.y + dy),
            self.radius_x,
            self.radius_y,
        )
    }

    pub fn to_path(&self) -> BezPath {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), 0.0).to_path(0.1)
    }
}
