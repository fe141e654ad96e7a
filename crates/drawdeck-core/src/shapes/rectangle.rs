//! Rectangle shape.

use crate::geometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle, never negative.
    pub width: f64,
    /// Height of the rectangle, never negative.
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// Geometry for a completed drag: normalized to top-left anchor and
    /// non-negative extents regardless of drag direction.
    pub fn from_drag(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(
            Point::new(min_x, min_y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::rect_contains(self.as_rect(), point)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            Point::new(self.position.x + dx, self.position.y + dy),
            self.width,
            self.height,
        )
    }

    pub fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}
