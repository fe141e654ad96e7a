//! Pure geometric predicates shared by the shape variants.
//!
//! Everything in this module is a stateless function over kurbo
//! primitives, so the shape files can stay thin and the math is
//! testable in isolation.

use kurbo::{Point, Rect};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Axis-aligned bounding box of a point list.
///
/// An empty list yields a degenerate zero-area rect at the origin.
pub fn points_bounds(points: &[Point]) -> Rect {
    if points.is_empty() {
        return Rect::ZERO;
    }
    let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.x), mx.max(p.x))
    });
    let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(mn, mx), p| {
        (mn.min(p.y), mx.max(p.y))
    });
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Inclusive axis-aligned box containment: all four edges count as
/// inside, so degenerate (zero-extent) boxes still contain their own
/// boundary points.
pub fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Normalized ellipse containment test.
///
/// Returns false when either radius is non-positive, so degenerate
/// ellipses never contain anything and the division stays safe.
pub fn ellipse_contains(center: Point, radius_x: f64, radius_y: f64, point: Point) -> bool {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return false;
    }
    let nx = (point.x - center.x) / radius_x;
    let ny = (point.y - center.y) / radius_y;
    nx * nx + ny * ny <= 1.0
}

/// Even-odd ray-casting containment test for a closed polygon.
///
/// Casts a horizontal ray from `point` towards +x and counts edge
/// crossings; the point is inside iff the count is odd. Fewer than 3
/// vertices never contain any point.
pub fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
