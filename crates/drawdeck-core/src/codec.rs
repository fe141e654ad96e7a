//! Canonical encoding of geometry payloads.
//!
//! The blob is an opaque text field to everything outside this module.
//! Decoding is always keyed by the shape's variant tag, never inferred
//! from the blob, and a corrupt blob surfaces as a [`CodecError`]
//! rather than substituted geometry. Unknown extra fields are
//! tolerated on decode; missing required fields are not.

use crate::shapes::{
    Circle, Geometry, Line, Oval, Polygon, Rectangle, ShapeError, ShapeKind, Triangle,
};
use kurbo::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Codec failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{kind:?} payload did not decode: {source}")]
    Malformed {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind:?} payload did not encode: {source}")]
    Unencodable {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] ShapeError),
}

#[derive(Serialize, Deserialize)]
struct LinePayload {
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
}

#[derive(Serialize, Deserialize)]
struct RectanglePayload {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Serialize, Deserialize)]
struct OvalPayload {
    center_x: f64,
    center_y: f64,
    radius_x: f64,
    radius_y: f64,
}

#[derive(Serialize, Deserialize)]
struct CirclePayload {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

#[derive(Serialize, Deserialize)]
struct VertexPayload {
    x: f64,
    y: f64,
}

impl From<Point> for VertexPayload {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<&VertexPayload> for Point {
    fn from(v: &VertexPayload) -> Self {
        Point::new(v.x, v.y)
    }
}

#[derive(Serialize, Deserialize)]
struct TrianglePayload {
    points: [VertexPayload; 3],
}

#[derive(Serialize, Deserialize)]
struct PolygonPayload {
    points: Vec<VertexPayload>,
}

/// Encode a geometry payload to its canonical text blob. Field order
/// is fixed by the payload structs, so equal payloads encode equally.
pub fn encode(geometry: &Geometry) -> Result<String, CodecError> {
    let kind = geometry.kind();
    let json = match geometry {
        Geometry::Line(line) => serde_json::to_string(&LinePayload {
            start_x: line.start.x,
            start_y: line.start.y,
            end_x: line.end.x,
            end_y: line.end.y,
        }),
        Geometry::Rectangle(rect) => serde_json::to_string(&RectanglePayload {
            x: rect.position.x,
            y: rect.position.y,
            width: rect.width,
            height: rect.height,
        }),
        Geometry::Oval(oval) => serde_json::to_string(&OvalPayload {
            center_x: oval.center.x,
            center_y: oval.center.y,
            radius_x: oval.radius_x,
            radius_y: oval.radius_y,
        }),
        Geometry::Circle(circle) => serde_json::to_string(&CirclePayload {
            center_x: circle.center.x,
            center_y: circle.center.y,
            radius: circle.radius,
        }),
        Geometry::Triangle(triangle) => serde_json::to_string(&TrianglePayload {
            points: triangle.points.map(VertexPayload::from),
        }),
        Geometry::Polygon(polygon) => serde_json::to_string(&PolygonPayload {
            points: polygon.points.iter().copied().map(VertexPayload::from).collect(),
        }),
    };
    json.map_err(|source| CodecError::Unencodable { kind, source })
}

/// Decode a blob for the declared variant. The reconstructed geometry
/// passes the same structural validation as freshly built shapes.
pub fn decode(kind: ShapeKind, blob: &str) -> Result<Geometry, CodecError> {
    let geometry = match kind {
        ShapeKind::Line => {
            let p: LinePayload = parse(kind, blob)?;
            Geometry::Line(Line::new(
                Point::new(p.start_x, p.start_y),
                Point::new(p.end_x, p.end_y),
            ))
        }
        ShapeKind::Rectangle => {
            let p: RectanglePayload = parse(kind, blob)?;
            Geometry::Rectangle(Rectangle::new(Point::new(p.x, p.y), p.width, p.height))
        }
        ShapeKind::Oval => {
            let p: OvalPayload = parse(kind, blob)?;
            Geometry::Oval(Oval::new(
                Point::new(p.center_x, p.center_y),
                p.radius_x,
                p.radius_y,
            ))
        }
        ShapeKind::Circle => {
            let p: CirclePayload = parse(kind, blob)?;
            Geometry::Circle(Circle::new(Point::new(p.center_x, p.center_y), p.radius))
        }
        ShapeKind::Triangle => {
            let p: TrianglePayload = parse(kind, blob)?;
            Geometry::Triangle(Triangle::new([
                Point::from(&p.points[0]),
                Point::from(&p.points[1]),
                Point::from(&p.points[2]),
            ]))
        }
        ShapeKind::Polygon => {
            let p: PolygonPayload = parse(kind, blob)?;
            Geometry::Polygon(Polygon::new(p.points.iter().map(Point::from).collect()))
        }
    };
    geometry.validate()?;
    Ok(geometry)
}

fn parse<T: DeserializeOwned>(kind: ShapeKind, blob: &str) -> Result<T, CodecError> {
    serde_json::from_str(blob).map_err(|source| CodecError::Malformed { kind, source })
}
