//! Shape definitions for the drawing surface.

mod circle;
mod line;
mod oval;
mod polygon;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use line::Line;
pub use oval::Oval;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use chrono::{DateTime, Utc};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Unique identifier for canvases.
pub type CanvasId = Uuid;

/// Smallest accepted stroke width.
pub const MIN_STROKE_WIDTH: f64 = 0.5;
/// Largest accepted stroke width.
pub const MAX_STROKE_WIDTH: f64 = 50.0;

/// Validation errors raised at shape construction or update time.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("stroke width {0} outside [{MIN_STROKE_WIDTH}, {MAX_STROKE_WIDTH}]")]
    StrokeWidthOutOfRange(f64),
    #[error("not a 6- or 8-digit hex color: {0:?}")]
    InvalidColor(String),
    #[error("not a hex color or \"Transparent\": {0:?}")]
    InvalidFill(String),
    #[error("polygon has {0} points, needs at least {min}", min = Polygon::MIN_POINTS)]
    TooFewPoints(usize),
    #[error("non-finite coordinate in {0:?} geometry")]
    NonFiniteCoordinate(ShapeKind),
    #[error("template name must not be empty")]
    EmptyTemplateName,
}

/// An RGB(A) color as 6 or 8 uppercase hex digits, no `#` stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse from hex, with or without a leading `#`.
    pub fn parse(s: &str) -> Result<Self, ShapeError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if (hex.len() == 6 || hex.len() == 8) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(hex.to_ascii_uppercase()))
        } else {
            Err(ShapeError::InvalidColor(s.to_string()))
        }
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    pub fn black() -> Self {
        Self("000000".to_string())
    }

    pub fn white() -> Self {
        Self("FFFFFF".to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Fill paint: a color, or the literal `"Transparent"` for none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Fill {
    Transparent,
    Color(Color),
}

impl Fill {
    pub const TRANSPARENT_LITERAL: &'static str = "Transparent";

    pub fn parse(s: &str) -> Result<Self, ShapeError> {
        if s == Self::TRANSPARENT_LITERAL {
            Ok(Fill::Transparent)
        } else {
            Color::parse(s)
                .map(Fill::Color)
                .map_err(|_| ShapeError::InvalidFill(s.to_string()))
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Fill::Transparent)
    }

    pub fn color(&self) -> Option<&Color> {
        match self {
            Fill::Transparent => None,
            Fill::Color(c) => Some(c),
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Transparent => f.write_str(Self::TRANSPARENT_LITERAL),
            Fill::Color(c) => f.write_str(c.as_hex()),
        }
    }
}

impl TryFrom<String> for Fill {
    type Error = ShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Fill> for String {
    fn from(fill: Fill) -> Self {
        fill.to_string()
    }
}

/// Stroke style for shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dash,
    Dot,
}

impl StrokeStyle {
    /// Dash array handed to the renderer, scaled by stroke width.
    /// `Solid` has no pattern; `Dot` uses zero-length dashes (drawn as
    /// dots with round caps).
    pub fn dash_pattern(self, stroke_width: f64) -> Option<[f64; 2]> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dash => Some([stroke_width * 4.0, stroke_width * 2.0]),
            StrokeStyle::Dot => Some([0.0, stroke_width * 2.0]),
        }
    }

    /// Recover the style from a renderer dash array. Lossless over the
    /// three values produced by [`StrokeStyle::dash_pattern`].
    pub fn from_dash_pattern(pattern: Option<&[f64]>) -> Self {
        match pattern {
            None => StrokeStyle::Solid,
            Some(p) if p.first().copied().unwrap_or(0.0) <= f64::EPSILON => StrokeStyle::Dot,
            Some(_) => StrokeStyle::Dash,
        }
    }
}

/// Style properties shared by all shape variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Color,
    /// Stroke width, valid in [0.5, 50.0].
    pub stroke_width: f64,
    /// Fill paint.
    pub fill: Fill,
    /// Stroke style.
    pub stroke_style: StrokeStyle,
}

impl ShapeStyle {
    pub fn new(
        stroke_color: Color,
        stroke_width: f64,
        fill: Fill,
        stroke_style: StrokeStyle,
    ) -> Result<Self, ShapeError> {
        let style = Self {
            stroke_color,
            stroke_width,
            fill,
            stroke_style,
        };
        style.validate()?;
        Ok(style)
    }

    /// Out-of-range widths are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if !self.stroke_width.is_finite()
            || self.stroke_width < MIN_STROKE_WIDTH
            || self.stroke_width > MAX_STROKE_WIDTH
        {
            return Err(ShapeError::StrokeWidthOutOfRange(self.stroke_width));
        }
        Ok(())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::black(),
            stroke_width: 2.0,
            fill: Fill::Transparent,
            stroke_style: StrokeStyle::Solid,
        }
    }
}

/// Variant tag, used to key the geometry codec and render dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Oval,
    Circle,
    Triangle,
    Polygon,
}

/// Variant-specific geometry. Tag and payload live together, so a
/// shape whose tag disagrees with its payload cannot be built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Rectangle(Rectangle),
    Oval(Oval),
    Circle(Circle),
    Triangle(Triangle),
    Polygon(Polygon),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Oval(_) => ShapeKind::Oval,
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Triangle(_) => ShapeKind::Triangle,
            Geometry::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Axis-aligned bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Line(s) => s.bounds(),
            Geometry::Rectangle(s) => s.bounds(),
            Geometry::Oval(s) => s.bounds(),
            Geometry::Circle(s) => s.bounds(),
            Geometry::Triangle(s) => s.bounds(),
            Geometry::Polygon(s) => s.bounds(),
        }
    }

    /// Hit test against a point in world coordinates.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Geometry::Line(s) => s.contains(point),
            Geometry::Rectangle(s) => s.contains(point),
            Geometry::Oval(s) => s.contains(point),
            Geometry::Circle(s) => s.contains(point),
            Geometry::Triangle(s) => s.contains(point),
            Geometry::Polygon(s) => s.contains(point),
        }
    }

    /// A copy with every coordinate shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Geometry {
        match self {
            Geometry::Line(s) => Geometry::Line(s.translated(dx, dy)),
            Geometry::Rectangle(s) => Geometry::Rectangle(s.translated(dx, dy)),
            Geometry::Oval(s) => Geometry::Oval(s.translated(dx, dy)),
            Geometry::Circle(s) => Geometry::Circle(s.translated(dx, dy)),
            Geometry::Triangle(s) => Geometry::Triangle(s.translated(dx, dy)),
            Geometry::Polygon(s) => Geometry::Polygon(s.translated(dx, dy)),
        }
    }

    /// Outline path for rendering.
    pub fn to_path(&self) -> BezPath {
        match self {
            Geometry::Line(s) => s.to_path(),
            Geometry::Rectangle(s) => s.to_path(),
            Geometry::Oval(s) => s.to_path(),
            Geometry::Circle(s) => s.to_path(),
            Geometry::Triangle(s) => s.to_path(),
            Geometry::Polygon(s) => s.to_path(),
        }
    }

    fn coordinates(&self) -> Vec<f64> {
        match self {
            Geometry::Line(s) => vec![s.start.x, s.start.y, s.end.x, s.end.y],
            Geometry::Rectangle(s) => vec![s.position.x, s.position.y, s.width, s.height],
            Geometry::Oval(s) => vec![s.center.x, s.center.y, s.radius_x, s.radius_y],
            Geometry::Circle(s) => vec![s.center.x, s.center.y, s.radius],
            Geometry::Triangle(s) => s.points.iter().flat_map(|p| [p.x, p.y]).collect(),
            Geometry::Polygon(s) => s.points.iter().flat_map(|p| [p.x, p.y]).collect(),
        }
    }

    /// Structural validation: finite coordinates everywhere, and at
    /// least three vertices for a polygon.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if let Geometry::Polygon(polygon) = self {
            if polygon.points.len() < Polygon::MIN_POINTS {
                return Err(ShapeError::TooFewPoints(polygon.points.len()));
            }
        }
        if self.coordinates().iter().any(|c| !c.is_finite()) {
            return Err(ShapeError::NonFiniteCoordinate(self.kind()));
        }
        Ok(())
    }
}

/// A committed, persistable drawing object.
///
/// Shapes come into existence through a tool commit or through the
/// codec when loading persisted records; afterwards only translation
/// and style replacement are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    geometry: Geometry,
    style: ShapeStyle,
    created_at: DateTime<Utc>,
    canvas_id: Option<CanvasId>,
    template_name: Option<String>,
}

impl Shape {
    /// Build a new shape, assigning a fresh id. Fails on an invalid
    /// style or degenerate polygon; nothing is silently coerced.
    pub fn new(
        geometry: Geometry,
        style: ShapeStyle,
        canvas_id: Option<CanvasId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ShapeError> {
        geometry.validate()?;
        style.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            geometry,
            style,
            created_at,
            canvas_id,
            template_name: None,
        })
    }

    /// Rebuild a shape with a known id (for storage).
    pub(crate) fn reconstruct(
        id: ShapeId,
        geometry: Geometry,
        style: ShapeStyle,
        created_at: DateTime<Utc>,
        canvas_id: Option<CanvasId>,
        template_name: Option<String>,
    ) -> Self {
        Self {
            id,
            geometry,
            style,
            created_at,
            canvas_id,
            template_name,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn canvas_id(&self) -> Option<CanvasId> {
        self.canvas_id
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    pub fn is_template(&self) -> bool {
        self.template_name.is_some()
    }

    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    /// The same shape (same id, same style) shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Shape {
        Shape {
            geometry: self.geometry.translated(dx, dy),
            ..self.clone()
        }
    }

    /// The same shape with its style replaced; geometry untouched.
    /// Validation is re-applied.
    pub fn with_style(&self, style: ShapeStyle) -> Result<Shape, ShapeError> {
        style.validate()?;
        Ok(Shape {
            style,
            ..self.clone()
        })
    }

    /// An unplaced, reusable copy of this shape: fresh id, no canvas,
    /// a non-empty template name.
    pub fn as_template(
        &self,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Shape, ShapeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ShapeError::EmptyTemplateName);
        }
        Ok(Shape {
            id: Uuid::new_v4(),
            geometry: self.geometry.clone(),
            style: self.style.clone(),
            created_at,
            canvas_id: None,
            template_name: Some(name),
        })
    }

    /// Place this shape (typically a template) onto a canvas: fresh id,
    /// new timestamp, geometry shifted so its bounds origin lands at
    /// `at`.
    pub fn place(&self, canvas_id: CanvasId, at: Point, created_at: DateTime<Utc>) -> Shape {
        let bounds = self.bounds();
        Shape {
            id: Uuid::new_v4(),
            geometry: self.geometry.translated(at.x - bounds.x0, at.y - bounds.y0),
            style: self.style.clone(),
            created_at,
            canvas_id: Some(canvas_id),
            template_name: None,
        }
    }
}
