//! Render descriptors handed to the drawing backend.
//!
//! The renderer receives plain data copied out of the live set, never
//! references into it; it addresses shapes by id when it needs to
//! correlate frames.

use crate::shapes::{Color, Fill, Geometry, Shape, ShapeId, ShapeKind, ShapeStyle, StrokeStyle};
use kurbo::BezPath;

/// Everything needed to draw one shape or one preview.
#[derive(Debug, Clone)]
pub struct RenderDescriptor {
    /// Id of the source shape; previews have none.
    pub shape_id: Option<ShapeId>,
    pub kind: ShapeKind,
    pub geometry: Geometry,
    /// Outline path for the geometry.
    pub path: BezPath,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
    /// Dash array derived from the stroke style; `None` renders solid.
    pub dash_pattern: Option<[f64; 2]>,
    pub fill: Fill,
}

impl RenderDescriptor {
    pub fn new(shape_id: Option<ShapeId>, geometry: &Geometry, style: &ShapeStyle) -> Self {
        Self {
            shape_id,
            kind: geometry.kind(),
            geometry: geometry.clone(),
            path: geometry.to_path(),
            stroke_color: style.stroke_color.clone(),
            stroke_width: style.stroke_width,
            stroke_style: style.stroke_style,
            dash_pattern: style.stroke_style.dash_pattern(style.stroke_width),
            fill: style.fill.clone(),
        }
    }

    pub fn for_shape(shape: &Shape) -> Self {
        Self::new(Some(shape.id()), shape.geometry(), shape.style())
    }

    pub fn for_preview(geometry: &Geometry, style: &ShapeStyle) -> Self {
        Self::new(None, geometry, style)
    }
}
