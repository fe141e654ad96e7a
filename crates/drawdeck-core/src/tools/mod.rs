//! Tool state machines turning pointer events into committed shapes.
//!
//! Two families share one controller: drag tools (line, rectangle,
//! oval, circle) collect between pointer-down and pointer-up, while
//! multi-point tools (triangle, polygon) collect one vertex per click.
//! Either way the controller only ever yields a [`Commit`] at a commit
//! transition or a transient preview; cancelling leaves nothing behind.

use crate::geometry;
use crate::shapes::{
    Circle, Geometry, Line, Oval, Polygon, Rectangle, ShapeKind, ShapeStyle, Triangle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Clicks landing within this distance of a polygon's first vertex
/// close the polygon instead of adding a vertex.
pub const POLYGON_CLOSE_TOLERANCE: f64 = 10.0;

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Line,
    Rectangle,
    Oval,
    Circle,
    Triangle,
    Polygon,
}

impl ToolKind {
    /// Drag tools commit on pointer-up; the rest collect clicks.
    pub fn is_drag(self) -> bool {
        matches!(
            self,
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Oval | ToolKind::Circle
        )
    }

    pub fn shape_kind(self) -> ShapeKind {
        match self {
            ToolKind::Line => ShapeKind::Line,
            ToolKind::Rectangle => ShapeKind::Rectangle,
            ToolKind::Oval => ShapeKind::Oval,
            ToolKind::Circle => ShapeKind::Circle,
            ToolKind::Triangle => ShapeKind::Triangle,
            ToolKind::Polygon => ShapeKind::Polygon,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Waiting for input.
    #[default]
    Idle,
    /// A drag tool is collecting between pointer-down and pointer-up.
    Dragging { start: Point, current: Point },
    /// A multi-point tool is collecting clicked vertices; `cursor`
    /// drives the rubber-band preview and is never committed.
    Placing { points: Vec<Point>, cursor: Point },
}

/// Notification emitted when a tool reaches its commit transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCompleted {
    pub kind: ShapeKind,
    /// First point of the interaction (drag start, or first click).
    pub start: Point,
    /// Last point of the interaction (drag end, or last kept click).
    pub end: Point,
    pub style: ShapeStyle,
}

/// A committed interaction: finished geometry plus its notification.
#[derive(Debug, Clone)]
pub struct Commit {
    pub geometry: Geometry,
    pub completed: ShapeCompleted,
}

/// Per-tool input state machine.
#[derive(Debug, Clone)]
pub struct ToolController {
    tool: ToolKind,
    state: ToolState,
    /// Style applied to new shapes.
    pub style: ShapeStyle,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new(ToolKind::default(), ShapeStyle::default())
    }
}

impl ToolController {
    pub fn new(tool: ToolKind, style: ShapeStyle) -> Self {
        Self {
            tool,
            state: ToolState::Idle,
            style,
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Switching tools discards any in-progress collection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.state = ToolState::Idle;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    pub fn pointer_down(&mut self, point: Point) -> Option<Commit> {
        match self.tool {
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Oval | ToolKind::Circle => {
                self.state = ToolState::Dragging {
                    start: point,
                    current: point,
                };
                None
            }
            ToolKind::Triangle => self.place_triangle_vertex(point),
            ToolKind::Polygon => self.place_polygon_vertex(point),
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        match &mut self.state {
            ToolState::Idle => {}
            ToolState::Dragging { current, .. } => *current = point,
            ToolState::Placing { cursor, .. } => *cursor = point,
        }
    }

    /// Drag tools commit here; multi-point tools ignore releases.
    pub fn pointer_up(&mut self, point: Point) -> Option<Commit> {
        match std::mem::take(&mut self.state) {
            ToolState::Dragging { start, .. } => drag_geometry(self.tool, start, point)
                .map(|geometry| self.commit(geometry, start, point)),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Discard the interaction; no shape, no preview remains.
    pub fn pointer_cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Geometry to render while an interaction is in flight. Single
    /// collected points have no visible geometry.
    pub fn preview(&self) -> Option<Geometry> {
        match &self.state {
            ToolState::Idle => None,
            ToolState::Dragging { start, current } => drag_geometry(self.tool, *start, *current),
            ToolState::Placing { points, cursor } => {
                let mut outline = points.clone();
                if outline.last() != Some(cursor) {
                    outline.push(*cursor);
                }
                match outline.len() {
                    0 | 1 => None,
                    2 => Some(Geometry::Line(Line::new(outline[0], outline[1]))),
                    _ => Some(Geometry::Polygon(Polygon::new(outline))),
                }
            }
        }
    }

    fn place_triangle_vertex(&mut self, point: Point) -> Option<Commit> {
        let mut points = self.take_placed_points();
        points.push(point);
        if points.len() == 3 {
            let triangle = Triangle::new([points[0], points[1], points[2]]);
            return Some(self.commit(Geometry::Triangle(triangle), points[0], points[2]));
        }
        self.state = ToolState::Placing {
            points,
            cursor: point,
        };
        None
    }

    fn place_polygon_vertex(&mut self, point: Point) -> Option<Commit> {
        let mut points = self.take_placed_points();
        if points.len() >= Polygon::MIN_POINTS
            && geometry::distance(point, points[0]) <= POLYGON_CLOSE_TOLERANCE
        {
            // Closing click: commit the collected vertices without it.
            let first = points[0];
            let last = points[points.len() - 1];
            return Some(self.commit(Geometry::Polygon(Polygon::new(points)), first, last));
        }
        points.push(point);
        self.state = ToolState::Placing {
            points,
            cursor: point,
        };
        None
    }

    fn take_placed_points(&mut self) -> Vec<Point> {
        match std::mem::take(&mut self.state) {
            ToolState::Placing { points, .. } => points,
            _ => Vec::new(),
        }
    }

    fn commit(&self, geometry: Geometry, start: Point, end: Point) -> Commit {
        Commit {
            completed: ShapeCompleted {
                kind: geometry.kind(),
                start,
                end,
                style: self.style.clone(),
            },
            geometry,
        }
    }
}

/// Committed (or previewed) geometry for a drag from `start` to `end`.
/// Multi-point tools have no drag geometry.
fn drag_geometry(tool: ToolKind, start: Point, end: Point) -> Option<Geometry> {
    match tool {
        ToolKind::Line => Some(Geometry::Line(Line::from_drag(start, end))),
        ToolKind::Rectangle => Some(Geometry::Rectangle(Rectangle::from_drag(start, end))),
        ToolKind::Oval => Some(Geometry::Oval(Oval::from_drag(start, end))),
        ToolKind::Circle => Some(Geometry::Circle(Circle::from_drag(start, end))),
        ToolKind::Triangle | ToolKind::Polygon => None,
    }
}
