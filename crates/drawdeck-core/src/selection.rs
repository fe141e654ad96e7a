//! Selection mode and drag-to-move manipulation.

use crate::canvas::ShapeArena;
use crate::shapes::{Shape, ShapeError, ShapeId, ShapeStyle};
use kurbo::{Point, Rect};

/// Margin added on every side of a selected shape's bounds when
/// computing the selection outline.
pub const SELECTION_MARGIN: f64 = 2.0;

/// Bookkeeping for an in-flight move: the pointer origin plus a clone
/// of the shape as it was when the drag started. Moves re-apply the
/// total delta to the original, so a commit lands on original + delta
/// exactly and a cancel restores the original exactly.
#[derive(Debug, Clone)]
pub struct DragState {
    pub shape_id: ShapeId,
    pub start_pointer: Point,
    pub original: Shape,
}

/// Selection-mode state.
#[derive(Debug, Clone, Default)]
pub enum SelectionState {
    /// Selection mode is off.
    #[default]
    Inactive,
    /// Mode is on, nothing picked.
    Ready,
    /// A shape is selected.
    Selected(ShapeId),
    /// The selected shape is being moved.
    Dragging(DragState),
}

/// Hit-tests, selects and manipulates committed shapes.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, SelectionState::Inactive)
    }

    pub fn selected(&self) -> Option<ShapeId> {
        match &self.state {
            SelectionState::Selected(id) => Some(*id),
            SelectionState::Dragging(drag) => Some(drag.shape_id),
            _ => None,
        }
    }

    /// Turning the mode off drops any selection and in-flight drag;
    /// turning it on leaves an existing selection alone.
    pub fn set_active(&mut self, active: bool) {
        if !active {
            self.state = SelectionState::Inactive;
        } else if matches!(self.state, SelectionState::Inactive) {
            self.state = SelectionState::Ready;
        }
    }

    /// Pick or start moving. Clicking the current target starts a
    /// drag; otherwise the topmost hit (front to back) replaces the
    /// selection, and a miss clears it.
    pub fn pointer_down(&mut self, arena: &ShapeArena, point: Point) {
        self.state = match std::mem::take(&mut self.state) {
            SelectionState::Inactive => SelectionState::Inactive,
            SelectionState::Selected(id) => match arena.get(id) {
                Some(shape) if shape.contains(point) => SelectionState::Dragging(DragState {
                    shape_id: id,
                    start_pointer: point,
                    original: shape.clone(),
                }),
                _ => pick(arena, point),
            },
            SelectionState::Ready | SelectionState::Dragging(_) => pick(arena, point),
        };
    }

    /// While dragging, re-derive the shape from its original plus the
    /// total pointer delta.
    pub fn pointer_move(&mut self, arena: &mut ShapeArena, point: Point) {
        if let SelectionState::Dragging(drag) = &self.state {
            let delta = point - drag.start_pointer;
            arena.insert(drag.original.translated(delta.x, delta.y));
        }
    }

    /// Commit the move. Returns the shape at its final position so the
    /// caller can persist it.
    pub fn pointer_up(&mut self, arena: &ShapeArena) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            SelectionState::Dragging(drag) => {
                self.state = SelectionState::Selected(drag.shape_id);
                arena.get(drag.shape_id).cloned()
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Abandon the move and restore the original position.
    pub fn pointer_cancel(&mut self, arena: &mut ShapeArena) {
        match std::mem::take(&mut self.state) {
            SelectionState::Dragging(drag) => {
                self.state = SelectionState::Selected(drag.shape_id);
                arena.insert(drag.original);
            }
            other => self.state = other,
        }
    }

    /// Selection outline: the target's bounds grown by
    /// [`SELECTION_MARGIN`] on all sides.
    pub fn outline(&self, arena: &ShapeArena) -> Option<Rect> {
        self.selected()
            .and_then(|id| arena.get(id))
            .map(|shape| shape.bounds().inflate(SELECTION_MARGIN, SELECTION_MARGIN))
    }

    /// Replace the selected shape's style; geometry stays untouched and
    /// validation is re-applied before the arena changes.
    pub fn update_style(
        &mut self,
        arena: &mut ShapeArena,
        style: ShapeStyle,
    ) -> Result<Option<Shape>, ShapeError> {
        let Some(id) = self.selected() else {
            return Ok(None);
        };
        let Some(shape) = arena.get(id) else {
            return Ok(None);
        };
        let updated = shape.with_style(style)?;
        arena.insert(updated.clone());
        Ok(Some(updated))
    }

    /// Remove a shape from the live set, clearing the selection if it
    /// pointed at the removed shape.
    pub fn remove(&mut self, arena: &mut ShapeArena, id: ShapeId) -> Option<Shape> {
        if self.selected() == Some(id) {
            self.state = SelectionState::Ready;
        }
        arena.remove(id)
    }
}

fn pick(arena: &ShapeArena, point: Point) -> SelectionState {
    match arena.shape_at(point) {
        Some(id) => SelectionState::Selected(id),
        None => SelectionState::Ready,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Color, Fill, Geometry, Rectangle, StrokeStyle};
    use chrono::Utc;

    fn arena_with_rect() -> (ShapeArena, ShapeId) {
        let mut arena = ShapeArena::new();
        let shape = Shape::new(
            Geometry::Rectangle(Rectangle::new(Point::new(100.0, 100.0), 50.0, 40.0)),
            ShapeStyle::default(),
            None,
            Utc::now(),
        )
        .unwrap();
        let id = shape.id();
        arena.insert(shape);
        (arena, id)
    }

    fn selecting() -> SelectionController {
        let mut sc = SelectionController::new();
        sc.set_active(true);
        sc
    }

    #[test]
    fn test_inactive_ignores_clicks() {
        let (arena, _) = arena_with_rect();
        let mut sc = SelectionController::new();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        assert_eq!(sc.selected(), None);
        assert!(!sc.is_active());
    }

    #[test]
    fn test_click_selects_and_miss_clears() {
        let (arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        assert_eq!(sc.selected(), Some(id));
        sc.pointer_up(&arena);
        sc.pointer_down(&arena, Point::new(500.0, 500.0));
        assert_eq!(sc.selected(), None);
        assert!(sc.is_active());
    }

    #[test]
    fn test_drag_commit_moves_exactly() {
        let (mut arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        // Second press on the target starts the drag
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        sc.pointer_move(&mut arena, Point::new(150.0, 110.0));
        let moved = sc.pointer_up(&arena).unwrap();
        let bounds = moved.bounds();
        assert!((bounds.x0 - 130.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 90.0).abs() < f64::EPSILON);
        assert_eq!(sc.selected(), Some(id));
    }

    #[test]
    fn test_drag_cancel_restores_exactly() {
        let (mut arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        sc.pointer_move(&mut arena, Point::new(150.0, 110.0));
        sc.pointer_cancel(&mut arena);
        let bounds = arena.get(id).unwrap().bounds();
        assert!((bounds.x0 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 100.0).abs() < f64::EPSILON);
        assert_eq!(sc.selected(), Some(id));
    }

    #[test]
    fn test_intermediate_moves_accumulate_from_original() {
        let (mut arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        for step in 1..=10 {
            sc.pointer_move(&mut arena, Point::new(120.0 + step as f64 * 0.1, 120.0));
        }
        sc.pointer_move(&mut arena, Point::new(150.0, 110.0));
        let bounds = arena.get(id).unwrap().bounds();
        // Total delta applied to the original, not summed increments
        assert!((bounds.x0 - 130.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outline_margin() {
        let (arena, _) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        let outline = sc.outline(&arena).unwrap();
        assert!((outline.x0 - 98.0).abs() < f64::EPSILON);
        assert!((outline.y0 - 98.0).abs() < f64::EPSILON);
        assert!((outline.x1 - 152.0).abs() < f64::EPSILON);
        assert!((outline.y1 - 142.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disable_clears_selection() {
        let (arena, _) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        assert!(sc.selected().is_some());
        sc.set_active(false);
        assert_eq!(sc.selected(), None);
        assert!(!sc.is_active());
    }

    #[test]
    fn test_update_style_validates() {
        let (mut arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));

        let bad = ShapeStyle {
            stroke_width: 51.0,
            ..ShapeStyle::default()
        };
        assert!(sc.update_style(&mut arena, bad).is_err());
        // Arena untouched on failure
        assert!((arena.get(id).unwrap().style().stroke_width - 2.0).abs() < f64::EPSILON);

        let good = ShapeStyle::new(
            Color::parse("FF0000").unwrap(),
            5.0,
            Fill::Transparent,
            StrokeStyle::Dot,
        )
        .unwrap();
        let updated = sc.update_style(&mut arena, good.clone()).unwrap().unwrap();
        assert_eq!(updated.style(), &good);
        assert_eq!(arena.get(id).unwrap().style().stroke_style, StrokeStyle::Dot);
    }

    #[test]
    fn test_remove_clears_selection() {
        let (mut arena, id) = arena_with_rect();
        let mut sc = selecting();
        sc.pointer_down(&arena, Point::new(120.0, 120.0));
        assert!(sc.remove(&mut arena, id).is_some());
        assert_eq!(sc.selected(), None);
        assert!(sc.is_active());
        assert!(arena.is_empty());
    }
}
