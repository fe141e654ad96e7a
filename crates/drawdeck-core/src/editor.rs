//! The drawing surface: routes pointer events between the tool and
//! selection controllers, owns the live shape set, and persists
//! commits optimistically.
//!
//! Persistence is the only suspend point. A committed shape is
//! inserted into the arena (and thus rendered and selectable) before
//! the store call is awaited; a store failure is reported through the
//! log and the in-memory commit stands. There is no compensating
//! rollback.

use crate::canvas::{Canvas, ShapeArena};
use crate::clock::Clock;
use crate::render::RenderDescriptor;
use crate::selection::SelectionController;
use crate::shapes::{Shape, ShapeError, ShapeId, ShapeStyle};
use crate::store::{ShapeStore, StoreResult};
use crate::tools::{Commit, ShapeCompleted, ToolController, ToolKind};
use kurbo::{Point, Rect};
use std::sync::Arc;

/// One drawing surface bound to a canvas. Collaborators are passed in
/// at construction; nothing is resolved ad hoc.
pub struct Editor {
    canvas: Canvas,
    arena: ShapeArena,
    tools: ToolController,
    selection: SelectionController,
    store: Arc<dyn ShapeStore>,
    clock: Arc<dyn Clock>,
    completed: Vec<ShapeCompleted>,
}

impl Editor {
    pub fn new(canvas: Canvas, store: Arc<dyn ShapeStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            canvas,
            arena: ShapeArena::new(),
            tools: ToolController::default(),
            selection: SelectionController::new(),
            store,
            clock,
            completed: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn shapes(&self) -> &ShapeArena {
        &self.arena
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.tool()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.tools.style
    }

    /// Style applied to subsequently drawn shapes. Validated up front
    /// so a commit can never fail on it later.
    pub fn set_style(&mut self, style: ShapeStyle) -> Result<(), ShapeError> {
        style.validate()?;
        self.tools.style = style;
        Ok(())
    }

    pub fn selection_mode(&self) -> bool {
        self.selection.is_active()
    }

    /// Toggle selection mode. Entering it discards any half-drawn
    /// preview; leaving it clears the selection.
    pub fn set_selection_mode(&mut self, on: bool) {
        if on {
            self.tools.pointer_cancel();
        }
        self.selection.set_active(on);
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selection.selected()
    }

    /// Replace the live set with the canvas's persisted shapes.
    pub async fn load(&mut self) -> StoreResult<()> {
        let shapes = self.store.shapes_for_canvas(self.canvas.id).await?;
        self.arena.clear();
        for shape in shapes {
            self.arena.insert(shape);
        }
        Ok(())
    }

    pub async fn pointer_down(&mut self, point: Point) -> Option<ShapeId> {
        if self.selection.is_active() {
            self.selection.pointer_down(&self.arena, point);
            return self.selection.selected();
        }
        let commit = self.tools.pointer_down(point)?;
        self.commit(commit).await
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.selection.is_active() {
            self.selection.pointer_move(&mut self.arena, point);
        } else {
            self.tools.pointer_move(point);
        }
    }

    pub async fn pointer_up(&mut self, point: Point) -> Option<ShapeId> {
        if self.selection.is_active() {
            let moved = self.selection.pointer_up(&self.arena)?;
            let id = moved.id();
            if let Err(err) = self.store.update_shape(&moved).await {
                log::warn!("persisting moved shape {id} failed: {err}");
            }
            return Some(id);
        }
        let commit = self.tools.pointer_up(point)?;
        self.commit(commit).await
    }

    pub fn pointer_cancel(&mut self) {
        if self.selection.is_active() {
            self.selection.pointer_cancel(&mut self.arena);
        } else {
            self.tools.pointer_cancel();
        }
    }

    /// Restyle the selected shape and persist the change.
    pub async fn update_selected_style(
        &mut self,
        style: ShapeStyle,
    ) -> Result<Option<ShapeId>, ShapeError> {
        let Some(updated) = self.selection.update_style(&mut self.arena, style)? else {
            return Ok(None);
        };
        let id = updated.id();
        if let Err(err) = self.store.update_shape(&updated).await {
            log::warn!("persisting restyled shape {id} failed: {err}");
        }
        Ok(Some(id))
    }

    /// Remove a shape from the surface and the store. Returns whether
    /// it was present.
    pub async fn remove_shape(&mut self, id: ShapeId) -> bool {
        if self.selection.remove(&mut self.arena, id).is_none() {
            return false;
        }
        if let Err(err) = self.store.delete_shape(id).await {
            log::warn!("deleting shape {id} failed: {err}");
        }
        true
    }

    /// Save the selected shape as a named, unplaced template.
    pub async fn save_selected_as_template(
        &mut self,
        name: impl Into<String>,
    ) -> Result<Option<ShapeId>, ShapeError> {
        let Some(shape) = self.selection.selected().and_then(|id| self.arena.get(id)) else {
            return Ok(None);
        };
        let template = shape.as_template(name, self.clock.now())?;
        let id = template.id();
        if let Err(err) = self.store.save_shape(&template).await {
            log::warn!("persisting template {id} failed: {err}");
        }
        Ok(Some(id))
    }

    pub async fn templates(&self) -> StoreResult<Vec<Shape>> {
        self.store.templates().await
    }

    /// Place a template onto this canvas with its bounds origin at
    /// `at`. The placed copy gets a fresh id and timestamp.
    pub async fn place_template(&mut self, template: &Shape, at: Point) -> ShapeId {
        let shape = template.place(self.canvas.id, at, self.clock.now());
        let id = shape.id();
        self.arena.insert(shape.clone());
        if let Err(err) = self.store.save_shape(&shape).await {
            log::warn!("persisting placed template {id} failed: {err}");
        }
        id
    }

    /// Descriptors for every live shape, back to front.
    pub fn render_shapes(&self) -> Vec<RenderDescriptor> {
        self.arena.iter_ordered().map(RenderDescriptor::for_shape).collect()
    }

    /// Descriptor for the in-flight tool preview, if any.
    pub fn render_preview(&self) -> Option<RenderDescriptor> {
        self.tools
            .preview()
            .map(|geometry| RenderDescriptor::for_preview(&geometry, &self.tools.style))
    }

    /// Outline of the selected shape, if any.
    pub fn selection_outline(&self) -> Option<Rect> {
        self.selection.outline(&self.arena)
    }

    /// Drain completion notifications accumulated since the last call.
    pub fn take_completed(&mut self) -> Vec<ShapeCompleted> {
        std::mem::take(&mut self.completed)
    }

    async fn commit(&mut self, commit: Commit) -> Option<ShapeId> {
        let Commit { geometry, completed } = commit;
        let shape = match Shape::new(
            geometry,
            completed.style.clone(),
            Some(self.canvas.id),
            self.clock.now(),
        ) {
            Ok(shape) => shape,
            Err(err) => {
                log::error!("rejected committed shape: {err}");
                return None;
            }
        };
        let id = shape.id();
        self.arena.insert(shape.clone());
        self.completed.push(completed);
        if let Err(err) = self.store.save_shape(&shape).await {
            log::warn!("persisting shape {id} failed: {err}");
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, StrokeStyle};
    use crate::store::{block_on, BoxFuture, MemoryStore, StoreError};
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Store whose writes always fail, for the optimistic-commit contract.
    struct FailingStore;

    impl ShapeStore for FailingStore {
        fn save_shape(&self, _shape: &Shape) -> BoxFuture<'_, StoreResult<ShapeId>> {
            Box::pin(async { Err(StoreError::Other("offline".to_string())) })
        }

        fn update_shape(&self, _shape: &Shape) -> BoxFuture<'_, StoreResult<Shape>> {
            Box::pin(async { Err(StoreError::Other("offline".to_string())) })
        }

        fn delete_shape(&self, _id: ShapeId) -> BoxFuture<'_, StoreResult<bool>> {
            Box::pin(async { Err(StoreError::Other("offline".to_string())) })
        }

        fn shapes_for_canvas(&self, _canvas: uuid::Uuid) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn templates(&self) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    fn editor_with(store: Arc<dyn ShapeStore>) -> Editor {
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
        ));
        Editor::new(Canvas::new("test", 800.0, 600.0), store, clock)
    }

    fn draw_rect(editor: &mut Editor, from: Point, to: Point) -> ShapeId {
        editor.set_tool(ToolKind::Rectangle);
        block_on(editor.pointer_down(from));
        editor.pointer_move(to);
        block_on(editor.pointer_up(to)).unwrap()
    }

    #[test]
    fn test_draw_commits_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = editor_with(store.clone());
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(100.0, 50.0));

        assert_eq!(editor.shapes().len(), 1);
        let shape = editor.shapes().get(id).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rectangle);
        assert_eq!(shape.canvas_id(), Some(editor.canvas().id));

        let completed = editor.take_completed();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].kind, ShapeKind::Rectangle);
        assert!(editor.take_completed().is_empty());

        let persisted = block_on(store.shapes_for_canvas(editor.canvas().id)).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id(), id);
    }

    #[test]
    fn test_store_failure_keeps_shape() {
        let mut editor = editor_with(Arc::new(FailingStore));
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(40.0, 40.0));
        // The commit stands even though persistence failed
        assert!(editor.shapes().get(id).is_some());
        assert_eq!(editor.render_shapes().len(), 1);
    }

    #[test]
    fn test_load_restores_shapes() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = editor_with(store.clone());
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(10.0, 10.0));

        let mut fresh = Editor::new(
            editor.canvas().clone(),
            store,
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 6, 2, 0, 0, 0).unwrap())),
        );
        block_on(fresh.load()).unwrap();
        assert_eq!(fresh.shapes().len(), 1);
        assert!(fresh.shapes().get(id).is_some());
    }

    #[test]
    fn test_selection_drag_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = editor_with(store.clone());
        let id = draw_rect(&mut editor, Point::new(100.0, 100.0), Point::new(150.0, 140.0));

        editor.set_selection_mode(true);
        block_on(editor.pointer_down(Point::new(120.0, 120.0)));
        assert_eq!(editor.selected(), Some(id));

        // Drag by (30, -10) and commit
        block_on(editor.pointer_down(Point::new(120.0, 120.0)));
        editor.pointer_move(Point::new(150.0, 110.0));
        block_on(editor.pointer_up(Point::new(150.0, 110.0)));
        let bounds = editor.shapes().get(id).unwrap().bounds();
        assert!((bounds.x0 - 130.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 90.0).abs() < f64::EPSILON);

        // The store saw the update too
        let persisted = block_on(store.shapes_for_canvas(editor.canvas().id)).unwrap();
        assert!((persisted[0].bounds().x0 - 130.0).abs() < f64::EPSILON);

        // Drag again and cancel: position restored exactly
        block_on(editor.pointer_down(Point::new(150.0, 110.0)));
        editor.pointer_move(Point::new(300.0, 300.0));
        editor.pointer_cancel();
        let bounds = editor.shapes().get(id).unwrap().bounds();
        assert!((bounds.x0 - 130.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_mode_discards_preview() {
        let mut editor = editor_with(Arc::new(MemoryStore::new()));
        editor.set_tool(ToolKind::Polygon);
        block_on(editor.pointer_down(Point::new(0.0, 0.0)));
        block_on(editor.pointer_down(Point::new(50.0, 0.0)));
        assert!(editor.render_preview().is_some());

        editor.set_selection_mode(true);
        assert!(editor.render_preview().is_none());
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_update_selected_style() {
        let mut editor = editor_with(Arc::new(MemoryStore::new()));
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        editor.set_selection_mode(true);
        block_on(editor.pointer_down(Point::new(25.0, 25.0)));

        let style = ShapeStyle {
            stroke_style: StrokeStyle::Dash,
            ..ShapeStyle::default()
        };
        let updated = block_on(editor.update_selected_style(style)).unwrap();
        assert_eq!(updated, Some(id));
        assert_eq!(
            editor.shapes().get(id).unwrap().style().stroke_style,
            StrokeStyle::Dash
        );
    }

    #[test]
    fn test_remove_shape() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = editor_with(store.clone());
        let id = draw_rect(&mut editor, Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        editor.set_selection_mode(true);
        block_on(editor.pointer_down(Point::new(25.0, 25.0)));

        assert!(block_on(editor.remove_shape(id)));
        assert!(editor.shapes().is_empty());
        assert_eq!(editor.selected(), None);
        assert!(!block_on(editor.remove_shape(id)));
        assert!(block_on(store.shapes_for_canvas(editor.canvas().id))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_template_save_and_place() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = editor_with(store.clone());
        draw_rect(&mut editor, Point::new(10.0, 10.0), Point::new(60.0, 40.0));
        editor.set_selection_mode(true);
        block_on(editor.pointer_down(Point::new(30.0, 30.0)));

        let template_id = block_on(editor.save_selected_as_template("card"))
            .unwrap()
            .unwrap();
        let templates = block_on(editor.templates()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id(), template_id);

        let placed_id = block_on(editor.place_template(&templates[0], Point::new(200.0, 200.0)));
        let placed = editor.shapes().get(placed_id).unwrap();
        assert!(!placed.is_template());
        assert!((placed.bounds().x0 - 200.0).abs() < f64::EPSILON);
        assert_eq!(editor.shapes().len(), 2);
    }

    #[test]
    fn test_commit_preview_cleared() {
        let mut editor = editor_with(Arc::new(MemoryStore::new()));
        editor.set_tool(ToolKind::Oval);
        block_on(editor.pointer_down(Point::new(0.0, 0.0)));
        editor.pointer_move(Point::new(80.0, 60.0));
        assert!(editor.render_preview().is_some());
        block_on(editor.pointer_up(Point::new(80.0, 60.0)));
        assert!(editor.render_preview().is_none());
        assert_eq!(editor.render_shapes().len(), 1);
    }

    #[test]
    fn test_invalid_geometry_is_full_noop() {
        let mut editor = editor_with(Arc::new(MemoryStore::new()));
        editor.set_tool(ToolKind::Line);
        block_on(editor.pointer_down(Point::new(0.0, 0.0)));
        let id = block_on(editor.pointer_up(Point::new(f64::NAN, 0.0)));
        assert_eq!(id, None);
        assert!(editor.shapes().is_empty());
        assert!(editor.take_completed().is_empty());
    }
}
