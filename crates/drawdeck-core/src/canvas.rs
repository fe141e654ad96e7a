//! Canvas context and the live shape set.

use crate::shapes::{CanvasId, Color, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Drawing-context metadata. Canvas CRUD and storage belong to an
/// external collaborator; the core only carries what drawing needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Canvas {
    pub id: CanvasId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background: Color,
}

impl Canvas {
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            background: Color::white(),
        }
    }
}

/// The live shapes, addressed by stable id. Insertion order is draw
/// order: the most recently added shape sits on top. Consumers hold
/// ids, never references into the map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeArena {
    shapes: HashMap<ShapeId, Shape>,
    z_order: Vec<ShapeId>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape, or replace one already present without disturbing
    /// its z position.
    pub fn insert(&mut self, shape: Shape) {
        let id = shape.id();
        if !self.shapes.contains_key(&id) {
            self.z_order.push(id);
        }
        self.shapes.insert(id, shape);
    }

    /// Remove a shape from the live set.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes in z-order (back to front).
    pub fn iter_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Topmost shape containing the point, walking front to back.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.contains(point)))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
