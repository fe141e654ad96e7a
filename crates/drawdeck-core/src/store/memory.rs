//! In-memory store for tests and ephemeral sessions.

use super::{decode_sorted, BoxFuture, ShapeRecord, ShapeStore, StoreError, StoreResult};
use crate::shapes::{CanvasId, Shape, ShapeId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps records in a map; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<ShapeId, ShapeRecord>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeStore for MemoryStore {
    fn save_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<ShapeId>> {
        let record = ShapeRecord::from_shape(shape);
        Box::pin(async move {
            let record = record?;
            let id = record.id;
            let mut records = self
                .records
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            records.insert(id, record);
            Ok(id)
        })
    }

    fn update_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<Shape>> {
        let record = ShapeRecord::from_shape(shape);
        Box::pin(async move {
            let record = record?;
            let id = record.id;
            let mut records = self
                .records
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            if !records.contains_key(&id) {
                return Err(StoreError::NotFound(id));
            }
            records.insert(id, record.clone());
            record.into_shape()
        })
    }

    fn delete_shape(&self, id: ShapeId) -> BoxFuture<'_, StoreResult<bool>> {
        Box::pin(async move {
            let mut records = self
                .records
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(records.remove(&id).is_some())
        })
    }

    fn shapes_for_canvas(&self, canvas: CanvasId) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let matching = records
                .values()
                .filter(|r| r.canvas_id == Some(canvas))
                .cloned()
                .collect();
            decode_sorted(matching)
        })
    }

    fn templates(&self) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let matching = records
                .values()
                .filter(|r| r.template_name.is_some() && r.canvas_id.is_none())
                .cloned()
                .collect();
            decode_sorted(matching)
        })
    }
}
