//! File-backed store for native platforms.
//!
//! Stores one JSON record per shape in a directory.

use super::{decode_sorted, BoxFuture, ShapeRecord, ShapeStore, StoreError, StoreResult};
use crate::shapes::{CanvasId, Shape, ShapeId};
use std::fs;
use std::path::PathBuf;

pub struct FileStore {
    /// Base directory for shape records.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store under the given directory, creating it
    /// if needed.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StoreError::Io(format!("Failed to create store directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/drawdeck/shapes/`
    /// On Windows: `%APPDATA%\drawdeck\shapes\`
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("drawdeck").join("shapes"))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn record_path(&self, id: ShapeId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    fn write_record(&self, record: &ShapeRecord) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.record_path(record.id);
        fs::write(&path, json)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn read_records(&self) -> StoreResult<Vec<ShapeRecord>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StoreError::Io(format!("Failed to read directory: {}", e)))?;
        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let json = fs::read_to_string(&path).map_err(|e| {
                    StoreError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let record: ShapeRecord = serde_json::from_str(&json).map_err(|e| {
                    StoreError::Serialization(format!(
                        "Failed to parse {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                records.push(record);
            }
        }
        Ok(records)
    }
}

impl ShapeStore for FileStore {
    fn save_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<ShapeId>> {
        let record = ShapeRecord::from_shape(shape);
        Box::pin(async move {
            let record = record?;
            let id = record.id;
            self.write_record(&record)?;
            Ok(id)
        })
    }

    fn update_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<Shape>> {
        let record = ShapeRecord::from_shape(shape);
        Box::pin(async move {
            let record = record?;
            if !self.record_path(record.id).exists() {
                return Err(StoreError::NotFound(record.id));
            }
            self.write_record(&record)?;
            record.into_shape()
        })
    }

    fn delete_shape(&self, id: ShapeId) -> BoxFuture<'_, StoreResult<bool>> {
        let path = self.record_path(id);
        Box::pin(async move {
            if !path.exists() {
                return Ok(false);
            }
            fs::remove_file(&path)
                .map_err(|e| StoreError::Io(format!("Failed to delete {}: {}", path.display(), e)))?;
            Ok(true)
        })
    }

    fn shapes_for_canvas(&self, canvas: CanvasId) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
        Box::pin(async move {
            let records = self.read_records()?;
            decode_sorted(
                records
                    .into_iter()
                    .filter(|r| r.canvas_id == Some(canvas))
                    .collect(),
            )
        })
    }

    fn templates(&self) -> BoxFuture<'_, StoreResult<Vec<Shape>>> {
        Box::pin(async move {
            let records = self.read_records()?;
            decode_sorted(
                records
                    .into_iter()
                    .filter(|r| r.template_name.is_some() && r.canvas_id.is_none())
                    .collect(),
            )
        })
    }
}
