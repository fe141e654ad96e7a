//! Persistence seam for shapes and templates.
//!
//! The core never talks to a storage engine directly; it hands
//! [`ShapeRecord`]s across this trait. Records carry the shared
//! columns in typed form and the variant geometry as the opaque codec
//! blob, so every save/load passes through the codec.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use crate::codec::{self, CodecError};
use crate::shapes::{CanvasId, Shape, ShapeId, ShapeKind, ShapeStyle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("shape not found: {0}")]
    NotFound(ShapeId),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("store error: {0}")]
    Other(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for shape persistence backends.
///
/// The core treats every call as a suspend point; it never blocks
/// pointer handling on one. Timeouts and retries are the backend's
/// concern.
pub trait ShapeStore: Send + Sync {
    /// Persist a newly committed shape.
    fn save_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<ShapeId>>;

    /// Persist changes to an existing shape, returning the stored row.
    fn update_shape(&self, shape: &Shape) -> BoxFuture<'_, StoreResult<Shape>>;

    /// Delete a shape. Returns whether it existed.
    fn delete_shape(&self, id: ShapeId) -> BoxFuture<'_, StoreResult<bool>>;

    /// Load all shapes placed on a canvas, oldest first.
    fn shapes_for_canvas(&self, canvas: CanvasId) -> BoxFuture<'_, StoreResult<Vec<Shape>>>;

    /// Load all unplaced template shapes.
    fn templates(&self) -> BoxFuture<'_, StoreResult<Vec<Shape>>>;
}

/// The persisted row: shared columns in typed form plus the opaque
/// geometry blob keyed by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub geometry: String,
    pub style: ShapeStyle,
    pub created_at: DateTime<Utc>,
    pub canvas_id: Option<CanvasId>,
    pub template_name: Option<String>,
}

impl ShapeRecord {
    pub fn from_shape(shape: &Shape) -> StoreResult<Self> {
        Ok(Self {
            id: shape.id(),
            kind: shape.kind(),
            geometry: codec::encode(shape.geometry())?,
            style: shape.style().clone(),
            created_at: shape.created_at(),
            canvas_id: shape.canvas_id(),
            template_name: shape.template_name().map(str::to_string),
        })
    }

    pub fn into_shape(self) -> StoreResult<Shape> {
        let geometry = codec::decode(self.kind, &self.geometry)?;
        Ok(Shape::reconstruct(
            self.id,
            geometry,
            self.style,
            self.created_at,
            self.canvas_id,
            self.template_name,
        ))
    }
}

/// Decode a batch of records into shapes, oldest first, so loading
/// restores the original draw order.
pub(crate) fn decode_sorted(mut records: Vec<ShapeRecord>) -> StoreResult<Vec<Shape>> {
    records.sort_by_key(|r| r.created_at);
    records.into_iter().map(ShapeRecord::into_shape).collect()
}

#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
