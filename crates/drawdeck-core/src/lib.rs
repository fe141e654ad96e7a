//! Drawdeck Core Library
//!
//! Platform-agnostic shape and tool engine for the drawdeck drawing
//! surface: the typed shape model, the per-tool input state machines,
//! hit-testing and move manipulation, and the canonical geometry
//! codec. Rendering backends and window chrome live elsewhere and
//! consume this crate through ids and render descriptors.

pub mod canvas;
pub mod clock;
pub mod codec;
pub mod editor;
pub mod geometry;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod tools;

pub use canvas::{Canvas, ShapeArena};
pub use clock::{Clock, SystemClock};
pub use codec::CodecError;
pub use editor::Editor;
pub use render::RenderDescriptor;
pub use selection::{SelectionController, SelectionState, SELECTION_MARGIN};
pub use shapes::{
    CanvasId, Color, Fill, Geometry, Shape, ShapeError, ShapeId, ShapeKind, ShapeStyle,
    StrokeStyle,
};
pub use store::{MemoryStore, ShapeRecord, ShapeStore, StoreError};
pub use tools::{
    Commit, ShapeCompleted, ToolController, ToolKind, ToolState, POLYGON_CLOSE_TOLERANCE,
};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
