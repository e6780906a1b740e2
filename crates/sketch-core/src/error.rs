//! Error taxonomy shared by every sketch crate.

use thiserror::Error;

/// Failures surfaced synchronously to the caller.
///
/// Degenerate random samples never show up here; the attribute generator
/// resamples them locally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SketchError {
    /// No renderable surface, adapter or device could be acquired.
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),

    /// Non-indexed geometry whose vertex count is not a multiple of 3.
    #[error("vertex count {vertex_count} is not a multiple of 3")]
    VertexCountNotTriangles { vertex_count: usize },

    /// A per-vertex attribute array does not match the geometry.
    #[error("attribute `{attribute}` has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Geometry handed to a program that assembles a different primitive.
    #[error("program `{program}` does not draw {primitive}")]
    WrongPrimitive {
        program: &'static str,
        primitive: &'static str,
    },

    /// An object id that this composer never handed out.
    #[error("no object with index {index}")]
    UnknownObject { index: usize },

    /// A proximity-mask program was fed a point set of the wrong size.
    #[error("program compiled for {expected} points, got {actual}")]
    PointCountMismatch { expected: usize, actual: usize },

    /// `render` or `resize` after `unload`.
    #[error("`{operation}` called after unload")]
    AfterUnload { operation: &'static str },

    /// `unload` called a second time; nothing was released.
    #[error("sketch already unloaded")]
    AlreadyUnloaded,

    /// Backend failure while drawing (e.g. out of memory).
    #[error("gpu error: {0}")]
    Gpu(String),
}

pub type Result<T> = std::result::Result<T, SketchError>;
