//! Error types shared by the layer stack, the DOM helper and surfaces.

use thiserror::Error;

/// Failure reported by a [`Dom`](crate::dom::Dom) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("dom operation on `{target}` failed: {reason}")]
    Operation { target: String, reason: String },
}

/// Failure reported by a drawing surface or its factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("surface `{id}`: {reason}")]
pub struct SurfaceError {
    pub id: String,
    pub reason: String,
}

impl SurfaceError {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`CanvasComponent`](crate::canvas::CanvasComponent).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// A layer index outside `0..count`.
    #[error("invalid layer index {index} (layer count {count})")]
    InvalidLayerIndex { index: i64, count: usize },

    /// A layer rejected a size update; earlier layers were restored.
    #[error("failed to resize layer {index}")]
    LayerResize {
        index: usize,
        #[source]
        source: SurfaceError,
    },

    /// The factory could not create the surface for a layer.
    #[error("failed to create layer {index}")]
    SurfaceCreate {
        index: usize,
        #[source]
        source: SurfaceError,
    },

    #[error(transparent)]
    Dom(#[from] DomError),

    /// The configuration could not be decoded.
    #[error("invalid canvas config: {0}")]
    Config(String),
}
