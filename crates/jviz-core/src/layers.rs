//! Layer-stack manager.
//!
//! Owns the ordered surfaces of one canvas. A rebuild always discards every
//! handle and creates a fresh set, so no surface outlives a count change.

use crate::dom::{Dom, render_tag};
use crate::error::CanvasError;
use crate::geometry::Size;
use crate::id::layer_id;
use crate::surface::{Surface, SurfaceFactory, SurfaceSpec};
use smallvec::SmallVec;

/// Ordered stack of drawing surfaces sharing one logical size.
#[derive(Debug)]
pub struct LayerStack<S> {
    base_id: String,
    class: String,
    layers: SmallVec<[S; 4]>,
}

impl<S: Surface> LayerStack<S> {
    /// An empty stack whose layers will be named `{base_id}-{index}`.
    pub fn new(base_id: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            base_id: base_id.into(),
            class: class.into(),
            layers: SmallVec::new(),
        }
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer_id(&self, index: usize) -> String {
        layer_id(&self.base_id, index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.layers.iter()
    }

    pub fn get(&self, index: usize) -> Result<&S, CanvasError> {
        let count = self.layers.len();
        self.layers.get(index).ok_or_else(|| invalid_index(index as i64, count))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut S, CanvasError> {
        let count = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or_else(|| invalid_index(index as i64, count))
    }

    /// Replace the stack with `count` fresh surfaces inside `container`.
    ///
    /// The container is emptied, one `<canvas>` element is appended per
    /// layer, and then each surface is created at `size`. If any step fails
    /// the stack is left empty.
    pub fn rebuild<D, F>(
        &mut self,
        count: usize,
        container: &str,
        size: Size,
        dom: &mut D,
        factory: &mut F,
    ) -> Result<(), CanvasError>
    where
        D: Dom,
        F: SurfaceFactory<Surface = S>,
    {
        self.layers.clear();
        dom.set_html(container, "")?;

        for index in 0..count {
            let id = self.layer_id(index);
            let html = render_tag("canvas", &[("id", id.as_str()), ("class", self.class.as_str())]);
            dom.append_html(container, &html)?;
        }

        let mut fresh = SmallVec::new();
        for index in 0..count {
            let spec = SurfaceSpec {
                id: self.layer_id(index),
                width: size.width,
                height: size.height,
            };
            let surface = factory
                .create(&spec)
                .map_err(|source| CanvasError::SurfaceCreate { index, source })?;
            fresh.push(surface);
        }
        self.layers = fresh;

        log::trace!(
            "LAYERS rebuilt {} x{} at {}x{}",
            self.base_id,
            count,
            size.width,
            size.height
        );
        Ok(())
    }

    /// Push `size` to every layer.
    ///
    /// On the first failure the layers already resized are put back to their
    /// previous size and the failing index is returned.
    pub fn resize_all(&mut self, size: Size) -> Result<(), CanvasError> {
        let previous: SmallVec<[(u32, u32); 4]> =
            self.layers.iter().map(|l| (l.width(), l.height())).collect();

        for index in 0..self.layers.len() {
            if let Err(source) = self.layers[index].set_size(size.width, size.height) {
                for (restored, &(w, h)) in previous.iter().enumerate().take(index) {
                    if let Err(e) = self.layers[restored].set_size(w, h) {
                        log::warn!("could not restore layer {restored} to {w}x{h}: {e}");
                    }
                }
                return Err(CanvasError::LayerResize { index, source });
            }
        }
        log::trace!(
            "LAYERS resized {} to {}x{}",
            self.base_id,
            size.width,
            size.height
        );
        Ok(())
    }

    /// Clear every layer in index order. Failures are logged and skipped;
    /// the indices that failed are returned.
    pub fn clear_all(&mut self) -> Vec<usize> {
        let mut failed = Vec::new();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            if let Err(e) = layer.clear() {
                log::warn!("clear failed on layer {index}: {e}");
                failed.push(index);
            }
        }
        failed
    }

    /// Drop every surface handle.
    pub fn release(&mut self) {
        self.layers.clear();
    }
}

pub(crate) fn invalid_index(index: i64, count: usize) -> CanvasError {
    log::error!("invalid layer index {index} (layer count {count})");
    CanvasError::InvalidLayerIndex { index, count }
}
