//! The canvas component: layer stack plus size/margin tracking.
//!
//! Width and height live in the container element, which is the source of
//! truth: every resize re-reads them from the [`Dom`] before pushing them to
//! the layers, since CSS or the page layout may have changed them.

use crate::config::CanvasConfig;
use crate::dom::Dom;
use crate::error::CanvasError;
use crate::geometry::{DrawZone, Margin, MarginUpdate, Size, SizeUpdate};
use crate::id::{ID_LENGTH, ID_PREFIX, IdGenerator, canvas_base_id};
use crate::layers::{LayerStack, invalid_index};
use crate::lifecycle::Lifecycle;
use crate::surface::{Color, Fill, Surface, SurfaceFactory};

/// Class of the container element.
pub const CONTAINER_CLASS: &str = "jviz-components-canvas";
/// Class of every layer `<canvas>` element.
pub const LAYER_CLASS: &str = "jviz-components-canvas-canvas";
/// Layer count used when neither the attributes nor the config name one.
pub const DEFAULT_LAYERS: usize = 1;
/// Upper bound on the layer count; larger requests are clamped.
pub const MAX_LAYERS: usize = 64;

/// A stack of drawing surfaces with a shared size and a margin-inset draw zone.
pub struct CanvasComponent<D, F: SurfaceFactory> {
    pub(crate) id: String,
    pub(crate) class: String,
    pub(crate) config: CanvasConfig,
    pub(crate) size: Size,
    pub(crate) margin: Margin,
    pub(crate) zone: DrawZone,
    pub(crate) layers: LayerStack<F::Surface>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) dom: D,
    pub(crate) factory: F,
}

impl<D: Dom, F: SurfaceFactory> CanvasComponent<D, F> {
    /// Allocate the default state. Nothing touches the DOM until
    /// [`created`](Self::created).
    pub fn new(config: CanvasConfig, dom: D, factory: F, ids: &mut impl IdGenerator) -> Self {
        let id = config
            .id
            .clone()
            .unwrap_or_else(|| ids.generate_id(ID_PREFIX, ID_LENGTH));
        let class = match config.class.as_deref() {
            Some(extra) if !extra.trim().is_empty() => format!("{CONTAINER_CLASS} {extra}"),
            _ => CONTAINER_CLASS.to_string(),
        };
        let mut margin = Margin::chart_default();
        margin.apply(&config.margin);

        Self {
            layers: LayerStack::new(canvas_base_id(&id), LAYER_CLASS),
            id,
            class,
            config,
            size: Size::default(),
            margin,
            zone: DrawZone::compute(Size::default(), margin),
            lifecycle: Lifecycle::Uninitialized,
            dom,
            factory,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    /// Discard every layer and create `count` fresh ones at the current size.
    /// A count of zero is raised to one and counts above [`MAX_LAYERS`]
    /// are lowered to it.
    pub fn build_layers(&mut self, count: usize) -> Result<&mut Self, CanvasError> {
        let count = if count == 0 {
            log::warn!("{}: layer count 0 raised to 1", self.id);
            1
        } else if count > MAX_LAYERS {
            log::warn!("{}: layer count {count} lowered to {MAX_LAYERS}", self.id);
            MAX_LAYERS
        } else {
            count
        };
        self.layers
            .rebuild(count, &self.id, self.size, &mut self.dom, &mut self.factory)?;
        Ok(self)
    }

    pub fn layer(&self, index: usize) -> Result<&F::Surface, CanvasError> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut F::Surface, CanvasError> {
        self.layers.get_mut(index)
    }

    /// [`layer`](Self::layer) for hosts that hand over signed indices.
    pub fn layer_signed(&self, index: i64) -> Result<&F::Surface, CanvasError> {
        match usize::try_from(index) {
            Ok(i) => self.layers.get(i),
            Err(_) => Err(invalid_index(index, self.layers.len())),
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_id(&self, index: usize) -> String {
        self.layers.layer_id(index)
    }

    pub fn layers(&self) -> impl Iterator<Item = &F::Surface> {
        self.layers.iter()
    }

    /// Clear every layer in index order. Returns the indices that failed.
    pub fn clear(&mut self) -> Vec<usize> {
        self.layers.clear_all()
    }

    // ─── Size & margin ───────────────────────────────────────────────────

    pub fn size(&self) -> Size {
        self.size
    }

    /// Write the provided dimensions to the container, then [`resize`](Self::resize).
    pub fn set_size(&mut self, update: SizeUpdate) -> Result<&mut Self, CanvasError> {
        if let Some(width) = update.width {
            self.dom.set_width(&self.id, width)?;
        }
        if let Some(height) = update.height {
            self.dom.set_height(&self.id, height)?;
        }
        self.resize()
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn set_width(&mut self, width: u32) -> Result<&mut Self, CanvasError> {
        self.set_size(SizeUpdate::width(width))
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn set_height(&mut self, height: u32) -> Result<&mut Self, CanvasError> {
        self.set_size(SizeUpdate::height(height))
    }

    /// Re-read the size from the container and push it to every layer.
    ///
    /// All or nothing: if a layer rejects the new size, the layers, the size
    /// and the draw zone all keep their previous values.
    pub fn resize(&mut self) -> Result<&mut Self, CanvasError> {
        let size = Size {
            width: self.dom.width(&self.id)?,
            height: self.dom.height(&self.id)?,
        };
        self.layers.resize_all(size)?;
        self.size = size;
        self.draw_resize();
        Ok(self)
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Update the provided margin sides and recompute the draw zone.
    pub fn set_margin(&mut self, update: MarginUpdate) -> &mut Self {
        self.margin.apply(&update);
        self.draw_resize();
        self
    }

    // ─── Draw zone ───────────────────────────────────────────────────────

    pub fn draw(&self) -> DrawZone {
        self.zone
    }

    fn draw_resize(&mut self) {
        self.zone = DrawZone::compute(self.size, self.margin);
    }

    /// Fill the draw zone on the first layer with translucent navy.
    pub fn draw_test(&mut self) -> Result<&mut Self, CanvasError> {
        let rect = self.zone.rect();
        let layer = self.layers.get_mut(0)?;
        layer.rect(rect);
        layer.fill(Fill {
            color: Color::NAVY,
            opacity: 0.2,
        });
        Ok(self)
    }
}

impl<D, F> std::fmt::Debug for CanvasComponent<D, F>
where
    F: SurfaceFactory,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasComponent")
            .field("id", &self.id)
            .field("lifecycle", &self.lifecycle)
            .field("size", &self.size)
            .field("margin", &self.margin)
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessDom, HeadlessSurfaces, SurfaceOp};
    use crate::id::CounterIds;
    use pretty_assertions::assert_eq;

    type Canvas = CanvasComponent<HeadlessDom, HeadlessSurfaces>;

    fn mounted(layers: usize, width: u32, height: u32) -> Canvas {
        let mut dom = HeadlessDom::new();
        dom.insert("chart");
        dom.insert("c");
        let config = CanvasConfig::new("chart", layers as u32).with_id("c");
        let mut canvas = Canvas::new(config, dom, HeadlessSurfaces::new(), &mut CounterIds);
        canvas.build_layers(layers).unwrap();
        canvas.set_size(SizeUpdate::both(width, height)).unwrap();
        canvas
    }

    #[test]
    fn new_uses_generated_id_and_default_margin() {
        let canvas = Canvas::new(
            CanvasConfig::new("chart", 1),
            HeadlessDom::new(),
            HeadlessSurfaces::new(),
            &mut CounterIds,
        );
        assert!(canvas.id().starts_with(ID_PREFIX));
        assert_eq!(canvas.class(), CONTAINER_CLASS);
        assert_eq!(canvas.margin(), Margin::new(30, 30, 50, 50));
        assert_eq!(canvas.lifecycle(), Lifecycle::Uninitialized);
        assert_eq!(canvas.layer_count(), 0);
    }

    #[test]
    fn config_class_and_margin_are_applied() {
        let mut config = CanvasConfig::new("chart", 1).with_margin(MarginUpdate {
            top: Some(5),
            ..Default::default()
        });
        config.class = Some("dense".into());
        let canvas = Canvas::new(config, HeadlessDom::new(), HeadlessSurfaces::new(), &mut CounterIds);
        assert_eq!(canvas.class(), "jviz-components-canvas dense");
        assert_eq!(canvas.margin(), Margin::new(5, 30, 50, 50));
    }

    #[test]
    fn zero_layers_is_raised_to_one() {
        let mut canvas = mounted(2, 10, 10);
        canvas.build_layers(0).unwrap();
        assert_eq!(canvas.layer_count(), 1);
    }

    #[test]
    fn oversized_layer_count_is_capped() {
        let mut canvas = mounted(2, 10, 10);
        canvas.build_layers(usize::MAX).unwrap();
        assert_eq!(canvas.layer_count(), MAX_LAYERS);
        assert_eq!(canvas.layer_id(MAX_LAYERS - 1), "c-canvas-63");
    }

    #[test]
    fn resize_reads_container_size() {
        let mut canvas = mounted(2, 500, 300);
        canvas.dom_mut().set_layout_size("c", 320, 200);
        canvas.resize().unwrap();

        assert_eq!(
            canvas.size(),
            Size {
                width: 320,
                height: 200
            }
        );
        assert_eq!((canvas.draw().width, canvas.draw().height), (220, 140));
        assert!(canvas.layers().all(|l| l.width() == 320 && l.height() == 200));
    }

    #[test]
    fn width_and_height_setters_are_independent() {
        let mut canvas = mounted(1, 500, 300);
        canvas.set_width(640).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (640, 300));
        canvas.set_height(480).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (640, 480));
    }

    #[test]
    fn draw_test_fills_zone_on_first_layer() {
        let mut canvas = mounted(2, 500, 300);
        canvas.draw_test().unwrap();
        let ops = canvas.layer(0).unwrap().ops();
        assert_eq!(
            &ops[ops.len() - 2..],
            &[
                SurfaceOp::Rect(kurbo::Rect::new(50.0, 30.0, 450.0, 270.0)),
                SurfaceOp::Fill(Fill {
                    color: Color::NAVY,
                    opacity: 0.2,
                }),
            ]
        );
        assert!(
            !canvas
                .layer(1)
                .unwrap()
                .ops()
                .iter()
                .any(|op| matches!(op, SurfaceOp::Fill(_)))
        );
    }

    #[test]
    fn draw_test_without_layers_is_invalid() {
        let mut canvas = Canvas::new(
            CanvasConfig::new("chart", 1),
            HeadlessDom::new(),
            HeadlessSurfaces::new(),
            &mut CounterIds,
        );
        assert!(matches!(
            canvas.draw_test(),
            Err(CanvasError::InvalidLayerIndex { index: 0, count: 0 })
        ));
    }

    #[test]
    fn negative_index_is_invalid() {
        let canvas = mounted(2, 10, 10);
        assert_eq!(
            canvas.layer_signed(-1).unwrap_err(),
            CanvasError::InvalidLayerIndex {
                index: -1,
                count: 2
            }
        );
        assert!(canvas.layer_signed(1).is_ok());
    }

    #[test]
    fn set_size_on_missing_container_fails() {
        let mut canvas = Canvas::new(
            CanvasConfig::new("chart", 1).with_id("ghost"),
            HeadlessDom::new(),
            HeadlessSurfaces::new(),
            &mut CounterIds,
        );
        assert!(matches!(
            canvas.set_width(10),
            Err(CanvasError::Dom(crate::error::DomError::MissingElement(_)))
        ));
    }
}
