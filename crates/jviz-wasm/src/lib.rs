//! WASM bridge for jviz — exposes the layered canvas to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The custom element on the JS
//! side forwards its `connectedCallback`, `attributeChangedCallback` and
//! `disconnectedCallback` to [`JvizCanvas`].

mod console_log;
mod web;

pub use web::{ElementAttributes, WebDom, WebSurface, WebSurfaces};

use jviz_core::lifecycle::Attribute;
use jviz_core::{CanvasComponent, CanvasConfig, CanvasError, CounterIds, MarginUpdate, SizeUpdate, Surface};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

type Canvas = CanvasComponent<WebDom, WebSurfaces>;

/// The JS-facing canvas component.
///
/// One instance per `<jviz-canvas>` element. Sizes and margins cross the
/// boundary as JSON strings.
#[wasm_bindgen]
pub struct JvizCanvas {
    inner: Canvas,
}

#[wasm_bindgen]
impl JvizCanvas {
    /// Create a canvas from a JSON option object
    /// (`{ parent, layers, id?, class?, width?, height?, margin? }`).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<JvizCanvas, JsValue> {
        console_error_panic_hook_setup();
        console_log::install(log::LevelFilter::Warn);

        let config = CanvasConfig::from_json(config_json).map_err(to_js)?;
        let document = web::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let inner = Canvas::new(
            config,
            WebDom::new(document.clone()),
            WebSurfaces::new(document),
            &mut CounterIds,
        );
        Ok(Self { inner })
    }

    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Mount into the parent element, reading `layers` / `width` / `height`
    /// from the parent's attributes.
    pub fn created(&mut self) -> Result<(), JsValue> {
        let document = web::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let parent_id = self.inner.config().parent.clone();
        let parent = document
            .get_element_by_id(&parent_id)
            .ok_or_else(|| JsValue::from_str(&format!("no parent element `{parent_id}`")))?;
        self.inner.created(&ElementAttributes(parent)).map_err(to_js)
    }

    pub fn attribute_changed(
        &mut self,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<(), JsValue> {
        self.inner
            .attribute_changed(name, old_value.as_deref(), new_value.as_deref())
            .map_err(to_js)
    }

    pub fn destroyed(&mut self) {
        self.inner.destroyed();
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    pub fn build_layers(&mut self, count: u32) -> Result<(), JsValue> {
        self.inner.build_layers(count as usize).map(|_| ()).map_err(to_js)
    }

    /// The 2D context of layer `index`, or `null` for an invalid index.
    pub fn layer_context(&self, index: i32) -> Option<CanvasRenderingContext2d> {
        self.inner
            .layer_signed(i64::from(index))
            .ok()
            .map(|layer| layer.context().clone())
    }

    pub fn layer_count(&self) -> u32 {
        saturating_u32(self.inner.layer_count())
    }

    pub fn layer_id(&self, index: u32) -> String {
        self.inner.layer_id(index as usize)
    }

    /// Clear every layer. Returns the indices that failed to clear.
    pub fn clear(&mut self) -> Vec<u32> {
        self.inner.clear().into_iter().map(saturating_u32).collect()
    }

    // ─── Size & margin ───────────────────────────────────────────────────

    /// Current margin as JSON.
    pub fn margin(&self) -> Result<String, JsValue> {
        to_json(&self.inner.margin())
    }

    /// Apply a partial margin update given as JSON.
    pub fn set_margin(&mut self, update_json: &str) -> Result<(), JsValue> {
        let update: MarginUpdate = serde_json::from_str(update_json)
            .map_err(|e| to_js(CanvasError::Config(e.to_string())))?;
        self.inner.set_margin(update);
        Ok(())
    }

    /// Current size as JSON.
    pub fn size(&self) -> Result<String, JsValue> {
        to_json(&self.inner.size())
    }

    pub fn set_size(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), JsValue> {
        self.inner
            .set_size(SizeUpdate { width, height })
            .map(|_| ())
            .map_err(to_js)
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn set_width(&mut self, width: u32) -> Result<(), JsValue> {
        self.inner.set_width(width).map(|_| ()).map_err(to_js)
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn set_height(&mut self, height: u32) -> Result<(), JsValue> {
        self.inner.set_height(height).map(|_| ()).map_err(to_js)
    }

    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.inner.resize().map(|_| ()).map_err(to_js)
    }

    // ─── Draw zone ───────────────────────────────────────────────────────

    /// Draw zone (`{ width, height, margin }`) as JSON.
    pub fn draw(&self) -> Result<String, JsValue> {
        to_json(&self.inner.draw())
    }

    pub fn draw_test(&mut self) -> Result<(), JsValue> {
        self.inner.draw_test().map(|_| ()).map_err(to_js)
    }

    /// Snapshot of the canvas state as JSON, for devtools and debugging.
    pub fn describe(&self) -> Result<String, JsValue> {
        let summary = Summary {
            id: self.inner.id(),
            ready: self.inner.is_ready(),
            size: self.inner.size(),
            draw: self.inner.draw(),
            layers: self.inner.layers().map(|l| l.id()).collect(),
        };
        to_json(&summary)
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    id: &'a str,
    ready: bool,
    size: jviz_core::Size,
    draw: jviz_core::DrawZone,
    layers: Vec<&'a str>,
}

/// Attribute names the custom element must declare as `observedAttributes`.
#[wasm_bindgen]
pub fn observed_attributes() -> js_sys::Array {
    observed_names().into_iter().map(JsValue::from_str).collect()
}

/// Change the console log level (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`, `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|_| JsValue::from_str(&format!("unknown log level `{level}`")))?;
    console_log::install(filter);
    log::set_max_level(filter);
    Ok(())
}

fn observed_names() -> Vec<&'static str> {
    Attribute::OBSERVED.iter().map(|a| a.name()).collect()
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn to_js(err: CanvasError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("serialization error: {e}")))
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("jviz WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn observed_attribute_list() {
        assert_eq!(observed_names(), vec!["layers", "width", "height"]);
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);
    }

    #[test]
    fn draw_zone_json_shape() {
        let zone = jviz_core::DrawZone::compute(
            jviz_core::Size {
                width: 500,
                height: 300,
            },
            jviz_core::Margin::chart_default(),
        );
        let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&zone).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "width": 400,
                "height": 240,
                "margin": { "top": 30, "bottom": 30, "left": 50, "right": 50 }
            })
        );
    }
}
