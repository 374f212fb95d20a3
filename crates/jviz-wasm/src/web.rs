//! Browser backend: DOM helper and Canvas2D layer surfaces.

use jviz_core::kurbo::Rect;
use jviz_core::{AttributeSource, Dom, DomError, Fill, Surface, SurfaceError, SurfaceFactory, SurfaceSpec};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

fn dimension(px: i32) -> u32 {
    u32::try_from(px).unwrap_or(0)
}

/// The window's document, if running in a browser main thread.
pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

// ─── DOM ──────────────────────────────────────────────────────────────────

/// [`Dom`] over the live document. Sizes are read back from the rendered
/// box (`offsetWidth` / `offsetHeight`), so CSS changes are picked up.
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Result<HtmlElement, DomError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Operation {
                target: id.to_string(),
                reason: "not an HTML element".into(),
            })
    }

    fn set_style(&self, id: &str, property: &str, px: u32) -> Result<(), DomError> {
        self.element(id)?
            .style()
            .set_property(property, &format!("{px}px"))
            .map_err(|e| DomError::Operation {
                target: id.to_string(),
                reason: js_reason(&e),
            })
    }
}

impl Dom for WebDom {
    fn set_html(&mut self, target: &str, html: &str) -> Result<(), DomError> {
        self.element(target)?.set_inner_html(html);
        Ok(())
    }

    fn append_html(&mut self, target: &str, html: &str) -> Result<(), DomError> {
        self.element(target)?
            .insert_adjacent_html("beforeend", html)
            .map_err(|e| DomError::Operation {
                target: target.to_string(),
                reason: js_reason(&e),
            })
    }

    fn width(&self, target: &str) -> Result<u32, DomError> {
        Ok(dimension(self.element(target)?.offset_width()))
    }

    fn set_width(&mut self, target: &str, width: u32) -> Result<(), DomError> {
        self.set_style(target, "width", width)
    }

    fn height(&self, target: &str) -> Result<u32, DomError> {
        Ok(dimension(self.element(target)?.offset_height()))
    }

    fn set_height(&mut self, target: &str, height: u32) -> Result<(), DomError> {
        self.set_style(target, "height", height)
    }
}

// ─── Attributes ───────────────────────────────────────────────────────────

/// Attributes of the element hosting the canvas.
pub struct ElementAttributes(pub Element);

impl AttributeSource for ElementAttributes {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

// ─── Surfaces ─────────────────────────────────────────────────────────────

/// One `<canvas>` layer with its 2D context.
pub struct WebSurface {
    id: String,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for WebSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if !self.canvas.is_connected() {
            return Err(SurfaceError::new(&self.id, "canvas detached from document"));
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.ctx.clear_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill(&mut self, fill: Fill) {
        self.ctx.save();
        self.ctx.set_fill_style_str(&fill.color.to_css(fill.opacity));
        self.ctx.fill();
        self.ctx.restore();
    }
}

/// Looks up the `<canvas>` elements rendered by the layer stack.
pub struct WebSurfaces {
    document: Document,
}

impl WebSurfaces {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl SurfaceFactory for WebSurfaces {
    type Surface = WebSurface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<WebSurface, SurfaceError> {
        let canvas = self
            .document
            .get_element_by_id(&spec.id)
            .ok_or_else(|| SurfaceError::new(&spec.id, "no such element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::new(&spec.id, "not a <canvas> element"))?;
        canvas.set_width(spec.width);
        canvas.set_height(spec.height);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::new(&spec.id, js_reason(&e)))?
            .ok_or_else(|| SurfaceError::new(&spec.id, "2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::new(&spec.id, "unexpected context type"))?;

        Ok(WebSurface {
            id: spec.id.clone(),
            canvas,
            ctx,
        })
    }
}
