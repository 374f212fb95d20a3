//! In-memory backend.
//!
//! `HeadlessDom` keeps a flat id → element map and `HeadlessSurface` records
//! every operation into a journal shared with its factory. Used for native
//! embedding and as the test double for the canvas.

use crate::dom::Dom;
use crate::error::{DomError, SurfaceError};
use crate::surface::{Fill, Surface, SurfaceFactory, SurfaceSpec};
use kurbo::Rect;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

// ─── DOM ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
struct Element {
    html: String,
    width: u32,
    height: u32,
    /// Ids registered by markup written into this element.
    children: Vec<String>,
}

/// Flat in-memory document addressed by element id.
#[derive(Debug, Default, Clone)]
pub struct HeadlessDom {
    elements: HashMap<String, Element>,
}

impl HeadlessDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty element, e.g. the parent a canvas mounts into.
    pub fn insert(&mut self, id: &str) {
        self.elements.entry(id.to_string()).or_default();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.html.as_str())
    }

    /// Change the rendered size of `id` without going through the canvas,
    /// the way CSS or a parent layout would.
    pub fn set_layout_size(&mut self, id: &str, width: u32, height: u32) {
        let el = self.elements.entry(id.to_string()).or_default();
        el.width = width;
        el.height = height;
    }

    fn element(&self, id: &str) -> Result<&Element, DomError> {
        self.elements
            .get(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }

    fn remove_descendants(&mut self, id: &str) {
        let mut stack = match self.elements.get_mut(id) {
            Some(el) => std::mem::take(&mut el.children),
            None => return,
        };
        while let Some(child) = stack.pop() {
            if let Some(el) = self.elements.remove(&child) {
                stack.extend(el.children);
            }
        }
    }

    fn register(&mut self, parent: &str, html: &str) {
        let ids = scan_ids(html);
        for id in &ids {
            self.elements.entry(id.clone()).or_default();
        }
        if let Some(el) = self.elements.get_mut(parent) {
            el.children.extend(ids);
        }
    }
}

/// Collect the values of every `id="..."` attribute in `html`.
fn scan_ids(html: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut rest = html;
    while let Some(pos) = rest.find(" id=\"") {
        rest = &rest[pos + 5..];
        let Some(end) = rest.find('"') else { break };
        ids.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    ids
}

impl Dom for HeadlessDom {
    fn set_html(&mut self, target: &str, html: &str) -> Result<(), DomError> {
        self.element(target)?;
        self.remove_descendants(target);
        self.element_mut(target)?.html = html.to_string();
        self.register(target, html);
        Ok(())
    }

    fn append_html(&mut self, target: &str, html: &str) -> Result<(), DomError> {
        self.element_mut(target)?.html.push_str(html);
        self.register(target, html);
        Ok(())
    }

    fn width(&self, target: &str) -> Result<u32, DomError> {
        Ok(self.element(target)?.width)
    }

    fn set_width(&mut self, target: &str, width: u32) -> Result<(), DomError> {
        self.element_mut(target)?.width = width;
        Ok(())
    }

    fn height(&self, target: &str) -> Result<u32, DomError> {
        Ok(self.element(target)?.height)
    }

    fn set_height(&mut self, target: &str, height: u32) -> Result<(), DomError> {
        self.element_mut(target)?.height = height;
        Ok(())
    }
}

// ─── Surfaces ─────────────────────────────────────────────────────────────

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize { width: u32, height: u32 },
    Clear,
    Rect(Rect),
    Fill(Fill),
}

type Journal = Rc<RefCell<Vec<(String, SurfaceOp)>>>;

/// Recording surface. Failures can be injected per operation.
#[derive(Debug)]
pub struct HeadlessSurface {
    id: String,
    width: u32,
    height: u32,
    ops: Vec<SurfaceOp>,
    journal: Journal,
    fail_resize: bool,
    fail_clear: bool,
}

impl HeadlessSurface {
    /// Operations applied to this surface, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn fail_resize(&mut self, fail: bool) {
        self.fail_resize = fail;
    }

    pub fn fail_clear(&mut self, fail: bool) {
        self.fail_clear = fail;
    }

    fn record(&mut self, op: SurfaceOp) {
        self.journal.borrow_mut().push((self.id.clone(), op.clone()));
        self.ops.push(op);
    }
}

impl Surface for HeadlessSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if self.fail_resize {
            return Err(SurfaceError::new(&self.id, "resize rejected"));
        }
        self.width = width;
        self.height = height;
        self.record(SurfaceOp::Resize { width, height });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        if self.fail_clear {
            return Err(SurfaceError::new(&self.id, "clear rejected"));
        }
        self.record(SurfaceOp::Clear);
        Ok(())
    }

    fn rect(&mut self, rect: Rect) {
        self.record(SurfaceOp::Rect(rect));
    }

    fn fill(&mut self, fill: Fill) {
        self.record(SurfaceOp::Fill(fill));
    }
}

/// Factory for [`HeadlessSurface`]s sharing one operation journal.
#[derive(Debug, Default)]
pub struct HeadlessSurfaces {
    journal: Journal,
    created: Vec<SurfaceSpec>,
    fail_ids: HashSet<String>,
}

impl HeadlessSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make creation of the surface with `id` fail.
    pub fn fail_create(&mut self, id: &str) {
        self.fail_ids.insert(id.to_string());
    }

    /// Every surface creation request, oldest first.
    pub fn created(&self) -> &[SurfaceSpec] {
        &self.created
    }

    /// Every operation on every surface from this factory, in call order.
    pub fn journal(&self) -> Vec<(String, SurfaceOp)> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&mut self) {
        self.journal.borrow_mut().clear();
    }
}

impl SurfaceFactory for HeadlessSurfaces {
    type Surface = HeadlessSurface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<HeadlessSurface, SurfaceError> {
        self.created.push(spec.clone());
        if self.fail_ids.contains(&spec.id) {
            return Err(SurfaceError::new(&spec.id, "creation rejected"));
        }
        Ok(HeadlessSurface {
            id: spec.id.clone(),
            width: spec.width,
            height: spec.height,
            ops: Vec::new(),
            journal: Rc::clone(&self.journal),
            fail_resize: false,
            fail_clear: false,
        })
    }
}
