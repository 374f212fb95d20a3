//! Container-rendering helper.
//!
//! The canvas never touches a DOM directly. It renders markup strings with
//! [`render_tag`] and addresses elements by id through the [`Dom`] trait, so
//! the browser backend and the headless backend share one code path.

use crate::error::DomError;

/// Element-level operations the canvas needs from its host document.
pub trait Dom {
    /// Replace the inner content of `target` with `html`.
    fn set_html(&mut self, target: &str, html: &str) -> Result<(), DomError>;

    /// Append `html` after the existing content of `target`.
    fn append_html(&mut self, target: &str, html: &str) -> Result<(), DomError>;

    /// Rendered width of `target`, which may differ from the last value set.
    fn width(&self, target: &str) -> Result<u32, DomError>;

    fn set_width(&mut self, target: &str, width: u32) -> Result<(), DomError>;

    /// Rendered height of `target`.
    fn height(&self, target: &str) -> Result<u32, DomError>;

    fn set_height(&mut self, target: &str, height: u32) -> Result<(), DomError>;
}

/// Render an empty element `<tag k="v" ...></tag>` with escaped attributes.
pub fn render_tag(tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(16 + tag.len() * 2);
    out.push('<');
    out.push_str(tag);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push_str("></");
    out.push_str(tag);
    out.push('>');
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
