//! Drawing-surface abstraction.
//!
//! Each layer owns one [`Surface`]. Rendering itself is left to the
//! implementation; the canvas only sizes, clears and occasionally fills them.

use crate::error::SurfaceError;
use kurbo::Rect;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const NAVY: Color = Color::rgb(0x00, 0x00, 0x80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`; the leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digit = |i: usize| -> Option<u8> {
            hex.get(i..=i)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
        };
        match hex.len() {
            3 => Some(Self::rgb(
                digit(0)? * 17,
                digit(1)? * 17,
                digit(2)? * 17,
            )),
            6 => Some(Self::rgb(
                (digit(0)? << 4) | digit(1)?,
                (digit(2)? << 4) | digit(3)?,
                (digit(4)? << 4) | digit(5)?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` string with the given opacity.
    pub fn to_css(self, opacity: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            opacity.clamp(0.0, 1.0)
        )
    }
}

/// Fill applied to the most recent shape on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
}

/// Parameters for creating one layer surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// One drawing surface in the layer stack.
pub trait Surface {
    fn id(&self) -> &str;
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize the backing store. Resizing discards the surface's content.
    fn set_size(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    /// Erase the whole surface.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Start a rectangle path.
    fn rect(&mut self, rect: Rect);

    /// Fill the current path.
    fn fill(&mut self, fill: Fill);
}

/// Creates surfaces for elements the canvas has already rendered.
pub trait SurfaceFactory {
    type Surface: Surface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<Self::Surface, SurfaceError>;
}
