//! Size, margin and draw-zone arithmetic.
//!
//! The draw zone is the inner rectangle left after subtracting the margin box
//! from the overall size. All subtraction saturates at zero.

use crate::coerce::opt_dimension;
use serde::{Deserialize, Serialize};

/// Overall component size in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Four-sided inset applied to compute the draw zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Margin {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Margin applied to a freshly constructed canvas.
    pub const fn chart_default() -> Self {
        Self::new(30, 30, 50, 50)
    }

    /// Apply a partial update; omitted sides stay unchanged.
    pub fn apply(&mut self, update: &MarginUpdate) {
        if let Some(top) = update.top {
            self.top = top;
        }
        if let Some(bottom) = update.bottom {
            self.bottom = bottom;
        }
        if let Some(left) = update.left {
            self.left = left;
        }
        if let Some(right) = update.right {
            self.right = right;
        }
    }
}

/// Partial margin update. Each side is optional and decoded leniently
/// (numbers are truncated, numeric strings parsed, negatives clamped to 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MarginUpdate {
    #[serde(default, deserialize_with = "opt_dimension")]
    pub top: Option<u32>,
    #[serde(default, deserialize_with = "opt_dimension")]
    pub bottom: Option<u32>,
    #[serde(default, deserialize_with = "opt_dimension")]
    pub left: Option<u32>,
    #[serde(default, deserialize_with = "opt_dimension")]
    pub right: Option<u32>,
}

impl MarginUpdate {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

impl From<Margin> for MarginUpdate {
    fn from(m: Margin) -> Self {
        Self {
            top: Some(m.top),
            bottom: Some(m.bottom),
            left: Some(m.left),
            right: Some(m.right),
        }
    }
}

/// Partial size update; width and height are set independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SizeUpdate {
    #[serde(default, deserialize_with = "opt_dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "opt_dimension")]
    pub height: Option<u32>,
}

impl SizeUpdate {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            height: None,
        }
    }

    pub fn height(height: u32) -> Self {
        Self {
            width: None,
            height: Some(height),
        }
    }

    pub fn both(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// The inner area available for chart content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawZone {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl DrawZone {
    /// Compute the draw zone for `size` inset by `margin`.
    pub fn compute(size: Size, margin: Margin) -> Self {
        Self {
            width: size
                .width
                .saturating_sub(margin.left)
                .saturating_sub(margin.right),
            height: size
                .height
                .saturating_sub(margin.top)
                .saturating_sub(margin.bottom),
            margin,
        }
    }

    /// The zone as a rectangle in layer coordinates.
    pub fn rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size(
            (f64::from(self.margin.left), f64::from(self.margin.top)),
            (f64::from(self.width), f64::from(self.height)),
        )
    }
}
