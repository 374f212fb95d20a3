pub mod canvas;
pub mod coerce;
pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod id;
pub mod layers;
pub mod lifecycle;
pub mod surface;

pub use canvas::CanvasComponent;
pub use config::CanvasConfig;
pub use dom::{Dom, render_tag};
pub use error::{CanvasError, DomError, SurfaceError};
pub use geometry::{DrawZone, Margin, MarginUpdate, Size, SizeUpdate};
pub use id::{CounterIds, IdGenerator};
pub use layers::LayerStack;
pub use lifecycle::{Attribute, AttributeSource, Lifecycle, NoAttributes};
pub use surface::{Color, Fill, Surface, SurfaceFactory, SurfaceSpec};

// Re-export kurbo so downstream crates don't need a direct dependency
pub use kurbo;
