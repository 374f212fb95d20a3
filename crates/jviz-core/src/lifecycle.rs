//! Lifecycle adapter.
//!
//! Maps host notifications (created, attribute changed, destroyed) onto the
//! canvas. Attribute-driven mutation is ignored until the canvas is created
//! and again once it is destroyed.

use crate::canvas::{CanvasComponent, DEFAULT_LAYERS};
use crate::coerce::{parse_dimension, parse_int, to_dimension};
use crate::dom::{Dom, render_tag};
use crate::error::CanvasError;
use crate::geometry::SizeUpdate;
use crate::surface::SurfaceFactory;
use std::collections::HashMap;

/// Where a canvas is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Created,
    Destroyed,
}

/// Attributes the canvas observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Layers,
    Width,
    Height,
}

impl Attribute {
    pub const OBSERVED: [Attribute; 3] = [Attribute::Layers, Attribute::Width, Attribute::Height];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "layers" => Some(Self::Layers),
            "width" => Some(Self::Width),
            "height" => Some(Self::Height),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Layers => "layers",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

/// Read access to the attributes of the host element.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A host element without attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAttributes;

impl AttributeSource for NoAttributes {
    fn attribute(&self, _name: &str) -> Option<String> {
        None
    }
}

fn layer_count(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

impl<D: Dom, F: SurfaceFactory> CanvasComponent<D, F> {
    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Created
    }

    /// Render the container into the parent, build the layers and apply the
    /// size. Attributes win over the config, which wins over current state.
    pub fn created(&mut self, attrs: &impl AttributeSource) -> Result<(), CanvasError> {
        if self.lifecycle != Lifecycle::Uninitialized {
            log::debug!("{}: created while {:?}, ignored", self.id, self.lifecycle);
            return Ok(());
        }

        let html = render_tag("div", &[("id", self.id.as_str()), ("class", self.class.as_str())]);
        self.dom.set_html(&self.config.parent, &html)?;
        self.lifecycle = Lifecycle::Created;

        let layers = attrs
            .attribute(Attribute::Layers.name())
            .and_then(|v| parse_int(&v))
            .map(layer_count)
            .or(self.config.layers.map(|n| n as usize))
            .unwrap_or(DEFAULT_LAYERS);
        self.build_layers(layers)?;

        let width = attrs
            .attribute(Attribute::Width.name())
            .and_then(|v| parse_dimension(&v))
            .or(self.config.width)
            .unwrap_or(self.size.width);
        let height = attrs
            .attribute(Attribute::Height.name())
            .and_then(|v| parse_dimension(&v))
            .or(self.config.height)
            .unwrap_or(self.size.height);
        self.set_size(SizeUpdate::both(width, height))?;

        log::debug!(
            "{}: created with {} layers at {}x{}",
            self.id,
            self.layer_count(),
            width,
            height
        );
        Ok(())
    }

    /// React to an attribute change. Ignored before creation, after
    /// destruction, for unknown names and for unparseable values.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<(), CanvasError> {
        if !self.is_ready() {
            log::debug!("{}: `{name}` changed while {:?}, ignored", self.id, self.lifecycle);
            return Ok(());
        }
        let Some(attribute) = Attribute::from_name(name) else {
            log::debug!("{}: unobserved attribute `{name}`", self.id);
            return Ok(());
        };
        let Some(value) = new_value.and_then(parse_int) else {
            log::warn!(
                "{}: ignoring `{name}` change {old_value:?} -> {new_value:?}",
                self.id
            );
            return Ok(());
        };

        match attribute {
            Attribute::Layers => self.build_layers(layer_count(value)).map(|_| ()),
            Attribute::Width => self
                .set_size(SizeUpdate::width(to_dimension(value)))
                .map(|_| ()),
            Attribute::Height => self
                .set_size(SizeUpdate::height(to_dimension(value)))
                .map(|_| ()),
        }
    }

    /// Release every layer handle.
    pub fn destroyed(&mut self) {
        self.layers.release();
        self.lifecycle = Lifecycle::Destroyed;
        log::debug!("{}: destroyed", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::headless::{HeadlessDom, HeadlessSurfaces};
    use crate::id::CounterIds;
    use crate::surface::Surface;

    type Canvas = CanvasComponent<HeadlessDom, HeadlessSurfaces>;

    fn canvas(config: CanvasConfig) -> Canvas {
        let mut dom = HeadlessDom::new();
        dom.insert(&config.parent);
        Canvas::new(config, dom, HeadlessSurfaces::new(), &mut CounterIds)
    }

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn observed_attribute_names() {
        for attr in Attribute::OBSERVED {
            assert_eq!(Attribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(Attribute::from_name("color"), None);
    }

    #[test]
    fn created_renders_container_into_parent() {
        let mut c = canvas(CanvasConfig::new("root", 2).with_id("cv"));
        c.created(&NoAttributes).unwrap();
        assert_eq!(
            c.dom().html("root"),
            Some(r#"<div id="cv" class="jviz-components-canvas"></div>"#)
        );
        assert!(c.is_ready());
        assert_eq!(c.layer_count(), 2);
    }

    #[test]
    fn attributes_override_config() {
        let mut c = canvas(CanvasConfig::new("root", 2).with_size(100, 100));
        c.created(&attrs(&[("layers", "3"), ("width", "250")])).unwrap();
        assert_eq!(c.layer_count(), 3);
        assert_eq!((c.width(), c.height()), (250, 100));
    }

    #[test]
    fn created_twice_builds_once() {
        let mut c = canvas(CanvasConfig::new("root", 2));
        c.created(&NoAttributes).unwrap();
        c.created(&NoAttributes).unwrap();
        assert_eq!(c.factory().created().len(), 2);
    }

    #[test]
    fn changes_before_created_are_ignored() {
        let mut c = canvas(CanvasConfig::new("root", 2));
        c.attribute_changed("layers", None, Some("5")).unwrap();
        c.attribute_changed("width", None, Some("300")).unwrap();
        assert_eq!(c.layer_count(), 0);
        assert_eq!(c.width(), 0);
        assert!(c.factory().created().is_empty());
    }

    #[test]
    fn unknown_and_unparseable_changes_are_ignored() {
        let mut c = canvas(CanvasConfig::new("root", 2).with_size(100, 80));
        c.created(&NoAttributes).unwrap();
        c.attribute_changed("color", None, Some("red")).unwrap();
        c.attribute_changed("width", Some("100"), Some("wide")).unwrap();
        c.attribute_changed("height", Some("80"), None).unwrap();
        assert_eq!((c.width(), c.height()), (100, 80));
        assert_eq!(c.layer_count(), 2);
    }

    #[test]
    fn negative_layers_attribute_is_raised_to_one() {
        let mut c = canvas(CanvasConfig::new("root", 2));
        c.created(&attrs(&[("layers", "-3")])).unwrap();
        assert_eq!(c.layer_count(), 1);

        c.attribute_changed("layers", Some("-3"), Some("-8")).unwrap();
        assert_eq!(c.layer_count(), 1);
    }

    #[test]
    fn huge_layers_attribute_is_capped() {
        let mut c = canvas(CanvasConfig::new("root", 2));
        c.created(&attrs(&[("layers", "99999999999999999999")])).unwrap();
        assert_eq!(c.layer_count(), crate::canvas::MAX_LAYERS);

        c.attribute_changed("layers", Some("2"), Some("99999999999999999999"))
            .unwrap();
        assert_eq!(c.layer_count(), crate::canvas::MAX_LAYERS);
    }

    #[test]
    fn created_falls_back_to_defaults() {
        let config = CanvasConfig {
            parent: "root".into(),
            ..Default::default()
        };
        let mut c = canvas(config);
        c.created(&NoAttributes).unwrap();
        assert_eq!(c.layer_count(), DEFAULT_LAYERS);
        assert_eq!((c.width(), c.height()), (0, 0));
        assert!(c.layers().all(|l| l.width() == 0));
    }

    #[test]
    fn destroyed_releases_layers_and_stops_updates() {
        let mut c = canvas(CanvasConfig::new("root", 3));
        c.created(&NoAttributes).unwrap();
        c.destroyed();
        assert_eq!(c.lifecycle(), Lifecycle::Destroyed);
        assert_eq!(c.layer_count(), 0);

        c.attribute_changed("layers", Some("3"), Some("4")).unwrap();
        assert_eq!(c.layer_count(), 0);
    }
}
