//! Construction-time configuration.

use crate::coerce::opt_dimension;
use crate::error::CanvasError;
use crate::geometry::MarginUpdate;
use serde::Deserialize;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration accepted when a canvas is constructed.
///
/// Decoded from the option object handed over by the charting layer. Numeric
/// fields accept numbers or numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CanvasConfig {
    /// Element id of the canvas container. Generated when absent.
    #[serde(default)]
    pub id: Option<String>,

    /// Extra class added to the container next to the built-in one.
    #[serde(default)]
    pub class: Option<String>,

    /// Id of the element the container is rendered into. **Required.**
    pub parent: String,

    /// Number of layers. **Required**, at least 1.
    #[serde(default, deserialize_with = "opt_dimension")]
    pub layers: Option<u32>,

    #[serde(default, deserialize_with = "opt_dimension")]
    pub width: Option<u32>,

    #[serde(default, deserialize_with = "opt_dimension")]
    pub height: Option<u32>,

    /// Applied on top of the default margin (`left/right 50`, `top/bottom 30`).
    #[serde(default)]
    pub margin: MarginUpdate,
}

impl CanvasConfig {
    pub fn new(parent: impl Into<String>, layers: u32) -> Self {
        Self {
            parent: parent.into(),
            layers: Some(layers),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_margin(mut self, margin: MarginUpdate) -> Self {
        self.margin = margin;
        self
    }

    /// Decode and validate a JSON option object.
    ///
    /// # Errors
    /// Returns [`CanvasError::Config`] for malformed JSON or when `parent` or
    /// `layers` is missing.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the required fields.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if self.parent.trim().is_empty() {
            return Err(CanvasError::Config("`parent` is required".into()));
        }
        if self.layers.is_none() {
            return Err(CanvasError::Config("`layers` is required".into()));
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_full_config() {
        let config = CanvasConfig::from_json(
            r#"{
                "id": "sales",
                "class": "wide",
                "parent": "chart-root",
                "layers": "3",
                "width": 640,
                "height": "480px",
                "margin": { "left": 20 }
            }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            CanvasConfig {
                id: Some("sales".into()),
                class: Some("wide".into()),
                parent: "chart-root".into(),
                layers: Some(3),
                width: Some(640),
                height: Some(480),
                margin: MarginUpdate {
                    left: Some(20),
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let no_layers = CanvasConfig::from_json(r#"{"parent": "p"}"#).unwrap_err();
        assert_eq!(no_layers, CanvasError::Config("`layers` is required".into()));

        let no_parent = CanvasConfig::from_json(r#"{"layers": 2}"#).unwrap_err();
        assert!(matches!(no_parent, CanvasError::Config(_)));

        let blank_parent = CanvasConfig::from_json(r#"{"parent": " ", "layers": 2}"#).unwrap_err();
        assert_eq!(blank_parent, CanvasError::Config("`parent` is required".into()));
    }

    #[test]
    fn builder_matches_decoded() {
        let built = CanvasConfig::new("p", 2).with_size(100, 50);
        let decoded =
            CanvasConfig::from_json(r#"{"parent":"p","layers":2,"width":100,"height":50}"#)
                .unwrap();
        assert_eq!(built, decoded);
    }
}
