use std::collections::BTreeMap;

use crate::foundation::core::Vec2;
use crate::foundation::error::{LaminaError, LaminaResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete content pack manifest.
///
/// A manifest is a pure data model that can be serialized/deserialized via
/// Serde (JSON). It declares the named image assets, the layers generated
/// from them, and the output ordering of the composite.
pub struct Manifest {
    /// Named image asset declarations.
    pub images: Vec<ImageDef>,
    /// Layer definitions, in declaration order.
    pub layers: Vec<LayerDef>,
    /// Output ordering groups, drawn front to back in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderGroup>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A named image asset declared by the manifest.
pub struct ImageDef {
    /// Asset name referenced by layer definitions.
    pub name: String,
    /// Pack-relative source key for the encoded image bytes.
    pub src: String,
    /// Offsets applied when this asset is placed relative to the named
    /// anchor asset.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relative: BTreeMap<String, Vec2>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One layer definition.
pub struct LayerDef {
    /// Layer name, referenced by dependent layers and ordering groups.
    pub name: String,
    /// Generation mode; `match` when omitted.
    #[serde(default)]
    pub mode: LayerMode,
    /// Dependency layer name; the base layer when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_layer: Option<String>,
    /// Dependency window: empty covers the whole layer, one entry selects a
    /// single placement, two entries form a half-open window. Negative
    /// entries count from the end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range: Vec<i64>,
    /// Single asset name used for every instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Per-instance asset selection, consulted when `image` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageSelect>,
    /// Start anchor for `repeat` layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<AnchorRef>,
    /// End anchor for `repeat` layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<AnchorRef>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Layer generation mode.
pub enum LayerMode {
    /// Anchors the composite; placed as a chain from the origin.
    Base,
    /// One placement per dependency window entry.
    #[default]
    Match,
    /// A fixed group of placements per dependency window entry.
    Decorate,
    /// Placements interpolated between two anchors of the dependency layer.
    Repeat,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Per-instance asset selection rule.
pub enum ImageSelect {
    /// Ordered list; indices past the end clamp to the last element.
    Sequence(Vec<String>),
    /// Role table keyed by instance position.
    Roles(RoleTable),
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Position-keyed asset roles.
pub struct RoleTable {
    /// Asset for the first instance, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Asset for the last instance, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Asset for every other instance.
    pub remains: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A reference to one placement of the dependency layer.
///
/// The `layer` field is carried for manifest fidelity; resolution always
/// indexes the dependency layer.
pub struct AnchorRef {
    /// Layer name as written in the manifest.
    pub layer: String,
    /// Placement index; negative values count from the end.
    pub index: i64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// One output ordering group.
pub enum OrderGroup {
    /// Draw each named layer completely, in order.
    Successive {
        /// Layer names drawn in sequence.
        layers: Vec<String>,
    },
    /// Interleave the named layers placement by placement, up to the
    /// longest layer.
    Alternate {
        /// Layer names drawn round-robin.
        layers: Vec<String>,
    },
}

impl OrderGroup {
    /// The layer names this group draws.
    pub fn layers(&self) -> &[String] {
        match self {
            OrderGroup::Successive { layers } => layers,
            OrderGroup::Alternate { layers } => layers,
        }
    }
}

impl Manifest {
    /// Check manifest-level invariants.
    ///
    /// Catches structural mistakes early; the engine reports the same
    /// conditions lazily while resolving layers.
    pub fn validate(&self) -> LaminaResult<()> {
        let base_count = self
            .layers
            .iter()
            .filter(|l| l.mode == LayerMode::Base)
            .count();
        if base_count == 0 {
            return Err(LaminaError::config("manifest must declare a base layer"));
        }
        if base_count > 1 {
            return Err(LaminaError::config(
                "manifest must declare exactly one base layer",
            ));
        }

        for layer in &self.layers {
            if layer.range.len() > 2 {
                return Err(LaminaError::config(format!(
                    "layer '{}' range must have at most two entries",
                    layer.name
                )));
            }

            if layer.mode == LayerMode::Repeat {
                if layer.image.is_none() {
                    return Err(LaminaError::config(format!(
                        "repeat layer '{}' must name an image",
                        layer.name
                    )));
                }
                if layer.start.is_none() || layer.end.is_none() {
                    return Err(LaminaError::config(format!(
                        "repeat layer '{}' must carry start and end anchors",
                        layer.name
                    )));
                }
            }

            if let Some(from) = &layer.from_layer {
                if !self.layers.iter().any(|l| l.name == *from) {
                    return Err(LaminaError::config(format!(
                        "layer '{}' references missing layer '{}'",
                        layer.name, from
                    )));
                }
            }

            if let Some(image) = &layer.image {
                self.check_image_ref(&layer.name, image)?;
            }
            match &layer.images {
                Some(ImageSelect::Sequence(list)) => {
                    if list.is_empty() {
                        return Err(LaminaError::config(format!(
                            "layer '{}' images list must be non-empty",
                            layer.name
                        )));
                    }
                    for name in list {
                        self.check_image_ref(&layer.name, name)?;
                    }
                }
                Some(ImageSelect::Roles(roles)) => {
                    if let Some(first) = &roles.first {
                        self.check_image_ref(&layer.name, first)?;
                    }
                    if let Some(last) = &roles.last {
                        self.check_image_ref(&layer.name, last)?;
                    }
                    self.check_image_ref(&layer.name, &roles.remains)?;
                }
                None => {}
            }
        }

        for group in &self.order {
            for name in group.layers() {
                if !self.layers.iter().any(|l| l.name == *name) {
                    return Err(LaminaError::config(format!(
                        "order group references missing layer '{name}'"
                    )));
                }
            }
        }

        Ok(())
    }

    fn check_image_ref(&self, layer_name: &str, image: &str) -> LaminaResult<()> {
        if !self.images.iter().any(|i| i.name == image) {
            return Err(LaminaError::config(format!(
                "layer '{layer_name}' references missing image '{image}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
