use crate::manifest::model::Manifest;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Requested instance count for one layer.
pub struct LayerCount {
    /// Layer name as declared in the manifest.
    pub layer_name: String,
    /// Requested number of instances.
    pub number: i64,
}

/// Merge a recommended configuration with the manifest's layer list.
///
/// Every manifest layer receives an entry, in declaration order; layers
/// absent from the recommendation default to one instance.
pub fn effective_config(manifest: &Manifest, recommended: &[LayerCount]) -> Vec<LayerCount> {
    manifest
        .layers
        .iter()
        .map(|layer| {
            let number = recommended
                .iter()
                .find(|c| c.layer_name == layer.name)
                .map(|c| c.number)
                .unwrap_or(1);
            LayerCount {
                layer_name: layer.name.clone(),
                number,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/config.rs"]
mod tests;
