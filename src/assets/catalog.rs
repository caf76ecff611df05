use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decode::Bitmap;
use crate::foundation::core::Vec2;
use crate::foundation::error::{LaminaError, LaminaResult};
use crate::manifest::model::ImageDef;

/// Provider of decoded bitmaps for asset source keys.
pub trait BitmapSource: Sync {
    /// Fetch and decode the bitmap stored under `source`.
    fn fetch(&self, source: &str) -> LaminaResult<Bitmap>;
}

#[derive(Clone, Debug)]
/// A named image asset and its placement metadata.
pub struct Asset {
    /// Asset name referenced by layer definitions.
    pub name: String,
    /// Pack-relative source key for the encoded image bytes.
    pub source: String,
    /// Offsets applied when this asset is anchored to the named asset.
    pub relative: BTreeMap<String, Vec2>,
    /// Decoded pixels, present once the catalog has been loaded.
    pub bitmap: Option<Bitmap>,
}

#[derive(Debug, Default)]
/// The set of assets declared by a pack manifest.
pub struct AssetCatalog {
    assets: Vec<Arc<Asset>>,
}

impl AssetCatalog {
    /// Build a catalog from manifest image definitions.
    ///
    /// Bitmaps start unloaded; call [`AssetCatalog::load_all`] before
    /// composing.
    pub fn new(defs: &[ImageDef]) -> Self {
        let mut seen = HashSet::new();
        let assets = defs
            .iter()
            .map(|def| {
                if !seen.insert(def.name.as_str()) {
                    tracing::warn!(name = %def.name, "duplicate image name, first definition wins");
                }
                Arc::new(Asset {
                    name: def.name.clone(),
                    source: def.src.clone(),
                    relative: def.relative.clone(),
                    bitmap: None,
                })
            })
            .collect();
        Self { assets }
    }

    /// Look an asset up by name. The first matching definition wins.
    pub fn lookup(&self, name: &str) -> LaminaResult<Arc<Asset>> {
        self.assets
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| LaminaError::not_found(format!("image '{name}'")))
    }

    #[tracing::instrument(skip(self, source))]
    /// Decode every asset's bitmap through `source`, one request per asset.
    ///
    /// Decodes run concurrently; the first failure fails the whole call and
    /// leaves the catalog unloaded.
    pub fn load_all(&mut self, source: &dyn BitmapSource) -> LaminaResult<()> {
        let loaded = self
            .assets
            .par_iter()
            .map(|asset| {
                let bitmap = source.fetch(&asset.source)?;
                let mut loaded = (**asset).clone();
                loaded.bitmap = Some(bitmap);
                Ok(Arc::new(loaded))
            })
            .collect::<LaminaResult<Vec<_>>>()?;
        self.assets = loaded;
        Ok(())
    }

    /// Number of declared assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when the catalog has no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
