use std::collections::{BTreeMap, HashSet};

use crate::assets::catalog::AssetCatalog;
use crate::compose::layer;
use crate::compose::placement::Placement;
use crate::foundation::core::{Rect, SurfaceSize};
use crate::foundation::error::{LaminaError, LaminaResult};
use crate::manifest::config::LayerCount;
use crate::manifest::model::{LayerDef, LayerMode, Manifest, OrderGroup};
use crate::render::surface::RenderSurface;

/// Resolves manifest layers into placements and draws the composite.
///
/// Layers resolve on demand and cache per engine. [`CompositionEngine::draw`]
/// resolves the base layer plus every configured layer, translates the
/// composite so its bounding box starts at the origin, sets the output
/// surface size, and emits draw operations following the manifest's output
/// ordering.
pub struct CompositionEngine<'a> {
    catalog: &'a AssetCatalog,
    defs: BTreeMap<String, LayerDef>,
    order: Vec<OrderGroup>,
    counts: BTreeMap<String, i64>,
    base_layer: String,
    layers: BTreeMap<String, Vec<Placement>>,
    resolving: HashSet<String>,
}

impl<'a> CompositionEngine<'a> {
    /// Build an engine over a manifest and requested per-layer counts.
    pub fn new(
        catalog: &'a AssetCatalog,
        manifest: &Manifest,
        config: &[LayerCount],
    ) -> LaminaResult<Self> {
        let mut defs = BTreeMap::new();
        let mut base_layer = None;
        for def in &manifest.layers {
            if def.mode == LayerMode::Base {
                if base_layer.is_none() {
                    base_layer = Some(def.name.clone());
                } else {
                    tracing::warn!(layer = %def.name, "multiple base layers, first declaration wins");
                }
            }
            defs.insert(def.name.clone(), def.clone());
        }
        let base_layer =
            base_layer.ok_or_else(|| LaminaError::config("manifest has no base layer"))?;

        let counts = config
            .iter()
            .map(|c| (c.layer_name.clone(), c.number))
            .collect();

        Ok(Self {
            catalog,
            defs,
            order: manifest.order.clone(),
            counts,
            base_layer,
            layers: BTreeMap::new(),
            resolving: HashSet::new(),
        })
    }

    /// Name of the manifest's base layer.
    pub fn base_layer(&self) -> &str {
        &self.base_layer
    }

    #[tracing::instrument(skip(self))]
    /// Resolve a layer into placements, resolving dependencies on demand.
    ///
    /// Results cache per engine; a dependency chain that re-enters a layer
    /// still being resolved fails with a cycle error.
    pub fn resolve_layer(&mut self, name: &str) -> LaminaResult<Vec<Placement>> {
        if let Some(cached) = self.layers.get(name) {
            tracing::debug!(layer = name, "resolution cache hit");
            return Ok(cached.clone());
        }
        if !self.resolving.insert(name.to_string()) {
            return Err(LaminaError::cycle(format!(
                "layer '{name}' depends on itself"
            )));
        }
        let result = self.build_layer(name);
        self.resolving.remove(name);
        let placements = result?;
        tracing::debug!(layer = name, placements = placements.len(), "layer resolved");
        self.layers.insert(name.to_string(), placements.clone());
        Ok(placements)
    }

    fn build_layer(&mut self, name: &str) -> LaminaResult<Vec<Placement>> {
        let count = *self
            .counts
            .get(name)
            .ok_or_else(|| LaminaError::not_found(format!("count for layer '{name}'")))?;
        let def = self
            .defs
            .get(name)
            .cloned()
            .ok_or_else(|| LaminaError::not_found(format!("layer '{name}'")))?;

        match def.mode {
            LayerMode::Base => layer::build_base(self.catalog, &def, count),
            LayerMode::Match => {
                let (dep_name, dep) = self.resolve_dependency(&def)?;
                layer::build_match(self.catalog, &def, count, &dep_name, &dep)
            }
            LayerMode::Decorate => {
                let (dep_name, dep) = self.resolve_dependency(&def)?;
                layer::build_decorate(self.catalog, &def, count, &dep_name, &dep)
            }
            LayerMode::Repeat => {
                let (dep_name, dep) = self.resolve_dependency(&def)?;
                layer::build_repeat(self.catalog, &def, count, &dep_name, &dep)
            }
        }
    }

    fn resolve_dependency(&mut self, def: &LayerDef) -> LaminaResult<(String, Vec<Placement>)> {
        let dep_name = def
            .from_layer
            .clone()
            .unwrap_or_else(|| self.base_layer.clone());
        let dep = self.resolve_layer(&dep_name)?;
        Ok((dep_name, dep))
    }

    #[tracing::instrument(skip(self, surface))]
    /// Resolve every configured layer and draw the composite onto `surface`.
    ///
    /// Returns the output surface size. Layers named by the ordering but
    /// never configured are skipped, as are placements whose asset carries
    /// no bitmap.
    pub fn draw(&mut self, surface: &mut dyn RenderSurface) -> LaminaResult<SurfaceSize> {
        let base = self.base_layer.clone();
        self.resolve_layer(&base)?;
        let configured: Vec<String> = self.counts.keys().cloned().collect();
        for name in &configured {
            self.resolve_layer(name)?;
        }

        let size = self.normalize_to_origin()?;
        surface.set_size(size.width, size.height);

        for group in &self.order {
            match group {
                OrderGroup::Successive { layers } => {
                    for name in layers {
                        let Some(layer) = self.layers.get(name) else {
                            continue;
                        };
                        for placement in layer {
                            let Some(bitmap) = &placement.asset.bitmap else {
                                continue;
                            };
                            surface.draw_bitmap(bitmap, placement.origin.x, placement.origin.y);
                        }
                    }
                }
                OrderGroup::Alternate { layers } => {
                    let longest = layers
                        .iter()
                        .filter_map(|name| self.layers.get(name))
                        .map(Vec::len)
                        .max()
                        .unwrap_or(0);
                    for i in 0..longest {
                        for name in layers {
                            let Some(placement) = self.layers.get(name).and_then(|l| l.get(i))
                            else {
                                continue;
                            };
                            let Some(bitmap) = &placement.asset.bitmap else {
                                continue;
                            };
                            surface.draw_bitmap(bitmap, placement.origin.x, placement.origin.y);
                        }
                    }
                }
            }
        }

        Ok(size)
    }

    // The bounding box fold seeds at the zero rect, so composites that sit
    // entirely in positive space keep their offset from the origin.
    fn normalize_to_origin(&mut self) -> LaminaResult<SurfaceSize> {
        let mut bounds = Rect::ZERO;
        for layer in self.layers.values() {
            for placement in layer {
                bounds = bounds.union(placement.bounds());
            }
        }
        for layer in self.layers.values_mut() {
            for placement in layer {
                placement.translate(-bounds.x0, -bounds.y0);
            }
        }
        SurfaceSize::from_extents(bounds.width(), bounds.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/engine.rs"]
mod tests;
