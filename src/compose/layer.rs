use std::ops::Range;

use crate::assets::catalog::AssetCatalog;
use crate::compose::placement::Placement;
use crate::foundation::error::{LaminaError, LaminaResult};
use crate::manifest::model::{ImageSelect, LayerDef};

/// Pick the asset name for instance `index` of `total` in a layer.
///
/// A single `image` name always wins. An ordered list clamps to its last
/// element; a role table serves `first` at index 0, `last` at the final
/// index, and `remains` otherwise.
pub fn select_image_name(def: &LayerDef, index: usize, total: i64) -> LaminaResult<&str> {
    if let Some(image) = &def.image {
        return Ok(image);
    }
    match &def.images {
        Some(ImageSelect::Sequence(list)) => match list.get(index).or_else(|| list.last()) {
            Some(name) => Ok(name),
            None => Err(LaminaError::config(format!(
                "layer '{}' has an empty images list",
                def.name
            ))),
        },
        Some(ImageSelect::Roles(roles)) => {
            if index == 0 {
                if let Some(first) = &roles.first {
                    return Ok(first);
                }
            }
            if index as i64 == total - 1 {
                if let Some(last) = &roles.last {
                    return Ok(last);
                }
            }
            Ok(&roles.remains)
        }
        None => Err(LaminaError::config(format!(
            "layer '{}' does not select an image",
            def.name
        ))),
    }
}

/// Normalize a possibly-negative placement index against `len` placements.
pub fn normalize_index(layer_name: &str, index: i64, len: usize) -> LaminaResult<usize> {
    let n = if index < 0 { index + len as i64 } else { index };
    if n < 0 || n >= len as i64 {
        return Err(LaminaError::config(format!(
            "layer '{layer_name}' index {index} is out of range for {len} placements"
        )));
    }
    Ok(n as usize)
}

/// Resolve a dependency window against a layer of `len` placements.
///
/// An empty range covers the whole layer, one entry selects a single
/// placement, two entries form a half-open window. Negative entries count
/// from the end. A window whose end does not exceed its start is empty.
pub fn resolve_window(layer_name: &str, range: &[i64], len: usize) -> LaminaResult<Range<usize>> {
    match range {
        [] => Ok(0..len),
        [i] => {
            let start = normalize_index(layer_name, *i, len)?;
            Ok(start..start + 1)
        }
        [i, j] => {
            let start = normalize_endpoint(layer_name, *i, len)?;
            let end = normalize_endpoint(layer_name, *j, len)?;
            Ok(start..end.max(start))
        }
        _ => Err(LaminaError::config(format!(
            "layer '{layer_name}' range must have at most two entries"
        ))),
    }
}

// Window endpoints may sit one past the last placement.
fn normalize_endpoint(layer_name: &str, index: i64, len: usize) -> LaminaResult<usize> {
    let n = if index < 0 { index + len as i64 } else { index };
    if n < 0 || n > len as i64 {
        return Err(LaminaError::config(format!(
            "layer '{layer_name}' index {index} is out of range for {len} placements"
        )));
    }
    Ok(n as usize)
}

/// Build a base layer: a chain of `count` placements starting at the origin,
/// each subsequent instance anchored to the previous one.
pub fn build_base(
    catalog: &AssetCatalog,
    def: &LayerDef,
    count: i64,
) -> LaminaResult<Vec<Placement>> {
    let mut layer = Vec::new();
    if count <= 0 {
        return Ok(layer);
    }
    for i in 0..count as usize {
        let name = select_image_name(def, i, count)?;
        let asset = catalog.lookup(name)?;
        let placement = match layer.last() {
            Some(prev) => Placement::relative(asset, prev),
            None => Placement::explicit(asset, 0.0, 0.0),
        };
        layer.push(placement);
    }
    Ok(layer)
}

/// Build a match layer: one placement anchored to each dependency placement
/// inside the window. A requested count of zero disables the layer.
pub fn build_match(
    catalog: &AssetCatalog,
    def: &LayerDef,
    count: i64,
    dep_name: &str,
    dep: &[Placement],
) -> LaminaResult<Vec<Placement>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let window = resolve_window(dep_name, &def.range, dep.len())?;
    let mut layer = Vec::new();
    for dep_index in window {
        let name = select_image_name(def, 0, count)?;
        let asset = catalog.lookup(name)?;
        layer.push(Placement::relative(asset, &dep[dep_index]));
    }
    Ok(layer)
}

/// Build a decorate layer: a group of placements anchored to each dependency
/// placement inside the window.
///
/// With an ordered list, a count of -1 or one exceeding the list length
/// clamps to one below the list length; otherwise the group holds exactly
/// one placement per anchor.
pub fn build_decorate(
    catalog: &AssetCatalog,
    def: &LayerDef,
    count: i64,
    dep_name: &str,
    dep: &[Placement],
) -> LaminaResult<Vec<Placement>> {
    let window = resolve_window(dep_name, &def.range, dep.len())?;
    let per_anchor = match &def.images {
        Some(ImageSelect::Sequence(list)) => {
            let m = list.len() as i64;
            if count == -1 || count > m { m - 1 } else { count }
        }
        _ => 1,
    };
    let mut layer = Vec::new();
    for dep_index in window {
        for i in 0..per_anchor.max(0) as usize {
            let name = select_image_name(def, i, per_anchor)?;
            let asset = catalog.lookup(name)?;
            layer.push(Placement::relative(asset, &dep[dep_index]));
        }
    }
    Ok(layer)
}

/// Build a repeat layer: `count` placements of a single asset interpolated
/// linearly between the start and end anchors of the dependency layer.
pub fn build_repeat(
    catalog: &AssetCatalog,
    def: &LayerDef,
    count: i64,
    dep_name: &str,
    dep: &[Placement],
) -> LaminaResult<Vec<Placement>> {
    let (Some(start), Some(end)) = (&def.start, &def.end) else {
        return Err(LaminaError::config(format!(
            "repeat layer '{}' must carry start and end anchors",
            def.name
        )));
    };
    let Some(image) = &def.image else {
        return Err(LaminaError::config(format!(
            "repeat layer '{}' must name an image",
            def.name
        )));
    };
    if count < 2 {
        return Err(LaminaError::config(format!(
            "repeat layer '{}' needs at least 2 instances",
            def.name
        )));
    }

    let asset = catalog.lookup(image)?;
    let start_anchor = &dep[normalize_index(dep_name, start.index, dep.len())?];
    let end_anchor = &dep[normalize_index(dep_name, end.index, dep.len())?];

    let first = Placement::relative(asset.clone(), start_anchor);
    let last = Placement::relative(asset.clone(), end_anchor);

    let steps = (count - 1) as f64;
    let dx = (last.origin.x - first.origin.x) / steps;
    let dy = (last.origin.y - first.origin.y) / steps;

    let mut layer = vec![first];
    for i in 1..count {
        let mut placement = Placement::relative(asset.clone(), start_anchor);
        placement.translate(dx * i as f64, dy * i as f64);
        layer.push(placement);
    }
    Ok(layer)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
