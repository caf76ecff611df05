//! Declarative layered raster composition.
//!
//! lamina assembles a composite image from a content pack: a directory of
//! image assets plus a JSON manifest describing layers and their ordering.
//! The pipeline has four stages:
//!
//! 1. **Open** a [`ContentPack`], parsing and validating its manifest.
//! 2. **Load** decoded bitmaps into an [`AssetCatalog`].
//! 3. **Resolve** manifest layers into placements with a
//!    [`CompositionEngine`].
//! 4. **Draw** the composite onto a [`RenderSurface`] such as
//!    [`RasterSurface`].
//!
//! Resolution is pure: the engine performs no IO and is deterministic for a
//! given manifest and configuration. Pixel data is premultiplied RGBA8
//! end-to-end.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod manifest;
mod render;

pub use assets::catalog::{Asset, AssetCatalog, BitmapSource};
pub use assets::decode::{Bitmap, decode_bitmap};
pub use compose::engine::CompositionEngine;
pub use compose::layer::{normalize_index, resolve_window, select_image_name};
pub use compose::placement::Placement;
pub use foundation::core::{Point, Rect, SurfaceSize, Vec2};
pub use foundation::error::{LaminaError, LaminaResult};
pub use manifest::config::{LayerCount, effective_config};
pub use manifest::model::{
    AnchorRef, ImageDef, ImageSelect, LayerDef, LayerMode, Manifest, OrderGroup, RoleTable,
};
pub use manifest::pack::{ContentPack, normalize_rel_path};
pub use render::surface::{RasterSurface, RenderSurface};
