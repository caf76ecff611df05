use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::catalog::BitmapSource;
use crate::assets::decode::{Bitmap, decode_bitmap};
use crate::foundation::error::{LaminaError, LaminaResult};
use crate::manifest::config::LayerCount;
use crate::manifest::model::Manifest;

#[derive(Debug)]
/// A content pack rooted at a directory.
///
/// The root holds `manifest.json`, an optional `recomends.json` with the
/// recommended per-layer counts, and the image files named by each asset's
/// `src` key.
pub struct ContentPack {
    root: PathBuf,
    manifest: Manifest,
    recommended: Vec<LayerCount>,
}

impl ContentPack {
    /// Open a pack directory, parsing and validating its manifest.
    pub fn open(root: impl AsRef<Path>) -> LaminaResult<Self> {
        let root = root.as_ref().to_path_buf();

        let manifest_path = root.join("manifest.json");
        let bytes = std::fs::read(&manifest_path)
            .with_context(|| format!("read manifest '{}'", manifest_path.display()))
            .map_err(LaminaError::from)?;
        let manifest: Manifest = serde_json::from_slice(&bytes)
            .map_err(|e| LaminaError::serde(format!("parse manifest JSON: {e}")))?;
        manifest.validate()?;

        let recommended_path = root.join("recomends.json");
        let recommended = match std::fs::read(&recommended_path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| LaminaError::serde(format!("parse recommended config JSON: {e}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(LaminaError::from(anyhow::Error::new(err).context(
                    format!(
                        "read recommended config '{}'",
                        recommended_path.display()
                    ),
                )));
            }
        };

        Ok(Self {
            root,
            manifest,
            recommended,
        })
    }

    /// The parsed pack manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Recommended per-layer counts shipped with the pack; empty when the
    /// pack carries none.
    pub fn recommended(&self) -> &[LayerCount] {
        &self.recommended
    }

    fn read_bytes(&self, norm_path: &str) -> LaminaResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(LaminaError::from)
    }
}

impl BitmapSource for ContentPack {
    fn fetch(&self, source: &str) -> LaminaResult<Bitmap> {
        let norm = normalize_rel_path(source)?;
        let bytes = self.read_bytes(&norm)?;
        decode_bitmap(&bytes)
    }
}

/// Normalize an asset `src` key to a safe pack-relative path.
pub fn normalize_rel_path(source: &str) -> LaminaResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(LaminaError::config("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(LaminaError::config("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(LaminaError::config("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(LaminaError::config("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/pack.rs"]
mod tests;
