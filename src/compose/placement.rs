use std::sync::Arc;

use crate::assets::catalog::Asset;
use crate::foundation::core::{Point, Rect, Vec2};

#[derive(Clone, Debug)]
/// One positioned instance of an asset within a resolved layer.
pub struct Placement {
    /// The placed asset.
    pub asset: Arc<Asset>,
    /// Top-left corner in composition space.
    pub origin: Point,
    /// Bottom-right corner; equals `origin` when no bitmap is attached.
    pub extent: Point,
}

impl Placement {
    /// Place an asset at explicit coordinates.
    pub fn explicit(asset: Arc<Asset>, x: f64, y: f64) -> Self {
        Self::at(asset, Point::new(x, y))
    }

    /// Place an asset relative to an anchor placement.
    ///
    /// The anchor's asset name is looked up in this asset's relative-offset
    /// table; when the table has no entry the placement lands at (0, 0).
    pub fn relative(asset: Arc<Asset>, anchor: &Placement) -> Self {
        let origin = match asset.relative.get(&anchor.asset.name) {
            Some(offset) => anchor.origin + *offset,
            None => Point::ZERO,
        };
        Self::at(asset, origin)
    }

    fn at(asset: Arc<Asset>, origin: Point) -> Self {
        let extent = match &asset.bitmap {
            Some(b) => origin + Vec2::new(f64::from(b.width), f64::from(b.height)),
            None => origin,
        };
        Self {
            asset,
            origin,
            extent,
        }
    }

    /// Shift origin and extent by the given delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let d = Vec2::new(dx, dy);
        self.origin += d;
        self.extent += d;
    }

    /// The axis-aligned box covered by this placement.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.extent.x, self.extent.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
