use crate::foundation::error::{LaminaError, LaminaResult};

pub use kurbo::{Point, Rect, Vec2};

/// Output surface dimensions in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Build a surface size from fractional extents, rounding up.
    pub fn from_extents(width: f64, height: f64) -> LaminaResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(LaminaError::config(
                "surface extents must be finite and >= 0",
            ));
        }
        Ok(Self {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        })
    }
}
