//! Linear brightness gain on the lightness plane.
//!
//! ```text
//! out[i] = clamp(round(in[i] × boost), 0, 255)
//! ```
//!
//! The output depends only on the input sample, so the gain is baked into a
//! 256-entry table like gamma. Boosts below 1 darken.

use crate::error::{EnhanceError, Result};
use crate::image::ChannelPlane;
use crate::transform::lut::Lut1D;
use crate::transform::PlaneTransform;

/// Multiplies every sample by a constant gain with saturation at 255.
#[derive(Debug, Clone)]
pub struct BrightnessScaler {
    boost: f32,
    lut: Lut1D,
}

impl BrightnessScaler {
    /// Rejects non-positive or non-finite boosts.
    pub fn new(boost: f32) -> Result<Self> {
        if !(boost > 0.0 && boost.is_finite()) {
            return Err(EnhanceError::invalid_parameter(
                "brightness_boost",
                boost,
                "a finite value > 0",
            ));
        }
        let gain = f64::from(boost);
        let lut = Lut1D::from_fn(|i| (f64::from(i) * gain).round().clamp(0.0, 255.0) as u8);
        Ok(Self { boost, lut })
    }

    /// The gain.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// The baked table.
    pub fn lut(&self) -> &Lut1D {
        &self.lut
    }
}

impl PlaneTransform for BrightnessScaler {
    fn apply(&self, plane: &ChannelPlane) -> ChannelPlane {
        self.lut.apply(plane)
    }
}
