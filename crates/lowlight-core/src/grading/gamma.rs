//! Power-law gamma correction through a precomputed lookup table.
//!
//! ```text
//! out[i] = clamp(round(255 × (i / 255)^(1 / gamma)), 0, 255)
//! ```
//!
//! `gamma > 1` lifts midtones without moving black or white; `gamma = 1` is
//! the identity table.

use crate::error::{EnhanceError, Result};
use crate::image::ChannelPlane;
use crate::transform::lut::Lut1D;
use crate::transform::PlaneTransform;

/// Applies gamma correction to a plane by table lookup.
#[derive(Debug, Clone)]
pub struct GammaCorrector {
    gamma: f32,
    lut: Lut1D,
}

impl GammaCorrector {
    /// Build the table for `gamma`. Rejects non-positive or non-finite values.
    pub fn new(gamma: f32) -> Result<Self> {
        if !(gamma > 0.0 && gamma.is_finite()) {
            return Err(EnhanceError::invalid_parameter(
                "gamma",
                gamma,
                "a finite value > 0",
            ));
        }
        Ok(Self {
            gamma,
            lut: gamma_lut(gamma),
        })
    }

    /// The gamma this corrector was built for.
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// The precomputed table.
    pub fn lut(&self) -> &Lut1D {
        &self.lut
    }
}

impl PlaneTransform for GammaCorrector {
    fn apply(&self, plane: &ChannelPlane) -> ChannelPlane {
        self.lut.apply(plane)
    }
}

fn gamma_lut(gamma: f32) -> Lut1D {
    if gamma == 1.0 {
        return Lut1D::identity();
    }
    let inv_gamma = 1.0 / f64::from(gamma);
    Lut1D::from_fn(|i| {
        let normalized = f64::from(i) / 255.0;
        (255.0 * normalized.powf(inv_gamma)).round().clamp(0.0, 255.0) as u8
    })
}
