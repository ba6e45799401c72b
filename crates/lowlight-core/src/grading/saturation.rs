//! HSV saturation gain, the last stage of the pipeline.
//!
//! Each pixel goes through floating-point HSV, has its saturation scaled and
//! clamped to 0..1, and is quantized once on the way back. Going through
//! 8-bit HSV planes instead would add up to ±3 of hue quantization error
//! even when the gain is 1.

use crate::color_management::hsv::{hsv_f32_to_rgb_pixel, rgb_pixel_to_hsv_f32};
use crate::error::{EnhanceError, Result};
use crate::image::Image;

/// Scales color saturation; neutral pixels stay neutral.
#[derive(Debug, Clone, Copy)]
pub struct SaturationBooster {
    factor: f32,
}

impl SaturationBooster {
    /// Rejects negative or non-finite factors. Zero fully desaturates.
    pub fn new(factor: f32) -> Result<Self> {
        if !(factor >= 0.0 && factor.is_finite()) {
            return Err(EnhanceError::invalid_parameter(
                "saturation_boost",
                factor,
                "a finite value >= 0",
            ));
        }
        Ok(Self { factor })
    }

    /// The saturation gain.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Boost one pixel.
    pub fn boost_pixel(&self, rgb: [u8; 3]) -> [u8; 3] {
        let mut hsv = rgb_pixel_to_hsv_f32(rgb);
        hsv.saturation = (hsv.saturation * self.factor).clamp(0.0, 1.0);
        hsv_f32_to_rgb_pixel(hsv)
    }

    /// Boost every pixel of an RGB image.
    pub fn apply(&self, image: &Image) -> Image {
        if self.factor == 1.0 {
            return image.clone();
        }
        image.map_pixels(|px| self.boost_pixel(px))
    }
}
