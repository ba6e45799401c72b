//! sRGB ↔ HSV with every channel stored on a full 0..255 scale.
//!
//! ```text
//! H8 = round(hue° × 255 / 360) mod 256
//! S8 = round(S × 255)
//! V8 = round(V × 255)
//! ```
//!
//! The 8-bit hue step is 360/255 ≈ 1.41°. Round-trips are within ±2 per
//! channel for colors whose channel spread (max − min) is below 192 and
//! within ±3 for all colors, since a hue step moves the middle channel by
//! `spread × 1.41 / 60`.

use palette::{FromColor, Hsv, Srgb};
use rayon::prelude::*;

use crate::color_management::{quantize_unit, to_unit};
use crate::error::Result;
use crate::image::{ChannelPlane, Image};

/// Degrees per 8-bit hue step.
const HUE_STEP: f32 = 360.0 / 255.0;

/// The three 8-bit HSV planes of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvPlanes {
    /// Hue, 0..255 spanning the full circle.
    pub h: ChannelPlane,
    /// Saturation, 0..255.
    pub s: ChannelPlane,
    /// Value, 0..255.
    pub v: ChannelPlane,
}

/// Convert one sRGB pixel to floating-point HSV (hue in degrees, S and V in 0..1).
pub fn rgb_pixel_to_hsv_f32(rgb: [u8; 3]) -> Hsv {
    Hsv::from_color(Srgb::new(to_unit(rgb[0]), to_unit(rgb[1]), to_unit(rgb[2])))
}

/// Convert floating-point HSV back to an sRGB pixel.
pub fn hsv_f32_to_rgb_pixel(hsv: Hsv) -> [u8; 3] {
    let rgb = Srgb::from_color(hsv);
    [
        quantize_unit(rgb.red),
        quantize_unit(rgb.green),
        quantize_unit(rgb.blue),
    ]
}

/// Convert one sRGB pixel to quantized HSV.
pub fn rgb_pixel_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let hsv = rgb_pixel_to_hsv_f32(rgb);
    let hue = (hsv.hue.into_positive_degrees() / HUE_STEP).round() as u32 % 256;
    [
        hue as u8,
        quantize_unit(hsv.saturation),
        quantize_unit(hsv.value),
    ]
}

/// Convert one quantized HSV pixel back to sRGB.
pub fn hsv_pixel_to_rgb(hsv: [u8; 3]) -> [u8; 3] {
    hsv_f32_to_rgb_pixel(Hsv::new(
        f32::from(hsv[0]) * HUE_STEP,
        to_unit(hsv[1]),
        to_unit(hsv[2]),
    ))
}

/// Split an RGB image into H, S and V planes.
pub fn rgb_to_hsv(image: &Image) -> HsvPlanes {
    let hsv: Vec<[u8; 3]> = image
        .pixels()
        .par_iter()
        .map(|&px| rgb_pixel_to_hsv(px))
        .collect();
    let [h, s, v] = Image::from_triples(image.width(), image.height(), &hsv).split_planes();
    HsvPlanes { h, s, v }
}

/// Merge H, S and V planes back into an RGB image.
pub fn hsv_to_rgb(planes: &HsvPlanes) -> Result<Image> {
    let hsv = Image::from_planes([&planes.h, &planes.s, &planes.v])?;
    Ok(hsv.map_pixels(hsv_pixel_to_rgb))
}
