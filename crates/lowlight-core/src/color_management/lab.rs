//! sRGB ↔ CIE L\*a\*b\* (D65) with 8-bit plane storage.
//!
//! The float conversion is the standard sRGB → linear → XYZ → L\*a\*b\* chain
//! from `palette`. Planes are quantized the way common image libraries store
//! 8-bit LAB:
//!
//! ```text
//! L8 = round(L* × 255 / 100)      L* ∈ [0, 100]
//! a8 = round(a* + 128)            a* ∈ [-128, 127]
//! b8 = round(b* + 128)            b* ∈ [-128, 127]
//! ```
//!
//! Every stored value is clamped to [0, 255]; the inverse clamps to the sRGB
//! gamut before quantizing.
//!
//! # Round-trip error
//! RGB → LAB → RGB is within ±1 for grays and ±2 for colors whose channel
//! spread is at most 8. Saturated colors near the gamut edge go further,
//! because one a\*/b\* step spans several sRGB codes there: over the full
//! 256³ cube the worst case is 26 (at `[26, 246, 248]`) and about 2.09 M
//! colors exceed ±2.

use palette::{FromColor, Lab, Srgb};
use rayon::prelude::*;

use crate::color_management::{quantize_unit, to_unit};
use crate::error::Result;
use crate::image::{ChannelPlane, Image};

/// Scale from L* (0..100) to the 8-bit L plane (0..255).
const L_SCALE: f32 = 255.0 / 100.0;

/// Offset that maps signed a*/b* onto unsigned 8-bit storage.
const AB_OFFSET: f32 = 128.0;

/// The three 8-bit LAB planes of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabPlanes {
    /// Lightness, scaled to 0..255.
    pub l: ChannelPlane,
    /// Green–red axis, offset by 128.
    pub a: ChannelPlane,
    /// Blue–yellow axis, offset by 128.
    pub b: ChannelPlane,
}

/// Convert one sRGB pixel to quantized LAB.
pub fn rgb_pixel_to_lab(rgb: [u8; 3]) -> [u8; 3] {
    let lab: Lab = Lab::from_color(Srgb::new(to_unit(rgb[0]), to_unit(rgb[1]), to_unit(rgb[2])));
    [
        quantize(lab.l * L_SCALE),
        quantize(lab.a + AB_OFFSET),
        quantize(lab.b + AB_OFFSET),
    ]
}

/// Convert one quantized LAB pixel back to sRGB.
pub fn lab_pixel_to_rgb(lab: [u8; 3]) -> [u8; 3] {
    let lab: Lab = Lab::new(
        f32::from(lab[0]) / L_SCALE,
        f32::from(lab[1]) - AB_OFFSET,
        f32::from(lab[2]) - AB_OFFSET,
    );
    let rgb = Srgb::from_color(lab);
    [
        quantize_unit(rgb.red),
        quantize_unit(rgb.green),
        quantize_unit(rgb.blue),
    ]
}

/// Split an RGB image into L, a and b planes.
pub fn rgb_to_lab(image: &Image) -> LabPlanes {
    let lab: Vec<[u8; 3]> = image
        .pixels()
        .par_iter()
        .map(|&px| rgb_pixel_to_lab(px))
        .collect();
    let [l, a, b] = Image::from_triples(image.width(), image.height(), &lab).split_planes();
    LabPlanes { l, a, b }
}

/// Merge L, a and b planes back into an RGB image.
///
/// Fails only if the planes disagree on dimensions.
pub fn lab_to_rgb(planes: &LabPlanes) -> Result<Image> {
    let lab = Image::from_planes([&planes.l, &planes.a, &planes.b])?;
    Ok(lab.map_pixels(lab_pixel_to_rgb))
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
