//! The enhancement pipeline: validation, stage ordering, and batch helpers.
//!
//! ```text
//! pixels ─▶ RGB ─▶ LAB ─▶ CLAHE(L) ─▶ gamma(L) ─▶ brightness(L)
//!        ─▶ RGB ─▶ saturation (HSV) ─▶ caller's channel order
//! ```
//!
//! Every call builds its stages from the parameters and drops them on
//! return. Nothing is shared between calls, so distinct images can be
//! enhanced concurrently without synchronization.

use rayon::prelude::*;

use crate::color_management::channel_order::{from_rgb, to_rgb};
use crate::color_management::{lab_to_rgb, rgb_to_lab, LabPlanes};
use crate::contrast::Clahe;
use crate::error::Result;
use crate::grading::{BrightnessScaler, GammaCorrector, SaturationBooster};
use crate::image::Image;
use crate::transform::params::{EnhancementParameters, Preset};
use crate::transform::PlaneTransform;

/// Enhance one image.
///
/// Parameters are validated before any pixel is read. The input is never
/// modified; the output has the same dimensions and channel order.
pub fn enhance(image: &Image, params: &EnhancementParameters) -> Result<Image> {
    params.validate()?;
    let clahe = Clahe::new(params.clip_limit, params.tile_grid)?;
    let gamma = GammaCorrector::new(params.gamma)?;
    let brightness = BrightnessScaler::new(params.brightness_boost)?;
    let saturation = SaturationBooster::new(params.saturation_boost)?;

    let span = tracing::debug_span!(
        "enhance",
        width = image.width(),
        height = image.height(),
        clip_limit = params.clip_limit,
        tile_rows = params.tile_grid.rows,
        tile_cols = params.tile_grid.cols,
        gamma = params.gamma,
        brightness_boost = params.brightness_boost,
        saturation_boost = params.saturation_boost,
        channel_order = %params.channel_order,
    );
    let _enter = span.enter();

    let rgb = to_rgb(image, params.channel_order);
    let LabPlanes { l, a, b } = rgb_to_lab(&rgb);
    let lightness_in = l.mean();

    let stages: [&dyn PlaneTransform; 3] = [&clahe, &gamma, &brightness];
    let l = stages.iter().fold(l, |plane, stage| stage.apply(&plane));
    tracing::debug!(lightness_in, lightness_out = l.mean(), "lightness enhanced");

    let merged = lab_to_rgb(&LabPlanes { l, a, b })?;
    let boosted = saturation.apply(&merged);
    Ok(from_rgb(boosted, params.channel_order))
}

/// Enhance a raw interleaved buffer.
///
/// `channels` must be 3 and `data.len()` must equal
/// `width × height × channels`. Parameters are checked first, so a bad
/// parameter is reported even when the buffer is also malformed.
pub fn enhance_buffer(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    params: &EnhancementParameters,
) -> Result<Vec<u8>> {
    params.validate()?;
    let image = Image::new(width, height, channels, data.to_vec())?;
    Ok(enhance(&image, params)?.into_bytes())
}

/// Enhance many images with the same parameters, in parallel.
///
/// Results are in input order. A failure affects only its own slot.
pub fn enhance_batch(images: &[Image], params: &EnhancementParameters) -> Vec<Result<Image>> {
    tracing::debug!(count = images.len(), "enhancing batch");
    images
        .par_iter()
        .map(|image| enhance(image, params))
        .collect()
}

/// Render `image` once per preset, in the order given.
pub fn enhance_levels(image: &Image, presets: &[Preset]) -> Result<Vec<(Preset, Image)>> {
    presets
        .par_iter()
        .map(|&preset| Ok((preset, enhance(image, &preset.params())?)))
        .collect()
}
