//! Pipeline-level properties of `enhance`, exercised through the public API.

use lowlight_core::color_management::{hsv_to_rgb, lab_to_rgb, rgb_to_hsv, rgb_to_lab, LabPlanes};
use lowlight_core::contrast::{Clahe, TileHistogram};
use lowlight_core::grading::{BrightnessScaler, GammaCorrector, SaturationBooster};
use lowlight_core::{
    enhance, enhance_batch, enhance_levels, ChannelOrder, ChannelPlane, EnhanceError,
    EnhancementParameters, Image, PlaneTransform, Preset, TileGrid,
};

/// Dark, slightly warm photo-like test image with texture.
fn dark_scene(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        let base = 12 + (x * 3 + y * 2) % 45;
        let texture = (x * 31 ^ y * 17) % 9;
        let v = (base + texture) as u8;
        [v + 10, v + 4, v]
    })
    .unwrap()
}

fn max_channel_error(a: &Image, b: &Image) -> u8 {
    a.pixels()
        .iter()
        .zip(b.pixels())
        .flat_map(|(p, q)| (0..3).map(move |c| p[c].abs_diff(q[c])))
        .max()
        .unwrap_or(0)
}

fn swap(image: &Image) -> Image {
    image.map_pixels(|[r, g, b]| [b, g, r])
}

fn lightness(image: &Image) -> ChannelPlane {
    rgb_to_lab(image).l
}

// ── Color conversion round trips ────────────────────────────────

#[test]
fn test_lab_roundtrip_of_neutral_and_low_chroma_images() {
    let grays = Image::from_fn(256, 1, |x, _| [x as u8; 3]).unwrap();
    let back = lab_to_rgb(&rgb_to_lab(&grays)).unwrap();
    assert!(max_channel_error(&grays, &back) <= 1);

    // Channel spread at most 8 around every base level.
    let low_chroma = Image::from_fn(248, 9, |x, y| {
        let base = x as u8;
        [base + 4, base + y as u8, base + (8 - y) as u8]
    })
    .unwrap();
    let back = lab_to_rgb(&rgb_to_lab(&low_chroma)).unwrap();
    assert!(max_channel_error(&low_chroma, &back) <= 2);
}

#[test]
fn test_hsv_roundtrip_stays_within_quantization_error() {
    let cube = Image::from_fn(18, 18 * 18, |x, y| {
        [(x * 15) as u8, ((y % 18) * 15) as u8, ((y / 18) * 15) as u8]
    })
    .unwrap();
    let back = hsv_to_rgb(&rgb_to_hsv(&cube)).unwrap();
    assert!(max_channel_error(&cube, &back) <= 3);

    let muted = dark_scene(40, 40);
    let back = hsv_to_rgb(&rgb_to_hsv(&muted)).unwrap();
    assert!(max_channel_error(&muted, &back) <= 2);
}

// ── Identity parameters ─────────────────────────────────────────

#[test]
fn test_identity_stages_are_exact_noops() {
    let plane = ChannelPlane::from_fn(32, 8, |x, y| (x * 8 + y) as u8).unwrap();
    assert_eq!(GammaCorrector::new(1.0).unwrap().apply(&plane), plane);
    assert_eq!(BrightnessScaler::new(1.0).unwrap().apply(&plane), plane);

    let image = dark_scene(32, 8);
    assert_eq!(SaturationBooster::new(1.0).unwrap().apply(&image), image);
}

#[test]
fn test_identity_parameters_reduce_to_global_equalization() {
    let image = dark_scene(48, 32);
    let params = EnhancementParameters::default()
        .with_clip_limit(1.0e9)
        .with_tile_grid(1, 1)
        .with_gamma(1.0)
        .with_brightness_boost(1.0)
        .with_saturation_boost(1.0);
    let out = enhance(&image, &params).unwrap();

    let LabPlanes { l, a, b } = rgb_to_lab(&image);
    let equalized = TileHistogram::from_samples(l.as_slice().iter().copied())
        .equalization_lut()
        .apply(&l);
    let expected = lab_to_rgb(&LabPlanes { l: equalized, a, b }).unwrap();
    assert_eq!(out, expected);
}

// ── Gamma monotonicity ──────────────────────────────────────────

#[test]
fn test_gamma_above_one_never_darkens() {
    let ramp = ChannelPlane::from_fn(256, 1, |x, _| x as u8).unwrap();
    for gamma in [1.01, 1.2, 1.8, 3.0, 10.0] {
        let out = GammaCorrector::new(gamma).unwrap().apply(&ramp);
        for (o, i) in out.as_slice().iter().zip(ramp.as_slice()) {
            assert!(o >= i, "gamma {gamma}: {i} -> {o}");
        }
        assert_eq!(out.get(0, 0), Some(0));
        assert_eq!(out.get(255, 0), Some(255));
    }
}

// ── Bounds ──────────────────────────────────────────────────────

#[test]
fn test_extreme_parameters_stay_in_range() {
    let image = dark_scene(13, 11);
    let base = EnhancementParameters::default();
    let cases = [
        base.with_clip_limit(1.0e-6),
        base.with_clip_limit(1.0e9),
        base.with_gamma(0.05),
        base.with_gamma(50.0),
        base.with_brightness_boost(0.01),
        base.with_brightness_boost(40.0),
        base.with_saturation_boost(0.0),
        base.with_saturation_boost(25.0),
        base.with_tile_grid(64, 64),
        base.with_tile_grid(3, 7),
        base.with_tile_grid(1, 1),
    ];
    for params in cases {
        let out = enhance(&image, &params).unwrap();
        assert_eq!(out.dimensions(), image.dimensions());
        assert_eq!(out.as_bytes().len(), 13 * 11 * 3);
    }
}

#[test]
fn test_saturated_white_survives_strong_boost() {
    let image = Image::filled(8, 8, [255, 255, 255]).unwrap();
    let out = enhance(&image, &Preset::Ultra.params()).unwrap();
    assert!(out.pixels().iter().all(|px| px.iter().all(|&c| c >= 250)));
}

// ── Determinism and channel order ───────────────────────────────

#[test]
fn test_identical_calls_are_byte_identical() {
    let image = dark_scene(37, 29);
    let params = Preset::Night.params();
    let first = enhance(&image, &params).unwrap();
    let second = enhance(&image, &params).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_bgr_input_matches_swapped_rgb_run() {
    let image = dark_scene(21, 14);
    let rgb = EnhancementParameters::default();
    let bgr = rgb.with_channel_order(ChannelOrder::Bgr);
    let direct = enhance(&image, &bgr).unwrap();
    let via_rgb = swap(&enhance(&swap(&image), &rgb).unwrap());
    assert_eq!(direct, via_rgb);
}

#[test]
fn test_unknown_channel_order_is_rejected() {
    let err = "rgba".parse::<ChannelOrder>().unwrap_err();
    assert!(matches!(err, EnhanceError::UnsupportedChannelOrder { ref value } if value == "rgba"));
    assert_eq!(" BGR ".parse::<ChannelOrder>().unwrap(), ChannelOrder::Bgr);
}

// ── Concrete scenarios ──────────────────────────────────────────

#[test]
fn test_flat_gray_40_is_brightened_and_stays_neutral() {
    let image = Image::filled(16, 16, [40, 40, 40]).unwrap();
    let out = enhance(&image, &EnhancementParameters::default()).unwrap();

    let l_in = lightness(&image).mean();
    let l_out = lightness(&out).mean();
    assert!(l_out > l_in, "{l_out} <= {l_in}");
    assert!(l_out > 100.0, "expected a strong lift, got {l_out}");

    for px in out.pixels() {
        let spread = px.iter().max().unwrap() - px.iter().min().unwrap();
        assert!(spread <= 1, "gray picked up color: {px:?}");
    }
}

#[test]
fn test_nine_by_nine_with_eight_by_eight_grid_is_smooth() {
    let image = Image::from_fn(9, 9, |x, y| [(20 + 2 * (x + y)) as u8; 3]).unwrap();
    let out = enhance(&image, &EnhancementParameters::default()).unwrap();
    assert_eq!(out.dimensions(), (9, 9));

    // Tiles are 2×2, so pixel pairs (1,2), (3,4), … straddle a tile edge.
    let l = lightness(&out);
    let mut boundary = 0u8;
    let mut interior = 0u8;
    for y in 0..9 {
        for x in 0..8 {
            let dx = l.get(x, y).unwrap().abs_diff(l.get(x + 1, y).unwrap());
            let dy = l.get(y, x).unwrap().abs_diff(l.get(y, x + 1).unwrap());
            let worst = dx.max(dy);
            if x % 2 == 1 {
                boundary = boundary.max(worst);
            } else {
                interior = interior.max(worst);
            }
        }
    }
    assert!(
        boundary <= interior,
        "tile edges jump by {boundary}, interior by {interior}"
    );
}

#[test]
fn test_clahe_handles_non_divisible_planes_directly() {
    let plane = ChannelPlane::from_fn(9, 9, |x, y| (20 + 3 * (x + y)) as u8).unwrap();
    let out = Clahe::new(2.0, TileGrid::new(8, 8)).unwrap().apply(&plane);
    assert_eq!(out.dimensions(), (9, 9));
    assert!(out.mean() > plane.mean());
}

// ── Batch and levels ────────────────────────────────────────────

#[test]
fn test_batch_matches_sequential_calls() {
    let images: Vec<Image> = (0..6).map(|i| dark_scene(10 + i, 12)).collect();
    let params = Preset::Indoor.params();
    let batch = enhance_batch(&images, &params);
    for (image, result) in images.iter().zip(batch) {
        assert_eq!(result.unwrap(), enhance(image, &params).unwrap());
    }
}

#[test]
fn test_levels_get_brighter_with_strength() {
    let image = dark_scene(32, 32);
    let levels = enhance_levels(&image, Preset::levels()).unwrap();
    let lightness_means: Vec<f64> = levels
        .iter()
        .map(|(_, out)| lightness(out).mean())
        .collect();
    assert!(lightness_means[0] > lightness(&image).mean());
    assert!(lightness_means[3] > lightness_means[0]);
}

// ── Interop and configuration ───────────────────────────────────

#[test]
fn test_decoded_image_roundtrip_through_pipeline() {
    let rgba = image::RgbaImage::from_fn(12, 6, |x, y| image::Rgba([x as u8 * 4, y as u8 * 8, 20, 255]));
    let input = Image::from_dynamic(&image::DynamicImage::ImageRgba8(rgba)).unwrap();
    let out = enhance(&input, &EnhancementParameters::default()).unwrap();

    let comparison = Image::side_by_side(&input, &out).unwrap();
    assert_eq!(comparison.dimensions(), (24, 6));
    assert_eq!(comparison.pixel(12, 0), out.pixel(0, 0));

    let encoded = out.into_rgb_image();
    assert_eq!(encoded.dimensions(), (12, 6));
}

#[test]
fn test_json_parameters_drive_the_pipeline() {
    let params =
        EnhancementParameters::from_json(r#"{"clip_limit": 3.0, "tile_grid": {"rows": 4, "cols": 4}}"#)
            .unwrap();
    assert_eq!(params.tile_grid, TileGrid::new(4, 4));
    let image = dark_scene(16, 16);
    assert!(enhance(&image, &params).is_ok());

    let err = EnhancementParameters::from_json(r#"{"tile_grid": {"rows": 0, "cols": 4}}"#).unwrap_err();
    assert!(matches!(err, EnhanceError::InvalidParameter { field: "tile_grid.rows", .. }));
}
