//! Color space conversion between sRGB and the LAB and HSV planes, plus channel ordering.

pub mod channel_order;
pub mod hsv;
pub mod lab;

pub use channel_order::ChannelOrder;
pub use hsv::{hsv_to_rgb, rgb_to_hsv, HsvPlanes};
pub use lab::{lab_to_rgb, rgb_to_lab, LabPlanes};

/// 8-bit sample to 0..1.
pub(crate) fn to_unit(sample: u8) -> f32 {
    f32::from(sample) / 255.0
}

/// 0..1 to an 8-bit sample, rounding and clamping. NaN maps to 0.
pub(crate) fn quantize_unit(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
