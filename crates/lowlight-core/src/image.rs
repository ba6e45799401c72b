//! Image representation for the enhancement pipeline.
//!
//! [`Image`] is an owned, row-major buffer of interleaved 8-bit samples with
//! exactly three channels. [`ChannelPlane`] is a single channel split out of
//! an image (the L, a, b or H, S, V plane). Splitting and merging always copy,
//! so a plane never aliases the buffer it came from.

use bytemuck::cast_slice;
use rayon::prelude::*;

use crate::error::{ImageShapeError, Result};

/// Channel count supported by the pipeline.
pub const CHANNELS: usize = 3;

/// Owned 3-channel 8-bit image.
///
/// Invariant: `data.len() == width × height × 3` and both dimensions are
/// non-zero. Every constructor checks this, so pipeline stages never re-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Wrap an interleaved sample buffer.
    ///
    /// Rejects channel counts other than 3, zero-area images, and buffers
    /// whose length disagrees with `width × height × channels`.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != CHANNELS {
            return Err(ImageShapeError::UnsupportedChannels { channels }.into());
        }
        if width == 0 || height == 0 {
            return Err(ImageShapeError::Empty { width, height }.into());
        }
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(ImageShapeError::LengthMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image from `[r, g, b]` pixel triples in row-major order.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self> {
        Self::new(width, height, CHANNELS, cast_slice(pixels).to_vec())
    }

    /// An image where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: [u8; 3]) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::from_pixels(width, height, &vec![pixel; count])
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::from_pixels(width, height, &pixels)
    }

    /// Internal constructor for buffers whose shape is correct by construction.
    pub(crate) fn from_triples(width: u32, height: u32, pixels: &[[u8; 3]]) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data: cast_slice(pixels).to_vec(),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Always 3.
    pub fn channels(&self) -> usize {
        CHANNELS
    }

    /// Interleaved samples, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its interleaved samples.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixels as `[c0, c1, c2]` triples, row-major.
    pub fn pixels(&self) -> &[[u8; 3]] {
        cast_slice(&self.data)
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels()[y as usize * self.width as usize + x as usize])
    }

    /// Apply `f` to every pixel, producing a new image.
    pub fn map_pixels<F>(&self, f: F) -> Image
    where
        F: Fn([u8; 3]) -> [u8; 3] + Send + Sync,
    {
        let mapped: Vec<[u8; 3]> = self.pixels().par_iter().map(|&px| f(px)).collect();
        Self::from_triples(self.width, self.height, &mapped)
    }

    /// Split into three independently owned planes, one per channel.
    pub fn split_planes(&self) -> [ChannelPlane; 3] {
        let count = self.data.len() / CHANNELS;
        let mut planes = [
            Vec::with_capacity(count),
            Vec::with_capacity(count),
            Vec::with_capacity(count),
        ];
        for px in self.pixels() {
            for (plane, &sample) in planes.iter_mut().zip(px) {
                plane.push(sample);
            }
        }
        planes.map(|data| ChannelPlane::from_vec(self.width, self.height, data))
    }

    /// Interleave three planes of identical dimensions into a new image.
    pub fn from_planes(planes: [&ChannelPlane; 3]) -> Result<Self> {
        let (width, height) = planes[0].dimensions();
        for plane in &planes[1..] {
            if plane.dimensions() != (width, height) {
                return Err(ImageShapeError::DimensionMismatch {
                    expected: (width, height),
                    actual: plane.dimensions(),
                }
                .into());
            }
        }
        let pixels: Vec<[u8; 3]> = planes[0]
            .data
            .iter()
            .zip(&planes[1].data)
            .zip(&planes[2].data)
            .map(|((&c0, &c1), &c2)| [c0, c1, c2])
            .collect();
        Ok(Self::from_triples(width, height, &pixels))
    }

    /// Mean value of one channel, or `None` if `channel >= 3`.
    pub fn mean_channel(&self, channel: usize) -> Option<f64> {
        if channel >= CHANNELS {
            return None;
        }
        let sum: u64 = self.pixels().iter().map(|px| u64::from(px[channel])).sum();
        Some(sum as f64 / (self.data.len() / CHANNELS) as f64)
    }

    /// Place `left` and `right` next to each other (before/after comparisons).
    pub fn side_by_side(left: &Image, right: &Image) -> Result<Image> {
        if left.height != right.height {
            return Err(ImageShapeError::DimensionMismatch {
                expected: (right.width, left.height),
                actual: right.dimensions(),
            }
            .into());
        }
        let width = left
            .width
            .checked_add(right.width)
            .ok_or(ImageShapeError::WidthOverflow {
                left: left.width,
                right: right.width,
            })?;
        let left_row = left.width as usize * CHANNELS;
        let right_row = right.width as usize * CHANNELS;
        let mut data = Vec::with_capacity(left.data.len() + right.data.len());
        for (l, r) in left
            .data
            .chunks_exact(left_row)
            .zip(right.data.chunks_exact(right_row))
        {
            data.extend_from_slice(l);
            data.extend_from_slice(r);
        }
        Ok(Self {
            width,
            height: left.height,
            data,
        })
    }

    /// Take ownership of an `image` crate RGB buffer.
    pub fn from_rgb_image(rgb: ::image::RgbImage) -> Result<Self> {
        let (width, height) = rgb.dimensions();
        Self::new(width, height, CHANNELS, rgb.into_raw())
    }

    /// Convert any decoded `image` crate buffer to 8-bit RGB.
    ///
    /// Grayscale is expanded and alpha is dropped, which is the caller-side
    /// pre-conversion the pipeline expects.
    pub fn from_dynamic(image: &::image::DynamicImage) -> Result<Self> {
        Self::from_rgb_image(image.to_rgb8())
    }

    /// Hand the pixels back as an `image` crate buffer for encoding.
    pub fn into_rgb_image(self) -> ::image::RgbImage {
        self.into()
    }
}

impl From<Image> for ::image::RgbImage {
    fn from(img: Image) -> Self {
        let width = img.width as usize;
        let pixels = img.pixels();
        ::image::RgbImage::from_fn(img.width, img.height, |x, y| {
            ::image::Rgb(pixels[y as usize * width + x as usize])
        })
    }
}

/// A single 8-bit channel of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ChannelPlane {
    /// Wrap a row-major sample buffer of exactly `width × height` samples.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageShapeError::Empty { width, height }.into());
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(ImageShapeError::LengthMismatch {
                width,
                height,
                channels: 1,
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self::from_vec(width, height, data))
    }

    /// A plane where every sample is `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    /// Build a plane by evaluating `f(x, y)` for every sample.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Result<Self> {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    pub(crate) fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Plane width in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Plane height in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the plane, returning its samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(x, y)`, or `None` outside the plane.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Sample at `(x, y)` with coordinates past the right/bottom edge
    /// replicated from the last column/row.
    pub(crate) fn sample_replicated(&self, x: usize, y: usize) -> u8 {
        let x = x.min(self.width as usize - 1);
        let y = y.min(self.height as usize - 1);
        self.data[y * self.width as usize + x]
    }

    /// Mean sample value.
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data.iter().map(|&v| u64::from(v)).sum();
        sum as f64 / self.data.len() as f64
    }

    /// Apply `f` to every sample, producing a new plane.
    pub fn map(&self, f: impl Fn(u8) -> u8 + Send + Sync) -> ChannelPlane {
        let data = self.data.par_iter().map(|&v| f(v)).collect();
        Self::from_vec(self.width, self.height, data)
    }
}
