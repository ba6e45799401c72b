//! 256-bin tile histograms with clip-limited redistribution.
//!
//! # Algorithm
//! 1. Count samples into 256 bins.
//! 2. Cap every bin at `threshold`; sum the clipped excess.
//! 3. Add `excess / 256` to every bin, then one more count to `excess % 256`
//!    bins in ascending order, stepping `max(256 / remainder, 1)` bins apart.
//! 4. Scale the cumulative sum to 0..255 to get the tile's mapping.
//!
//! Redistribution preserves the total count, so the CDF always ends at 255.

use crate::transform::lut::{Lut1D, LUT_SIZE};

/// Number of histogram bins, one per 8-bit value.
pub const BINS: usize = LUT_SIZE;

/// Histogram of one CLAHE tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileHistogram {
    bins: [u32; BINS],
    total: u32,
}

impl Default for TileHistogram {
    fn default() -> Self {
        Self {
            bins: [0; BINS],
            total: 0,
        }
    }
}

impl TileHistogram {
    /// Count every sample yielded by `samples`.
    pub fn from_samples(samples: impl IntoIterator<Item = u8>) -> Self {
        let mut hist = Self::default();
        for sample in samples {
            hist.add(sample);
        }
        hist
    }

    /// Count one sample.
    #[inline]
    pub fn add(&mut self, sample: u8) {
        self.bins[sample as usize] += 1;
        self.total += 1;
    }

    /// Bin counts.
    pub fn bins(&self) -> &[u32; BINS] {
        &self.bins
    }

    /// Number of samples counted.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Per-bin cap for a tile of `tile_pixels` samples:
    /// `max(floor(clip_limit × tile_pixels / 256), 1)`.
    ///
    /// Very large clip limits saturate at `u32::MAX`, which disables clipping.
    pub fn clip_threshold(clip_limit: f32, tile_pixels: u32) -> u32 {
        let limit = (f64::from(clip_limit) * f64::from(tile_pixels) / BINS as f64).floor();
        (limit as u32).max(1)
    }

    /// Clip every bin at `threshold` and redistribute the excess.
    ///
    /// Returns the number of counts that were clipped.
    pub fn clip(&mut self, threshold: u32) -> u32 {
        let mut excess = 0u32;
        for bin in self.bins.iter_mut() {
            if *bin > threshold {
                excess += *bin - threshold;
                *bin = threshold;
            }
        }
        if excess == 0 {
            return 0;
        }

        let batch = excess / BINS as u32;
        if batch > 0 {
            for bin in self.bins.iter_mut() {
                *bin += batch;
            }
        }

        let remainder = (excess % BINS as u32) as usize;
        if remainder > 0 {
            let step = (BINS / remainder).max(1);
            for bin in self.bins.iter_mut().step_by(step).take(remainder) {
                *bin += 1;
            }
        }

        excess
    }

    /// Mapping that equalizes this histogram: the CDF scaled to 0..255.
    ///
    /// An empty histogram maps to the identity.
    pub fn equalization_lut(&self) -> Lut1D {
        if self.total == 0 {
            return Lut1D::identity();
        }
        let scale = 255.0 / f64::from(self.total);
        let mut table = [0u8; BINS];
        let mut cdf = 0u32;
        for (entry, &count) in table.iter_mut().zip(self.bins.iter()) {
            cdf += count;
            *entry = (f64::from(cdf) * scale).round().min(255.0) as u8;
        }
        Lut1D::from_table(table)
    }
}
