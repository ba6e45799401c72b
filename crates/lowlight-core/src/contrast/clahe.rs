//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! Equalizes local contrast of a single plane without blowing up the flat,
//! noisy regions typical of underexposed photos.
//!
//! # Algorithm
//! 1. Split the plane into a `rows × cols` grid of equal tiles. Tile size is
//!    `ceil(H / rows) × ceil(W / cols)`; the bottom/right edge is padded by
//!    replicating the last row/column. A grid axis with more tiles than the
//!    plane has samples collapses to one tile.
//! 2. Build a clip-limited histogram per tile and turn it into a mapping
//!    (see [`TileHistogram`]).
//! 3. Map each sample through the four nearest tile mappings and blend them
//!    bilinearly by the sample's position between tile centers. Samples
//!    outside the outermost centers use the edge tiles (no extrapolation).
//!
//! ```text
//! pos   = (p + 0.5) / tile − 0.5          clamped to [0, count − 1]
//! upper = lerp(lut[t0][v], lut[t0][t1], fx)  …
//! out   = round(lerp(upper, lower, fy))
//! ```
//!
//! # Complexity
//! O(H × W) histogram building plus O(H × W) interpolation. Tiles are built in
//! parallel and rows are interpolated in parallel; output does not depend on
//! scheduling.

use rayon::prelude::*;

use crate::contrast::histogram::TileHistogram;
use crate::error::{EnhanceError, Result};
use crate::image::ChannelPlane;
use crate::transform::lut::Lut1D;
use crate::transform::params::TileGrid;
use crate::transform::PlaneTransform;

/// CLAHE stage configured with a clip limit and tile grid.
#[derive(Debug, Clone, Copy)]
pub struct Clahe {
    clip_limit: f32,
    grid: TileGrid,
}

impl Clahe {
    /// Rejects a non-positive clip limit or an empty grid axis.
    pub fn new(clip_limit: f32, grid: TileGrid) -> Result<Self> {
        if !(clip_limit > 0.0 && clip_limit.is_finite()) {
            return Err(EnhanceError::invalid_parameter(
                "clip_limit",
                clip_limit,
                "a finite value > 0",
            ));
        }
        if grid.rows == 0 || grid.cols == 0 {
            let (field, value) = if grid.rows == 0 {
                ("tile_grid.rows", grid.rows)
            } else {
                ("tile_grid.cols", grid.cols)
            };
            return Err(EnhanceError::invalid_parameter(field, value, ">= 1"));
        }
        Ok(Self { clip_limit, grid })
    }

    /// Clip limit as a multiple of the mean bin height.
    pub fn clip_limit(&self) -> f32 {
        self.clip_limit
    }

    /// Requested tile grid.
    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    /// Clipped equalization mappings of the top-left `rows × cols` tiles,
    /// row-major.
    ///
    /// Tiles past the reach of interpolation hold only padding and are
    /// skipped; see [`TileLayout::reachable`].
    pub fn tile_luts(
        &self,
        plane: &ChannelPlane,
        layout: &TileLayout,
        rows: usize,
        cols: usize,
    ) -> Vec<Lut1D> {
        let threshold = TileHistogram::clip_threshold(self.clip_limit, layout.tile_pixels() as u32);
        (0..rows * cols)
            .into_par_iter()
            .map(|index| {
                let y0 = (index / cols) * layout.tile_height;
                let x0 = (index % cols) * layout.tile_width;
                let mut hist = TileHistogram::default();
                for y in y0..y0 + layout.tile_height {
                    for x in x0..x0 + layout.tile_width {
                        hist.add(plane.sample_replicated(x, y));
                    }
                }
                hist.clip(threshold);
                hist.equalization_lut()
            })
            .collect()
    }
}

impl PlaneTransform for Clahe {
    fn apply(&self, plane: &ChannelPlane) -> ChannelPlane {
        let (width, height) = plane.dimensions();
        let layout = TileLayout::for_plane(self.grid, width, height);
        let (rows, cols) = layout.reachable(width, height);
        tracing::trace!(
            rows = layout.rows,
            cols = layout.cols,
            built = rows * cols,
            tile_width = layout.tile_width,
            tile_height = layout.tile_height,
            "clahe tile layout"
        );

        let luts = self.tile_luts(plane, &layout, rows, cols);
        let width = width as usize;
        let xs = axis_weights(width, layout.tile_width, layout.cols);
        let ys = axis_weights(height as usize, layout.tile_height, layout.rows);

        let src = plane.as_slice();
        let mut out = vec![0u8; src.len()];
        out.par_chunks_mut(width)
            .zip(src.par_chunks(width))
            .zip(ys.par_iter())
            .for_each(|((dst_row, src_row), wy)| {
                let upper_luts = &luts[wy.lo * cols..(wy.lo + 1) * cols];
                let lower_luts = &luts[wy.hi * cols..(wy.hi + 1) * cols];
                for ((dst, &v), wx) in dst_row.iter_mut().zip(src_row).zip(&xs) {
                    let tl = f32::from(upper_luts[wx.lo].lookup(v));
                    let tr = f32::from(upper_luts[wx.hi].lookup(v));
                    let bl = f32::from(lower_luts[wx.lo].lookup(v));
                    let br = f32::from(lower_luts[wx.hi].lookup(v));
                    let upper = tl + (tr - tl) * wx.frac;
                    let lower = bl + (br - bl) * wx.frac;
                    *dst = (upper + (lower - upper) * wy.frac).round().clamp(0.0, 255.0) as u8;
                }
            });

        ChannelPlane::from_vec(plane.width(), height, out)
    }
}

/// Effective tile geometry for one plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Tile rows actually used.
    pub rows: usize,
    /// Tile columns actually used.
    pub cols: usize,
    /// Samples per tile horizontally, including padding.
    pub tile_width: usize,
    /// Samples per tile vertically, including padding.
    pub tile_height: usize,
}

impl TileLayout {
    /// Fit `grid` onto a `width × height` plane.
    pub fn for_plane(grid: TileGrid, width: u32, height: u32) -> Self {
        let rows = effective_count(grid.rows, height);
        let cols = effective_count(grid.cols, width);
        Self {
            rows,
            cols,
            tile_width: (width as usize).div_ceil(cols),
            tile_height: (height as usize).div_ceil(rows),
        }
    }

    /// Samples per tile.
    pub fn tile_pixels(&self) -> usize {
        self.tile_width * self.tile_height
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Tile rows and columns that interpolation reads for a
    /// `width × height` plane.
    ///
    /// Padding can add whole tiles past the last sample (9 samples in 8
    /// tiles of 2 span 16); only the tiles a sample's neighbouring centers
    /// fall in are needed.
    pub fn reachable(&self, width: u32, height: u32) -> (usize, usize) {
        (
            reachable_count(height as usize, self.tile_height, self.rows),
            reachable_count(width as usize, self.tile_width, self.cols),
        )
    }
}

/// One past the highest tile index `axis_weights` yields on an axis.
fn reachable_count(extent: usize, tile: usize, count: usize) -> usize {
    let last = ((extent - 1) as f32 + 0.5) / tile as f32 - 0.5;
    let lo = last.clamp(0.0, (count - 1) as f32).floor() as usize;
    (lo + 1).min(count - 1) + 1
}

fn effective_count(requested: u32, extent: u32) -> usize {
    if requested > extent {
        1
    } else {
        requested.max(1) as usize
    }
}

/// Neighbouring tile indices and blend weight along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisWeight {
    lo: usize,
    hi: usize,
    frac: f32,
}

fn axis_weights(extent: usize, tile: usize, count: usize) -> Vec<AxisWeight> {
    let last = (count - 1) as f32;
    (0..extent)
        .map(|p| {
            let pos = ((p as f32 + 0.5) / tile as f32 - 0.5).clamp(0.0, last);
            let lo = pos.floor() as usize;
            AxisWeight {
                lo,
                hi: (lo + 1).min(count - 1),
                frac: pos - lo as f32,
            }
        })
        .collect()
}
