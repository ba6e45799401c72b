//! Local contrast enhancement of the lightness plane.

pub mod clahe;
pub mod histogram;

pub use clahe::{Clahe, TileLayout};
pub use histogram::TileHistogram;
