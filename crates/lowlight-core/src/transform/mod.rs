//! Pipeline parameters, lookup tables and the stage chain.

pub mod enhance;
pub mod lut;
pub mod params;

use crate::image::ChannelPlane;

/// A stage that rewrites a single channel plane.
///
/// Contrast enhancement, gamma correction and brightness scaling all operate
/// on the LAB lightness plane and implement this trait, so the orchestrator
/// can run them as an ordered chain.
pub trait PlaneTransform: Send + Sync {
    /// Produce a new plane; `plane` is left untouched.
    fn apply(&self, plane: &ChannelPlane) -> ChannelPlane;
}
