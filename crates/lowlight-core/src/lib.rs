//! Lowlight Core: domain layer for low-light photo enhancement.
//!
//! This crate contains the color conversions, contrast-limited adaptive
//! histogram equalization, tone curves and the pipeline that chains them.
//! It works on in-memory pixel buffers only: no codecs, files or network.

pub mod color_management;
pub mod contrast;
pub mod error;
pub mod grading;
pub mod image;
pub mod transform;

// Re-exports for convenience.
pub use color_management::ChannelOrder;
pub use error::{EnhanceError, ImageShapeError, Result};
pub use crate::image::{ChannelPlane, Image};
pub use transform::enhance::{enhance, enhance_batch, enhance_buffer, enhance_levels};
pub use transform::lut::Lut1D;
pub use transform::params::{EnhancementParameters, Preset, TileGrid, UnknownPreset};
pub use transform::PlaneTransform;
