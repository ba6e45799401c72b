//! Tone and color stages that follow contrast enhancement.

pub mod brightness;
pub mod gamma;
pub mod saturation;

pub use brightness::BrightnessScaler;
pub use gamma::GammaCorrector;
pub use saturation::SaturationBooster;
