//! Error types for the enhancement pipeline.
//!
//! Every error is raised before or during pipeline execution. None of them is
//! retried internally, and none is produced for a validated input: numeric
//! edge cases inside the stages are clamped rather than reported.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnhanceError>;

/// Failures surfaced to callers of the enhancement pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    /// A tuning parameter is outside its legal range.
    #[error("invalid parameter `{field}`: got {value}, expected {expected}")]
    InvalidParameter {
        /// Parameter name as it appears in serialized parameters.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint, e.g. `"> 0"`.
        expected: &'static str,
    },

    /// The pixel buffer does not describe a supported image.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageShapeError),

    /// A channel order other than RGB or BGR was requested.
    #[error("unsupported channel order `{value}` (expected `rgb` or `bgr`)")]
    UnsupportedChannelOrder {
        /// The unrecognized order as supplied by the caller.
        value: String,
    },

    /// A serialized parameter document could not be parsed.
    #[error("malformed enhancement parameters: {0}")]
    MalformedParameters(#[from] serde_json::Error),
}

/// Why a buffer or plane was rejected as an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageShapeError {
    /// Only 3-channel color is supported.
    #[error("only 3-channel color images are supported, got {channels} channel(s)")]
    UnsupportedChannels {
        /// Declared channel count.
        channels: usize,
    },

    /// Buffer length disagrees with the declared dimensions.
    #[error("buffer holds {actual} samples but {width}x{height}x{channels} requires {expected}")]
    LengthMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Declared channel count.
        channels: usize,
        /// `width × height × channels`.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Width or height is zero.
    #[error("image has zero area ({width}x{height})")]
    Empty {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// Combined width does not fit in `u32`.
    #[error("combined width {left} + {right} overflows")]
    WidthOverflow {
        /// Width of the left image.
        left: u32,
        /// Width of the right image.
        right: u32,
    },

    /// Planes or images that must share dimensions do not.
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// `(width, height)` of the reference.
        expected: (u32, u32),
        /// `(width, height)` of the offending plane or image.
        actual: (u32, u32),
    },
}

impl EnhanceError {
    /// Shorthand for an [`EnhanceError::InvalidParameter`].
    pub(crate) fn invalid_parameter(
        field: &'static str,
        value: impl Into<f64>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            field,
            value: value.into(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_field_and_value() {
        let err = EnhanceError::invalid_parameter("gamma", -1.5_f32, "> 0");
        let msg = err.to_string();
        assert!(msg.contains("`gamma`"), "{msg}");
        assert!(msg.contains("-1.5"), "{msg}");
    }

    #[test]
    fn test_shape_error_converts_into_invalid_image() {
        let err: EnhanceError = ImageShapeError::UnsupportedChannels { channels: 4 }.into();
        assert!(matches!(
            err,
            EnhanceError::InvalidImage(ImageShapeError::UnsupportedChannels { channels: 4 })
        ));
    }
}
