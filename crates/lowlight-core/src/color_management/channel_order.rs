//! Explicit channel order handling.
//!
//! The pipeline works in RGB internally. Callers say which order their buffer
//! uses; the order is never guessed from pixel statistics.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;
use crate::image::Image;

/// Order of the three color channels in a caller's buffer.
///
/// Deserialization goes through [`FromStr`], so serialized parameters accept
/// the same case-insensitive spellings as the string API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ChannelOrder {
    /// Red, green, blue. Default.
    #[default]
    Rgb,
    /// Blue, green, red, as produced by OpenCV-style decoders.
    Bgr,
}

impl ChannelOrder {
    /// Lowercase label, matching the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Bgr => "bgr",
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChannelOrder {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "bgr" => Ok(Self::Bgr),
            _ => Err(EnhanceError::UnsupportedChannelOrder {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ChannelOrder {
    type Error = EnhanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Swap the first and third channel of every pixel.
pub fn swap_red_blue(image: &Image) -> Image {
    image.map_pixels(|[c0, c1, c2]| [c2, c1, c0])
}

/// View `image` in RGB order, copying only when it is stored as BGR.
pub fn to_rgb(image: &Image, order: ChannelOrder) -> Cow<'_, Image> {
    match order {
        ChannelOrder::Rgb => Cow::Borrowed(image),
        ChannelOrder::Bgr => Cow::Owned(swap_red_blue(image)),
    }
}

/// Convert an RGB image into the caller's `order`.
pub fn from_rgb(image: Image, order: ChannelOrder) -> Image {
    match order {
        ChannelOrder::Rgb => image,
        ChannelOrder::Bgr => swap_red_blue(&image),
    }
}
