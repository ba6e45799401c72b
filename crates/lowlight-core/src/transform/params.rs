//! Enhancement parameters, validation, and named presets.
//!
//! `EnhancementParameters` is the single value that configures one pipeline
//! run. It is `Copy`, never mutated by the pipeline, and deserializes with
//! per-field defaults so a partial document (JSON body, form fields) fills in
//! the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color_management::ChannelOrder;
use crate::error::{EnhanceError, Result};

/// Number of tile rows and columns CLAHE splits the lightness plane into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    /// Tiles stacked vertically.
    pub rows: u32,
    /// Tiles side by side horizontally.
    pub cols: u32,
}

impl TileGrid {
    /// A `rows × cols` grid.
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// A 1×1 grid: CLAHE degenerates to clipped global equalization.
    pub const fn single() -> Self {
        Self::new(1, 1)
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Every knob of one enhancement run.
///
/// | field | default | legal range |
/// |-------|---------|-------------|
/// | `clip_limit` | 2.0 | finite, > 0 |
/// | `tile_grid` | 8×8 | both ≥ 1 |
/// | `gamma` | 1.2 | finite, > 0 |
/// | `brightness_boost` | 1.1 | finite, > 0 |
/// | `saturation_boost` | 1.1 | finite, ≥ 0 |
/// | `channel_order` | RGB | RGB or BGR |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementParameters {
    /// CLAHE clip limit, as a multiple of the mean histogram bin height.
    pub clip_limit: f32,
    /// CLAHE tile grid.
    pub tile_grid: TileGrid,
    /// Gamma exponent; > 1 brightens midtones.
    pub gamma: f32,
    /// Linear gain on lightness after gamma correction.
    pub brightness_boost: f32,
    /// Gain on HSV saturation, applied last.
    pub saturation_boost: f32,
    /// Channel order of the caller's buffers.
    pub channel_order: ChannelOrder,
}

impl Default for EnhancementParameters {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: TileGrid::default(),
            gamma: 1.2,
            brightness_boost: 1.1,
            saturation_boost: 1.1,
            channel_order: ChannelOrder::Rgb,
        }
    }
}

impl EnhancementParameters {
    /// Check every field against its legal range.
    pub fn validate(&self) -> Result<()> {
        require_positive("clip_limit", self.clip_limit)?;
        if self.tile_grid.rows == 0 {
            return Err(EnhanceError::invalid_parameter(
                "tile_grid.rows",
                self.tile_grid.rows,
                ">= 1",
            ));
        }
        if self.tile_grid.cols == 0 {
            return Err(EnhanceError::invalid_parameter(
                "tile_grid.cols",
                self.tile_grid.cols,
                ">= 1",
            ));
        }
        require_positive("gamma", self.gamma)?;
        require_positive("brightness_boost", self.brightness_boost)?;
        if !(self.saturation_boost >= 0.0 && self.saturation_boost.is_finite()) {
            return Err(EnhanceError::invalid_parameter(
                "saturation_boost",
                self.saturation_boost,
                "a finite value >= 0",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// The result is validated, so a parsed value is always usable. An
    /// unrecognized `channel_order` string is reported as
    /// [`EnhanceError::UnsupportedChannelOrder`].
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(json)?;
        if let Some(order) = doc.get("channel_order").and_then(serde_json::Value::as_str) {
            order.parse::<ChannelOrder>()?;
        }
        let params: Self = serde_json::from_value(doc)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with a different clip limit.
    pub fn with_clip_limit(self, clip_limit: f32) -> Self {
        Self { clip_limit, ..self }
    }

    /// Copy with a different tile grid.
    pub fn with_tile_grid(self, rows: u32, cols: u32) -> Self {
        Self {
            tile_grid: TileGrid::new(rows, cols),
            ..self
        }
    }

    /// Copy with a different gamma.
    pub fn with_gamma(self, gamma: f32) -> Self {
        Self { gamma, ..self }
    }

    /// Copy with a different brightness boost.
    pub fn with_brightness_boost(self, brightness_boost: f32) -> Self {
        Self {
            brightness_boost,
            ..self
        }
    }

    /// Copy with a different saturation boost.
    pub fn with_saturation_boost(self, saturation_boost: f32) -> Self {
        Self {
            saturation_boost,
            ..self
        }
    }

    /// Copy with a different channel order.
    pub fn with_channel_order(self, channel_order: ChannelOrder) -> Self {
        Self {
            channel_order,
            ..self
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EnhanceError::invalid_parameter(
            field,
            value,
            "a finite value > 0",
        ))
    }
}

/// Named strength levels for common low-light situations.
///
/// Each preset sets the clip limit, gamma and brightness boost; tile grid,
/// saturation boost and channel order come from the base parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Slightly dark images. Also accepted as `subtle`.
    #[serde(alias = "subtle")]
    Light,
    /// The defaults.
    Medium,
    /// Noticeably underexposed images.
    Strong,
    /// Very dark images.
    Ultra,
    /// Night photography.
    Night,
    /// Indoor low-light shots.
    Indoor,
}

impl Preset {
    /// Lowercase name used when parsing and serializing.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::Ultra => "ultra",
            Self::Night => "night",
            Self::Indoor => "indoor",
        }
    }

    /// Presets ordered from gentlest to strongest progressive level.
    pub fn levels() -> &'static [Self] {
        const LEVELS: [Preset; 4] = [Preset::Light, Preset::Medium, Preset::Strong, Preset::Ultra];
        &LEVELS
    }

    /// Every preset.
    pub fn all() -> &'static [Self] {
        const ALL: [Preset; 6] = [
            Preset::Light,
            Preset::Medium,
            Preset::Strong,
            Preset::Ultra,
            Preset::Night,
            Preset::Indoor,
        ];
        &ALL
    }

    /// `(clip_limit, gamma, brightness_boost)`.
    pub const fn strengths(&self) -> (f32, f32, f32) {
        match self {
            Self::Light => (1.5, 1.1, 1.05),
            Self::Medium => (2.0, 1.2, 1.1),
            Self::Strong => (2.5, 1.4, 1.2),
            Self::Ultra => (3.5, 1.8, 1.3),
            Self::Night => (3.0, 1.6, 1.25),
            Self::Indoor => (2.2, 1.3, 1.15),
        }
    }

    /// Overlay this preset's strengths on `base`.
    pub fn apply_to(&self, base: EnhancementParameters) -> EnhancementParameters {
        let (clip_limit, gamma, brightness_boost) = self.strengths();
        EnhancementParameters {
            clip_limit,
            gamma,
            brightness_boost,
            ..base
        }
    }

    /// This preset on top of the default parameters.
    pub fn params(&self) -> EnhancementParameters {
        self.apply_to(EnhancementParameters::default())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset `{0}`")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "subtle" {
            return Ok(Self::Light);
        }
        Self::all()
            .iter()
            .copied()
            .find(|p| p.label() == name)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
