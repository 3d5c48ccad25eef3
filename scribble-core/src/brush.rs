//! # Brushes
//!
//! Brush widths are chosen in density-independent units (dp) and turned into canvas pixels once,
//! when they are selected. Strokes only ever see the final pixel [`Thickness`].

use crate::util::{FiniteF32, FiniteF32Error};

/// Preset brush sizes offered by the brush picker.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum BrushSize {
    Small,
    #[default]
    Medium,
    Large,
}
impl BrushSize {
    /// Width of this preset in density-independent pixels.
    #[must_use]
    pub const fn dp(self) -> f32 {
        match self {
            Self::Small => 10.0,
            Self::Medium => 20.0,
            Self::Large => 30.0,
        }
    }
    /// Pixel thickness of this preset on a display of the given density.
    #[must_use]
    pub fn thickness(self, density: Density) -> Thickness {
        // Unwrap OK - presets are at most 30dp and density is at most `Density::MAX`, so the
        // product is finite and positive.
        Thickness::from_dp(self.dp(), density).unwrap()
    }
}

/// Display density, in pixels per dp. `1.0` is a baseline ~160dpi screen, and no real display
/// goes past [`Density::MAX`].
#[derive(Copy, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Density(f32);
impl Density {
    pub const BASELINE: Self = Self(1.0);
    pub const MAX: Self = Self(16.0);
    pub fn new(pixels_per_dp: f32) -> Result<Self, ThicknessError> {
        if !pixels_per_dp.is_finite() {
            Err(ThicknessError::NotFinite(FiniteF32Error::NotFinite))
        } else if pixels_per_dp <= 0.0 {
            Err(ThicknessError::NotPositive)
        } else if pixels_per_dp > Self::MAX.0 {
            Err(ThicknessError::TooLarge(Self::MAX.0))
        } else {
            Ok(Self(pixels_per_dp))
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}
impl Default for Density {
    fn default() -> Self {
        Self::BASELINE
    }
}
impl TryFrom<f32> for Density {
    type Error = ThicknessError;
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<Density> for f32 {
    fn from(value: Density) -> Self {
        value.0
    }
}

/// Stroke width in canvas pixels. Always finite and strictly positive.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Thickness(FiniteF32);
impl Thickness {
    /// Thinnest width that still paints something visible.
    pub const HAIRLINE: Self = Self(FiniteF32::ONE);
    pub fn new(pixels: f32) -> Result<Self, ThicknessError> {
        let pixels = FiniteF32::new(pixels)?;
        if pixels.get() > 0.0 {
            Ok(Self(pixels))
        } else {
            Err(ThicknessError::NotPositive)
        }
    }
    pub fn from_dp(dp: f32, density: Density) -> Result<Self, ThicknessError> {
        Self::new(dp * density.get())
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0.get()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ThicknessError {
    #[error(transparent)]
    NotFinite(#[from] FiniteF32Error),
    #[error("value must be greater than zero")]
    NotPositive,
    #[error("value must be at most {0}")]
    TooLarge(f32),
}
