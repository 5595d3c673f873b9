/// Brush settings: the colour and width applied to new segments

use super::palette::PaletteColor;
use crate::{Error, Result};

/// Stroke width in logical pixels, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrushWidth(u32);

impl BrushWidth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: u32 = 5;

    /// Build a width, clamping into the slider's bounds.
    pub fn new(value: u32) -> Self {
        BrushWidth(value.clamp(Self::MIN, Self::MAX))
    }

    /// Coerce the slider's raw text value.
    ///
    /// Numbers are rounded to the nearest integer and clamped to `[1, 20]`;
    /// text that is not a finite number is rejected.
    pub fn parse_input(raw: &str) -> Result<Self> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidBrushSize(raw.to_string()))?;
        if !value.is_finite() {
            return Err(Error::InvalidBrushSize(raw.to_string()));
        }
        let clamped = value.round().clamp(Self::MIN as f64, Self::MAX as f64);
        Ok(BrushWidth(clamped as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for BrushWidth {
    fn default() -> Self {
        BrushWidth(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrushSettings {
    pub color: PaletteColor,
    pub width: BrushWidth,
}
