/// The fixed colour palette offered next to the canvas

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A palette entry. The default brush colour is black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteColor {
    Red,
    Green,
    Blue,
    Yellow,
    #[default]
    Black,
    White,
    Orange,
}

impl PaletteColor {
    /// Palette entries in the order their buttons are laid out.
    pub const ALL: [PaletteColor; 7] = [
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Yellow,
        PaletteColor::Black,
        PaletteColor::White,
        PaletteColor::Orange,
    ];

    /// CSS colour name, also used as the button's `data-color` value.
    pub fn name(&self) -> &'static str {
        match self {
            PaletteColor::Red => "red",
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Black => "black",
            PaletteColor::White => "white",
            PaletteColor::Orange => "orange",
        }
    }

    /// Button caption: the name with its first letter capitalised.
    pub fn label(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Opaque RGBA value of the CSS named colour.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            PaletteColor::Red => [255, 0, 0, 255],
            PaletteColor::Green => [0, 128, 0, 255],
            PaletteColor::Blue => [0, 0, 255, 255],
            PaletteColor::Yellow => [255, 255, 0, 255],
            PaletteColor::Black => [0, 0, 0, 255],
            PaletteColor::White => [255, 255, 255, 255],
            PaletteColor::Orange => [255, 165, 0, 255],
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        PaletteColor::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownColor(s.to_string()))
    }
}
