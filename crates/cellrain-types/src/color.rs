//! Pixel colours.
//!
//! [`Rgb`] is a single display pixel. [`ColorSpec`] says how a cell state
//! becomes a pixel: either a fixed triple or a fresh random draw every time
//! the cell is rendered.
//!
//! In YAML a colour is written as a three-element list (`[1, 255, 1]`) and
//! the random marker as the bare string `random`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single 24-bit pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// All channels zero. Transparent on display layers above 0.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a pixel from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in wire order.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether every channel is zero.
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How a cell state is turned into a pixel.
///
/// A `Random` spec is resolved at every render call and never cached, so
/// neighbouring cells and consecutive frames get independent colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSpecRepr", into = "ColorSpecRepr")]
pub enum ColorSpec {
    /// Always the same pixel.
    Fixed(Rgb),
    /// A fresh uniform draw per cell, per render.
    Random,
}

impl ColorSpec {
    /// Shorthand for a fixed colour.
    pub const fn fixed(r: u8, g: u8, b: u8) -> Self {
        Self::Fixed(Rgb::new(r, g, b))
    }

    /// Whether this spec draws a new colour on every render.
    pub const fn is_random(self) -> bool {
        matches!(self, Self::Random)
    }
}

/// On-disk form of a [`ColorSpec`]: a keyword or an `[r, g, b]` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorSpecRepr {
    Keyword(String),
    Triple([u8; 3]),
}

impl TryFrom<ColorSpecRepr> for ColorSpec {
    type Error = String;

    fn try_from(repr: ColorSpecRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorSpecRepr::Triple(channels) => Ok(Self::Fixed(Rgb::from(channels))),
            ColorSpecRepr::Keyword(word) => match word.to_lowercase().as_str() {
                "random" | "rand" => Ok(Self::Random),
                other => Err(format!(
                    "unknown colour keyword `{other}` (expected `random` or [r, g, b])"
                )),
            },
        }
    }
}

impl From<ColorSpec> for ColorSpecRepr {
    fn from(spec: ColorSpec) -> Self {
        match spec {
            ColorSpec::Fixed(rgb) => Self::Triple(rgb.to_array()),
            ColorSpec::Random => Self::Keyword("random".to_owned()),
        }
    }
}
