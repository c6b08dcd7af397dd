//! Named rule and colour configurations.
//!
//! The display tooling has always offered a small menu of rules and colour
//! schemes selected by name. They live here as enumerated tables so every
//! caller resolves a name the same way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;

/// A 3-cell neighbourhood: (left, center, right).
pub type Neighborhood = [bool; 3];

const TRIANGLE_PATTERNS: [Neighborhood; 2] = [[false, false, true], [true, false, false]];

const CHAOTIC_PATTERNS: [Neighborhood; 4] = [
    [true, false, false],
    [false, true, true],
    [false, true, false],
    [false, false, true],
];

/// Built-in rule sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePreset {
    /// Sierpinski-triangle fractal grown from a single seed bit.
    #[default]
    #[serde(alias = "sierp", alias = "sierpinski")]
    Triangle,
    /// The chaotic elementary rule (rule 30).
    #[serde(alias = "30", alias = "rule30")]
    Chaotic,
}

impl RulePreset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 2] = [Self::Triangle, Self::Chaotic];

    /// The neighbourhoods that produce an active cell under this rule.
    pub const fn patterns(self) -> &'static [Neighborhood] {
        match self {
            Self::Triangle => &TRIANGLE_PATTERNS,
            Self::Chaotic => &CHAOTIC_PATTERNS,
        }
    }

    /// Canonical name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Chaotic => "chaotic",
        }
    }
}

impl fmt::Display for RulePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RulePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "triangle" | "sierp" | "sierpinski" => Ok(Self::Triangle),
            "chaotic" | "30" | "rule30" => Ok(Self::Chaotic),
            other => Err(format!("unknown rule preset: {other}")),
        }
    }
}

/// Built-in colour schemes as (inactive, active) pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPreset {
    /// Green cells on a blue background. Easy to read while debugging.
    #[serde(alias = "debug")]
    HighContrast,
    /// Random-coloured cells on a near-black background.
    #[serde(alias = "randblack")]
    RandomOnDark,
    /// Near-black cells on a transparent background.
    ///
    /// The display treats pure black as transparent on upper layers, so
    /// active cells use `(1, 1, 1)` to stay visible.
    #[default]
    #[serde(alias = "blacktransp")]
    BlackOnTransparent,
}

impl ColorPreset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 3] = [Self::HighContrast, Self::RandomOnDark, Self::BlackOnTransparent];

    /// Colour for inactive cells.
    pub const fn inactive(self) -> ColorSpec {
        match self {
            Self::HighContrast => ColorSpec::fixed(80, 80, 160),
            Self::RandomOnDark => ColorSpec::fixed(1, 1, 1),
            Self::BlackOnTransparent => ColorSpec::fixed(0, 0, 0),
        }
    }

    /// Colour for active cells.
    pub const fn active(self) -> ColorSpec {
        match self {
            Self::HighContrast => ColorSpec::fixed(1, 255, 1),
            Self::RandomOnDark => ColorSpec::Random,
            Self::BlackOnTransparent => ColorSpec::fixed(1, 1, 1),
        }
    }

    /// Canonical name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HighContrast => "high_contrast",
            Self::RandomOnDark => "random_on_dark",
            Self::BlackOnTransparent => "black_on_transparent",
        }
    }
}

impl fmt::Display for ColorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high_contrast" | "debug" => Ok(Self::HighContrast),
            "random_on_dark" | "randblack" => Ok(Self::RandomOnDark),
            "black_on_transparent" | "blacktransp" => Ok(Self::BlackOnTransparent),
            other => Err(format!("unknown colour preset: {other}")),
        }
    }
}
