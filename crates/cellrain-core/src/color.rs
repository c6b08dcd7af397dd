//! Cell-state to pixel resolution.
//!
//! Fixed specs resolve to the same pixel every time. Random specs draw each
//! channel uniformly from `0..=max_intensity` on every call; nothing is
//! cached between cells or between frames.
//!
//! The default ceiling is 254. Some displays reserve full intensity as a
//! transport marker, so the ceiling stays configurable.

use std::fmt;

use cellrain_types::{ColorPreset, ColorSpec, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pattern::Line;

/// Highest channel value drawn for random colours unless configured.
pub const DEFAULT_MAX_INTENSITY: u8 = 254;

/// Resolve one cell to a pixel.
///
/// `active` applies when `cell` is true, `inactive` otherwise.
pub fn resolve<R: Rng + ?Sized>(
    cell: bool,
    active: ColorSpec,
    inactive: ColorSpec,
    max_intensity: u8,
    rng: &mut R,
) -> Rgb {
    let spec = if cell { active } else { inactive };
    match spec {
        ColorSpec::Fixed(rgb) => rgb,
        ColorSpec::Random => random_color(max_intensity, rng),
    }
}

/// Draw a pixel with each channel independently uniform over `0..=max_intensity`.
pub fn random_color<R: Rng + ?Sized>(max_intensity: u8, rng: &mut R) -> Rgb {
    Rgb::new(
        rng.random_range(0..=max_intensity),
        rng.random_range(0..=max_intensity),
        rng.random_range(0..=max_intensity),
    )
}

/// The colour pair for one automaton, plus the generator for random specs.
pub struct ColorMap {
    active: ColorSpec,
    inactive: ColorSpec,
    max_intensity: u8,
    rng: StdRng,
}

impl ColorMap {
    /// Create a map from explicit specs, seeded from the operating system.
    pub fn new(active: ColorSpec, inactive: ColorSpec) -> Self {
        Self {
            active,
            inactive,
            max_intensity: DEFAULT_MAX_INTENSITY,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a map from a built-in scheme.
    pub fn from_preset(preset: ColorPreset) -> Self {
        Self::new(preset.active(), preset.inactive())
    }

    /// Replace the random generator with a deterministic one.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the highest channel value for random draws.
    #[must_use]
    pub const fn with_max_intensity(mut self, max_intensity: u8) -> Self {
        self.max_intensity = max_intensity;
        self
    }

    /// Spec used for active cells.
    pub const fn active(&self) -> ColorSpec {
        self.active
    }

    /// Spec used for inactive cells.
    pub const fn inactive(&self) -> ColorSpec {
        self.inactive
    }

    /// Ceiling for random channel values.
    pub const fn max_intensity(&self) -> u8 {
        self.max_intensity
    }

    /// Resolve one cell.
    pub fn resolve(&mut self, cell: bool) -> Rgb {
        resolve(
            cell,
            self.active,
            self.inactive,
            self.max_intensity,
            &mut self.rng,
        )
    }

    /// Resolve every cell of a line, left to right.
    pub fn resolve_line(&mut self, line: &Line) -> Vec<Rgb> {
        line.cells().iter().map(|&cell| self.resolve(cell)).collect()
    }
}

impl fmt::Debug for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorMap")
            .field("active", &self.active)
            .field("inactive", &self.inactive)
            .field("max_intensity", &self.max_intensity)
            .finish_non_exhaustive()
    }
}
