//! Exact-neighbourhood rule evaluation.
//!
//! A rule is a set of 3-cell neighbourhoods. A cell is active in the next
//! line if and only if its (left, center, right) window is exactly equal to
//! at least one neighbourhood in the set. Anything unlisted yields an
//! inactive cell.
//!
//! The two cells beyond the ends of the line read as a fixed pad value.
//! Every output cell is computed from the same input snapshot, so the order
//! in which cells are visited never matters.

use std::fmt;

use cellrain_types::{Neighborhood, RulePreset};

use crate::error::AutomatonError;

/// Width of a neighbourhood window.
pub const NEIGHBORHOOD_WIDTH: usize = 3;

/// A non-empty row of boolean cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    cells: Vec<bool>,
}

impl Line {
    /// Wrap a vector of cells.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if `cells` is empty.
    pub fn new(cells: Vec<bool>) -> Result<Self, AutomatonError> {
        if cells.is_empty() {
            return Err(AutomatonError::validation("line must contain at least one cell"));
        }
        Ok(Self { cells })
    }

    /// A line with exactly one active cell at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if `width` is zero or `index`
    /// is not inside the line.
    pub fn single(width: usize, index: usize) -> Result<Self, AutomatonError> {
        let mut cells = vec![false; width];
        let cell = cells.get_mut(index).ok_or_else(|| {
            AutomatonError::validation(format!(
                "seed index {index} is outside a line of width {width}"
            ))
        })?;
        *cell = true;
        Self::new(cells)
    }

    /// A line with one active cell at `width / 2`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if `width` is zero.
    pub fn centered(width: usize) -> Result<Self, AutomatonError> {
        Self::single(width, width.checked_div(2).unwrap_or(0))
    }

    /// Number of cells.
    pub const fn width(&self) -> usize {
        self.cells.len()
    }

    /// The cells, left to right.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// The cell at `index`, or `None` past either end.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.cells.get(index).copied()
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// The next line under `patterns`.
    ///
    /// # Errors
    ///
    /// Propagates [`advance`]; a `Line` is never empty, so this does not
    /// fail in practice.
    pub fn advance(&self, patterns: &PatternSet, pad_value: bool) -> Result<Self, AutomatonError> {
        let cells = advance(&self.cells, patterns, pad_value)?;
        Ok(Self { cells })
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            f.write_str(if cell { "#" } else { "." })?;
        }
        Ok(())
    }
}

/// The neighbourhoods that produce an active cell.
///
/// Duplicates are allowed and harmless. An empty set is valid and maps every
/// line to all-inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Neighborhood>,
}

impl PatternSet {
    /// Build a set from loosely typed rows, as read from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if any row is not exactly
    /// three cells wide.
    pub fn new(rows: &[Vec<bool>]) -> Result<Self, AutomatonError> {
        let patterns = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                Neighborhood::try_from(row.as_slice()).map_err(|_err| {
                    AutomatonError::validation(format!(
                        "pattern {idx} has width {}, expected {NEIGHBORHOOD_WIDTH}",
                        row.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Build a set from already-shaped neighbourhoods.
    pub fn from_neighborhoods(patterns: impl IntoIterator<Item = Neighborhood>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// The neighbourhoods of a built-in rule.
    pub fn from_preset(preset: RulePreset) -> Self {
        Self::from_neighborhoods(preset.patterns().iter().copied())
    }

    /// Whether `window` exactly equals at least one pattern.
    pub fn matches(&self, window: Neighborhood) -> bool {
        self.patterns.contains(&window)
    }

    /// The neighbourhoods, in insertion order.
    pub fn patterns(&self) -> &[Neighborhood] {
        &self.patterns
    }

    /// Number of patterns, counting duplicates.
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no patterns.
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl From<RulePreset> for PatternSet {
    fn from(preset: RulePreset) -> Self {
        Self::from_preset(preset)
    }
}

/// Compute the next line from `line`.
///
/// Output cell `i` is active iff the window
/// `(line[i-1] or pad_value, line[i], line[i+1] or pad_value)` equals some
/// pattern in `patterns`.
///
/// # Errors
///
/// Returns [`AutomatonError::Validation`] if `line` is empty.
pub fn advance(
    line: &[bool],
    patterns: &PatternSet,
    pad_value: bool,
) -> Result<Vec<bool>, AutomatonError> {
    if line.is_empty() {
        return Err(AutomatonError::validation("cannot advance an empty line"));
    }

    let next = line
        .iter()
        .enumerate()
        .map(|(i, &center)| {
            let left = i
                .checked_sub(1)
                .and_then(|j| line.get(j))
                .copied()
                .unwrap_or(pad_value);
            let right = i
                .checked_add(1)
                .and_then(|j| line.get(j))
                .copied()
                .unwrap_or(pad_value);
            patterns.matches([left, center, right])
        })
        .collect();

    Ok(next)
}
