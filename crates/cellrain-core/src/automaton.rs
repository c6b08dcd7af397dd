//! The automaton: one line, one rule, one scrolling canvas.
//!
//! [`AutomatonState`] exposes three operations that a caller sequences per
//! frame:
//!
//! - [`step`](AutomatonState::step) replaces the line with its successor.
//!   The canvas is not touched.
//! - [`render`](AutomatonState::render) colours the current line, scrolls
//!   the canvas down one row (dropping the oldest), and writes the new row
//!   at the top.
//! - [`send`](AutomatonState::send) flushes the canvas to its sink.
//!
//! All validation happens before the canvas is mutated, so a rejected call
//! leaves the canvas exactly as it was.

use cellrain_types::Rgb;
use tracing::{debug, trace};

use crate::canvas::PixelSink;
use crate::color::ColorMap;
use crate::error::AutomatonError;
use crate::pattern::{Line, PatternSet};

/// Engine state for a running automaton.
#[derive(Debug)]
pub struct AutomatonState<S: PixelSink> {
    /// Current line. Replaced wholesale by each step.
    line: Line,

    /// Neighbourhoods that produce an active cell.
    patterns: PatternSet,

    /// Value read for the virtual cells beyond both ends of the line.
    pad_value: bool,

    /// Colours for active and inactive cells.
    colors: ColorMap,

    /// The display canvas, exclusively owned for the life of the automaton.
    canvas: S,

    /// Number of steps taken since construction.
    generation: u64,
}

impl<S: PixelSink> AutomatonState<S> {
    /// Create an automaton and zero its canvas.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Validation`] if the canvas has no rows or
    /// columns, or if `seed` is not exactly as wide as the canvas. The
    /// canvas is left untouched on error.
    pub fn new(
        seed: Line,
        patterns: PatternSet,
        colors: ColorMap,
        mut canvas: S,
    ) -> Result<Self, AutomatonError> {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return Err(AutomatonError::validation(format!(
                "canvas must have at least one row and column, got {width}x{height}"
            )));
        }
        if seed.width() != width {
            return Err(AutomatonError::validation(format!(
                "seed line width {} does not match canvas width {width}",
                seed.width()
            )));
        }

        canvas.clear();
        debug!(
            width,
            height,
            patterns = patterns.len(),
            active_cells = seed.active_count(),
            "automaton created"
        );

        Ok(Self {
            line: seed,
            patterns,
            pad_value: false,
            colors,
            canvas,
            generation: 0,
        })
    }

    /// Set the boundary pad value (default `false`).
    #[must_use]
    pub const fn with_pad_value(mut self, pad_value: bool) -> Self {
        self.pad_value = pad_value;
        self
    }

    /// Advance the line by one generation.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::DimensionMismatch`] if the line was
    /// replaced with one that does not fit the canvas.
    pub fn step(&mut self) -> Result<(), AutomatonError> {
        self.check_dimensions()?;
        self.line = self.line.advance(&self.patterns, self.pad_value)?;
        self.generation = self.generation.saturating_add(1);
        trace!(
            generation = self.generation,
            active_cells = self.line.active_count(),
            "stepped"
        );
        Ok(())
    }

    /// Scroll the canvas down one row and draw the current line at the top.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::DimensionMismatch`] if the line does not
    /// fit the canvas, or [`AutomatonError::Sink`] if the sink rejects a
    /// pixel access.
    pub fn render(&mut self) -> Result<(), AutomatonError> {
        self.check_dimensions()?;
        let row: Vec<Rgb> = self.colors.resolve_line(&self.line);
        self.scroll_down()?;
        for (column, color) in row.into_iter().enumerate() {
            self.canvas.set_pixel(0, column, color)?;
        }
        Ok(())
    }

    /// Hand the canvas to the sink for transport.
    ///
    /// # Errors
    ///
    /// Returns [`AutomatonError::Sink`] carrying the sink's own error.
    pub fn send(&mut self) -> Result<(), AutomatonError> {
        self.canvas.flush()?;
        Ok(())
    }

    /// Zero the canvas. The line is unchanged.
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Store a caller-built line.
    ///
    /// The width is checked by the next [`step`](Self::step) or
    /// [`render`](Self::render), which fail with
    /// [`AutomatonError::DimensionMismatch`] if it does not fit.
    pub fn replace_line(&mut self, line: Line) {
        self.line = line;
    }

    /// The current line.
    pub const fn line(&self) -> &Line {
        &self.line
    }

    /// The rule.
    pub const fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The boundary pad value.
    pub const fn pad_value(&self) -> bool {
        self.pad_value
    }

    /// The colour map.
    pub const fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// The canvas.
    pub const fn canvas(&self) -> &S {
        &self.canvas
    }

    /// Steps taken since construction.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Give the canvas back.
    pub fn into_canvas(self) -> S {
        self.canvas
    }

    fn check_dimensions(&self) -> Result<(), AutomatonError> {
        let canvas_width = self.canvas.width();
        if self.line.width() == canvas_width {
            Ok(())
        } else {
            Err(AutomatonError::DimensionMismatch {
                line_width: self.line.width(),
                canvas_width,
            })
        }
    }

    /// Copy every row into the row below it, bottom first. The old last
    /// row is overwritten and row 0 keeps its stale contents.
    fn scroll_down(&mut self) -> Result<(), AutomatonError> {
        let width = self.canvas.width();
        let height = self.canvas.height();
        for src in (0..height.saturating_sub(1)).rev() {
            let dst = src.saturating_add(1);
            for column in 0..width {
                let color = self.canvas.pixel(src, column)?;
                self.canvas.set_pixel(dst, column, color)?;
            }
        }
        Ok(())
    }
}
