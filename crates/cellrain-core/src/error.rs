//! Error types for the `cellrain-core` crate.
//!
//! Rule evaluation and colour lookup are total once their inputs are
//! validated, so every failure is either a bad input caught before the
//! canvas is touched, or a transport failure reported by the sink.

use crate::canvas::SinkError;

/// Errors raised by the automaton engine.
#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    /// An input was malformed: a pattern of the wrong width, an empty line,
    /// or a seed line that does not fit the canvas.
    #[error("validation error: {reason}")]
    Validation {
        /// What was wrong with the input.
        reason: String,
    },

    /// The stored line no longer matches the canvas width.
    #[error("line width {line_width} does not match canvas width {canvas_width}")]
    DimensionMismatch {
        /// Width of the current line.
        line_width: usize,
        /// Width of the canvas.
        canvas_width: usize,
    },

    /// The pixel sink rejected an access or failed to transmit a frame.
    #[error("sink error: {source}")]
    Sink {
        /// The underlying sink error, unaltered.
        #[from]
        source: SinkError,
    },
}

impl AutomatonError {
    /// Build a [`AutomatonError::Validation`] from anything printable.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
