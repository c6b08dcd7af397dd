//! Rule engine and scrolling-canvas renderer for the Cellrain display.
//!
//! A one-dimensional line of boolean cells is advanced by exact
//! neighbourhood matching, coloured, and written to the top row of a pixel
//! canvas while older rows scroll down. The canvas itself is an external
//! resource reached only through the [`PixelSink`] capability trait.
//!
//! # Modules
//!
//! - [`pattern`] -- [`Line`], [`PatternSet`], and the [`advance`] rule evaluator.
//! - [`color`] -- [`ColorMap`] turning cell states into pixels.
//! - [`canvas`] -- The [`PixelSink`] trait, [`PixelGrid`], and [`MemoryCanvas`].
//! - [`automaton`] -- [`AutomatonState`], which owns one line and one canvas.
//! - [`config`] -- Configuration loading from `cellrain-config.yaml`.
//! - [`runner`] -- The bounded frame loop.
//! - [`error`] -- [`AutomatonError`].
//!
//! [`Line`]: pattern::Line
//! [`PatternSet`]: pattern::PatternSet
//! [`advance`]: pattern::advance
//! [`ColorMap`]: color::ColorMap
//! [`PixelSink`]: canvas::PixelSink
//! [`PixelGrid`]: canvas::PixelGrid
//! [`MemoryCanvas`]: canvas::MemoryCanvas
//! [`AutomatonState`]: automaton::AutomatonState
//! [`AutomatonError`]: error::AutomatonError

pub mod automaton;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod pattern;
pub mod runner;

pub use automaton::AutomatonState;
pub use canvas::{MemoryCanvas, PixelGrid, PixelSink, SinkError};
pub use color::ColorMap;
pub use error::AutomatonError;
pub use pattern::{Line, PatternSet, advance};
