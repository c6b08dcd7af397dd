//! Shared type definitions for the Cellrain automaton display.
//!
//! These are the plain value types that flow between the engine, the
//! configuration file, and the display sink.
//!
//! # Modules
//!
//! - [`color`] -- RGB pixels and the fixed/random colour selector
//! - [`presets`] -- Named rule and colour configurations

pub mod color;
pub mod presets;

pub use color::{ColorSpec, Rgb};
pub use presets::{ColorPreset, Neighborhood, RulePreset};
