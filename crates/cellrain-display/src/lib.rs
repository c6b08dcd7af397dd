//! Flaschen-Taschen display sink for the Cellrain automaton.
//!
//! The display accepts one UDP datagram per frame: a binary PPM image
//! followed by a footer giving the image's position and layer on the
//! wall. [`FlaschenCanvas`] keeps the pixels locally and sends the whole
//! frame on every flush.
//!
//! # Modules
//!
//! - [`error`] -- [`DisplayError`] for connection and setup failures.
//! - [`ppm`] -- Frame encoding and the [`Offset`] footer.
//! - [`flaschen`] -- The [`FlaschenCanvas`] sink.

pub mod error;
pub mod flaschen;
pub mod ppm;

pub use error::DisplayError;
pub use flaschen::FlaschenCanvas;
pub use ppm::{Offset, encode_frame};
