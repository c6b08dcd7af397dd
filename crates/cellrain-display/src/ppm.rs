//! Frame encoding.
//!
//! One frame is a binary PPM image:
//!
//! ```text
//! P6\n{width} {height}\n255\n<width * height * 3 bytes, row 0 first>
//! ```
//!
//! followed by a footer `\n{x}\n{y}\n{layer}\n` that places the image on
//! the display. The display treats black pixels on layers above 0 as
//! transparent.

use cellrain_core::PixelGrid;
use cellrain_core::config::MAX_LAYER;

use crate::error::DisplayError;

/// Largest UDP payload over IPv4.
pub const MAX_DATAGRAM: usize = 65_507;

/// Room left for the PPM header and offset footer.
const FRAMING_RESERVE: usize = 64;

/// Where a frame lands on the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    x: i32,
    y: i32,
    layer: u8,
}

impl Offset {
    /// Build an offset, checking the layer.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidLayer`] if `layer` exceeds 15.
    pub fn new(x: i32, y: i32, layer: u8) -> Result<Self, DisplayError> {
        if layer > MAX_LAYER {
            return Err(DisplayError::InvalidLayer {
                layer,
                max: MAX_LAYER,
            });
        }
        Ok(Self { x, y, layer })
    }

    /// Horizontal position of the left edge.
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position of the top edge.
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Layer, 0-15. 0 is the opaque background.
    pub const fn layer(&self) -> u8 {
        self.layer
    }
}

/// Check that a canvas fits one datagram.
///
/// # Errors
///
/// Returns [`DisplayError::InvalidDimensions`] for a zero-sized canvas or
/// one whose pixels exceed a single UDP payload.
pub fn check_dimensions(width: usize, height: usize) -> Result<(), DisplayError> {
    let invalid = |reason: &str| DisplayError::InvalidDimensions {
        width,
        height,
        reason: reason.to_owned(),
    };
    if width == 0 || height == 0 {
        return Err(invalid("canvas must be at least 1x1"));
    }
    let payload = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .and_then(|bytes| bytes.checked_add(FRAMING_RESERVE))
        .ok_or_else(|| invalid("pixel count overflows"))?;
    if payload > MAX_DATAGRAM {
        return Err(invalid("frame does not fit in one UDP datagram"));
    }
    Ok(())
}

/// Encode a grid as one display datagram.
pub fn encode_frame(grid: &PixelGrid, offset: Offset) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", grid.width(), grid.height());
    let footer = format!("\n{}\n{}\n{}\n", offset.x, offset.y, offset.layer);

    let capacity = grid
        .pixels()
        .len()
        .saturating_mul(3)
        .saturating_add(header.len())
        .saturating_add(footer.len());
    let mut frame = Vec::with_capacity(capacity);
    frame.extend_from_slice(header.as_bytes());
    for pixel in grid.pixels() {
        frame.extend_from_slice(&pixel.to_array());
    }
    frame.extend_from_slice(footer.as_bytes());
    frame
}
