//! Error types for the `cellrain-display` crate.
//!
//! These cover setting the sink up. Once a canvas exists, per-frame
//! failures surface as [`cellrain_core::SinkError`] through the
//! `PixelSink` trait.

/// Errors raised while connecting to or configuring a display.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The display hostname could not be resolved.
    #[error("failed to resolve display host {host}: {source}")]
    Resolve {
        /// The hostname as given.
        host: String,
        /// The underlying resolver error.
        source: std::io::Error,
    },

    /// The hostname resolved to no addresses.
    #[error("display host {host} has no addresses")]
    NoAddress {
        /// The hostname as given.
        host: String,
    },

    /// The UDP socket could not be opened or connected.
    #[error("failed to open display socket: {source}")]
    Socket {
        /// The underlying socket error.
        #[from]
        source: std::io::Error,
    },

    /// The requested layer is outside 0-15.
    #[error("layer {layer} is outside 0-{max}")]
    InvalidLayer {
        /// The requested layer.
        layer: u8,
        /// The highest valid layer.
        max: u8,
    },

    /// The canvas is empty or too large for one datagram.
    #[error("cannot send a {width}x{height} canvas: {reason}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Why the size was rejected.
        reason: String,
    },
}
