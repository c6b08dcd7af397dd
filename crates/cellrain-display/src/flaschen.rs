//! UDP pixel sink for a Flaschen-Taschen display.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use cellrain_core::{PixelGrid, PixelSink, SinkError};
use cellrain_types::Rgb;
use tracing::{info, trace, warn};

use crate::error::DisplayError;
use crate::ppm::{self, Offset};

/// A canvas whose frames are sent to a display over UDP.
///
/// Pixels are buffered locally. [`flush`](PixelSink::flush) sends the
/// entire buffer as one datagram and does not retry; a lost frame is
/// simply replaced by the next one.
#[derive(Debug)]
pub struct FlaschenCanvas {
    socket: UdpSocket,
    peer: SocketAddr,
    grid: PixelGrid,
    offset: Offset,
    frames_sent: u64,
}

impl FlaschenCanvas {
    /// Resolve `host` and open a socket to it.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidDimensions`] if the canvas cannot be
    /// sent in one datagram, [`DisplayError::Resolve`] or
    /// [`DisplayError::NoAddress`] if the host does not resolve, and
    /// [`DisplayError::Socket`] if the socket cannot be opened.
    pub fn connect(
        host: &str,
        port: u16,
        width: usize,
        height: usize,
    ) -> Result<Self, DisplayError> {
        ppm::check_dimensions(width, height)?;

        let peer = (host, port)
            .to_socket_addrs()
            .map_err(|source| DisplayError::Resolve {
                host: host.to_owned(),
                source,
            })?
            .next()
            .ok_or_else(|| DisplayError::NoAddress {
                host: host.to_owned(),
            })?;

        let local: SocketAddr = if peer.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(peer)?;

        info!(host, %peer, width, height, "display socket connected");

        Ok(Self {
            socket,
            peer,
            grid: PixelGrid::new(width, height),
            offset: Offset::default(),
            frames_sent: 0,
        })
    }

    /// Place frames at `offset` on the display.
    #[must_use]
    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Current placement.
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Resolved display address.
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// The local pixel buffer.
    pub const fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Datagrams sent so far.
    pub const fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// The datagram the next flush would send.
    pub fn encode(&self) -> Vec<u8> {
        ppm::encode_frame(&self.grid, self.offset)
    }
}

impl PixelSink for FlaschenCanvas {
    fn width(&self) -> usize {
        self.grid.width()
    }

    fn height(&self) -> usize {
        self.grid.height()
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn pixel(&self, row: usize, column: usize) -> Result<Rgb, SinkError> {
        self.grid.get(row, column)
    }

    fn set_pixel(&mut self, row: usize, column: usize, color: Rgb) -> Result<(), SinkError> {
        self.grid.set(row, column, color)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let frame = self.encode();
        let sent = self.socket.send(&frame)?;
        if sent != frame.len() {
            warn!(sent, expected = frame.len(), "display frame truncated");
        }
        self.frames_sent = self.frames_sent.saturating_add(1);
        trace!(frame = self.frames_sent, bytes = sent, "frame sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn oversized_canvas_rejected_before_connecting() {
        let result = FlaschenCanvas::connect("127.0.0.1", 1337, 400, 400);
        assert!(matches!(
            result,
            Err(DisplayError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn starts_blank_at_origin() {
        let canvas = FlaschenCanvas::connect("127.0.0.1", 1337, 4, 3).unwrap();
        assert!(canvas.grid().is_blank());
        assert_eq!(canvas.offset(), Offset::default());
        assert_eq!(canvas.frames_sent(), 0);
        assert!(canvas.peer().is_ipv4());
    }

    #[test]
    fn offset_appears_in_encoding() {
        let canvas = FlaschenCanvas::connect("127.0.0.1", 1337, 1, 1)
            .unwrap()
            .with_offset(Offset::new(2, 5, 11).unwrap());
        assert!(canvas.encode().ends_with(b"\n2\n5\n11\n"));
    }
}
