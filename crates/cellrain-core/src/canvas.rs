//! The pixel sink capability and in-memory canvases.
//!
//! The engine never reaches into a display's storage. It reads and writes
//! pixels by `(row, column)` through [`PixelSink`] and asks the sink to
//! [`flush`](PixelSink::flush) when a frame is complete. Row 0 is the most
//! recent frame; the last row is the oldest.

use cellrain_types::Rgb;

/// Errors reported by a pixel sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A pixel address fell outside the canvas.
    #[error("pixel ({row}, {column}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        column: usize,
        /// Canvas width.
        width: usize,
        /// Canvas height.
        height: usize,
    },

    /// The frame could not be transmitted to the display.
    #[error("transport error: {source}")]
    Transport {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// A 2D pixel buffer that can be pushed to a display.
pub trait PixelSink {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Set every pixel to black.
    fn clear(&mut self);

    /// Read the pixel at `(row, column)`.
    fn pixel(&self, row: usize, column: usize) -> Result<Rgb, SinkError>;

    /// Write the pixel at `(row, column)`.
    fn set_pixel(&mut self, row: usize, column: usize, color: Rgb) -> Result<(), SinkError>;

    /// Transmit the current buffer to the display.
    ///
    /// Blocking. Implementations neither retry nor queue on failure.
    fn flush(&mut self) -> Result<(), SinkError>;
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn pixel(&self, row: usize, column: usize) -> Result<Rgb, SinkError> {
        (**self).pixel(row, column)
    }

    fn set_pixel(&mut self, row: usize, column: usize, color: Rgb) -> Result<(), SinkError> {
        (**self).set_pixel(row, column, color)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Row-major pixel storage with bounds-checked addressing.
///
/// Display sinks embed one of these and add their own transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Create an all-black grid.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width.saturating_mul(height);
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; len],
        }
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All pixels, row 0 first.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// One row of pixels, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Rgb]> {
        self.pixels.chunks_exact(self.width.max(1)).nth(row)
    }

    /// Whether every pixel is black.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|px| px.is_black())
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    /// Read the pixel at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> Result<Rgb, SinkError> {
        let idx = self.index(row, column)?;
        self.pixels
            .get(idx)
            .copied()
            .ok_or_else(|| self.out_of_bounds(row, column))
    }

    /// Write the pixel at `(row, column)`.
    pub fn set(&mut self, row: usize, column: usize, color: Rgb) -> Result<(), SinkError> {
        let idx = self.index(row, column)?;
        let oob = self.out_of_bounds(row, column);
        let slot = self.pixels.get_mut(idx).ok_or(oob)?;
        *slot = color;
        Ok(())
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, SinkError> {
        if row >= self.height || column >= self.width {
            return Err(self.out_of_bounds(row, column));
        }
        row.checked_mul(self.width)
            .and_then(|base| base.checked_add(column))
            .ok_or_else(|| self.out_of_bounds(row, column))
    }

    const fn out_of_bounds(&self, row: usize, column: usize) -> SinkError {
        SinkError::OutOfBounds {
            row,
            column,
            width: self.width,
            height: self.height,
        }
    }
}

/// A sink that keeps frames in memory.
///
/// Used for headless runs and tests. Each flush copies the buffer into
/// [`last_frame`](Self::last_frame) and bumps the flush counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCanvas {
    grid: PixelGrid,
    last_frame: Option<PixelGrid>,
    flushes: u64,
}

impl MemoryCanvas {
    /// Create an all-black canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: PixelGrid::new(width, height),
            last_frame: None,
            flushes: 0,
        }
    }

    /// The live buffer.
    pub const fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// The buffer as it was at the most recent flush.
    pub const fn last_frame(&self) -> Option<&PixelGrid> {
        self.last_frame.as_ref()
    }

    /// How many times the canvas has been flushed.
    pub const fn flushes(&self) -> u64 {
        self.flushes
    }
}

impl PixelSink for MemoryCanvas {
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
        self.last_frame = Some(self.grid.clone());
        self.flushes = self.flushes.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_blank() {
        let grid = PixelGrid::new(4, 3);
        assert_eq!(grid.pixels().len(), 12);
        assert!(grid.is_blank());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = PixelGrid::new(4, 3);
        grid.set(2, 3, Rgb::new(9, 8, 7)).unwrap();
        assert_eq!(grid.get(2, 3).unwrap(), Rgb::new(9, 8, 7));
        assert_eq!(grid.get(0, 0).unwrap(), Rgb::BLACK);
        // row-major: last pixel of the last row
        assert_eq!(grid.pixels().last().copied(), Some(Rgb::new(9, 8, 7)));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = PixelGrid::new(4, 3);
        assert!(matches!(
            grid.get(3, 0),
            Err(SinkError::OutOfBounds { row: 3, .. })
        ));
        assert!(grid.set(0, 4, Rgb::BLACK).is_err());
    }

    #[test]
    fn rows_are_width_long() {
        let mut grid = PixelGrid::new(3, 2);
        grid.set(1, 0, Rgb::new(1, 1, 1)).unwrap();
        assert_eq!(grid.row(0).unwrap(), &[Rgb::BLACK; 3]);
        assert_eq!(grid.row(1).unwrap().first().copied(), Some(Rgb::new(1, 1, 1)));
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn clear_blanks_every_pixel() {
        let mut canvas = MemoryCanvas::new(2, 2);
        canvas.set_pixel(1, 1, Rgb::new(5, 5, 5)).unwrap();
        assert!(!canvas.grid().is_blank());
        canvas.clear();
        assert!(canvas.grid().is_blank());
    }

    #[test]
    fn flush_snapshots_buffer() {
        let mut canvas = MemoryCanvas::new(2, 2);
        assert!(canvas.last_frame().is_none());
        canvas.set_pixel(0, 0, Rgb::new(3, 3, 3)).unwrap();
        canvas.flush().unwrap();
        canvas.set_pixel(0, 0, Rgb::new(4, 4, 4)).unwrap();

        assert_eq!(canvas.flushes(), 1);
        assert_eq!(
            canvas.last_frame().unwrap().get(0, 0).unwrap(),
            Rgb::new(3, 3, 3)
        );
    }

    #[test]
    fn mutable_reference_is_a_sink() {
        fn paint<S: PixelSink>(mut sink: S) {
            sink.set_pixel(0, 1, Rgb::new(2, 2, 2)).unwrap();
            sink.flush().unwrap();
        }

        let mut canvas = MemoryCanvas::new(2, 2);
        paint(&mut canvas);
        assert_eq!(canvas.flushes(), 1);
        assert_eq!(canvas.pixel(0, 1).unwrap(), Rgb::new(2, 2, 2));
    }
}
