//! Bounded frame loop.
//!
//! [`run`] drives an [`AutomatonState`] frame by frame:
//!
//! ```text
//! frame 0:  render -> send -> sleep           (the seed line)
//! frame n:  step -> render -> send -> sleep
//! ```
//!
//! The loop stops when the wall-clock limit has passed (checked before each
//! frame) or when `max_frames` frames have been sent. Both limits are
//! optional; with neither set the loop runs until an error occurs. Errors
//! from the automaton or the sink abort the loop unchanged.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::automaton::AutomatonState;
use crate::canvas::PixelSink;
use crate::error::AutomatonError;

/// Limits and cadence for [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBounds {
    /// Stop once this much wall-clock time has elapsed.
    pub max_duration: Option<Duration>,

    /// Stop after this many frames (0 = unlimited).
    pub max_frames: u64,

    /// Sleep after each frame.
    pub frame_delay: Duration,
}

impl RunBounds {
    /// Exactly `frames` frames with no delay. Handy for tests and previews.
    pub const fn frames(frames: u64) -> Self {
        Self {
            max_duration: None,
            max_frames: frames,
            frame_delay: Duration::ZERO,
        }
    }

    const fn frame_limit_reached(&self, frames: u64) -> bool {
        self.max_frames > 0 && frames >= self.max_frames
    }

    fn time_limit_reached(&self, elapsed: Duration) -> bool {
        self.max_duration.is_some_and(|limit| elapsed >= limit)
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// The wall-clock limit passed.
    MaxDurationReached,
    /// The frame limit was reached.
    MaxFramesReached,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames sent to the sink.
    pub frames: u64,
    /// Automaton generation when the loop stopped.
    pub generation: u64,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
    /// Why the loop stopped.
    pub end_reason: RunEndReason,
}

/// Run the frame loop until a bound is reached.
///
/// # Errors
///
/// Returns the first [`AutomatonError`] raised by `step`, `render`, or
/// `send`.
pub fn run<S: PixelSink>(
    state: &mut AutomatonState<S>,
    bounds: &RunBounds,
) -> Result<RunSummary, AutomatonError> {
    let started = Instant::now();
    let mut frames: u64 = 0;

    info!(
        max_duration_secs = bounds.max_duration.map(|d| d.as_secs_f64()),
        max_frames = bounds.max_frames,
        frame_delay_ms = u64::try_from(bounds.frame_delay.as_millis()).unwrap_or(u64::MAX),
        "frame loop starting"
    );

    let end_reason = loop {
        if bounds.time_limit_reached(started.elapsed()) {
            break RunEndReason::MaxDurationReached;
        }
        if bounds.frame_limit_reached(frames) {
            break RunEndReason::MaxFramesReached;
        }

        if frames > 0 {
            state.step()?;
        }
        state.render()?;
        state.send()?;
        frames = frames.saturating_add(1);

        debug!(
            frame = frames,
            generation = state.generation(),
            active_cells = state.line().active_count(),
            "frame sent"
        );

        if !bounds.frame_delay.is_zero() {
            std::thread::sleep(bounds.frame_delay);
        }
    };

    let summary = RunSummary {
        frames,
        generation: state.generation(),
        elapsed: started.elapsed(),
        end_reason,
    };
    info!(
        reason = ?summary.end_reason,
        frames = summary.frames,
        generation = summary.generation,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "frame loop ended"
    );
    Ok(summary)
}

/// Blank the display.
///
/// The blank frame is sent twice because the transport may drop a
/// datagram.
///
/// # Errors
///
/// Returns [`AutomatonError::Sink`] if either send fails.
pub fn clear_display<S: PixelSink>(state: &mut AutomatonState<S>) -> Result<(), AutomatonError> {
    state.clear();
    state.send()?;
    state.send()?;
    debug!("display cleared");
    Ok(())
}
