//! # Game Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. TICK    Session::tick with this frame's input            │
//! │ 2. VIEW    collect the sprites around the camera            │
//! │ 3. RECORD  frame timing, slow frames logged at warn         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop does not sleep; pacing to the display is the caller's job.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::SessionResult;
use crate::input::FrameInput;
use crate::session::{Session, TickSummary};
use crate::view::{SpriteInstance, ViewQuery};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Frame time above which a frame is logged as slow.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(33);

/// Timing and outcome of one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Simulation tick time in microseconds.
    pub tick_us: u64,
    /// View query time in microseconds.
    pub view_us: u64,
    /// Sprites produced by the view query.
    pub sprites: usize,
    /// What the tick did.
    pub summary: TickSummary,
}

/// Drives a [`Session`] one frame at a time.
pub struct GameLoop {
    session: Session,
    sprites: Vec<SpriteInstance>,
    frame_count: u64,
    stats: FrameStatsAccumulator,
}

impl GameLoop {
    /// Creates a loop around a session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            sprites: Vec::new(),
            frame_count: 0,
            stats: FrameStatsAccumulator::new(),
        }
    }

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// Propagates fatal session errors. The loop must not be run again
    /// afterwards.
    pub fn run_frame(&mut self, input: &FrameInput) -> SessionResult<FrameStats> {
        let start = Instant::now();
        let summary = self.session.tick(input)?;
        let ticked = Instant::now();

        self.sprites = ViewQuery::around(self.session.world(), self.session.camera());
        let viewed = Instant::now();

        let stats = FrameStats {
            frame: self.frame_count,
            total_us: micros(viewed - start),
            tick_us: micros(ticked - start),
            view_us: micros(viewed - ticked),
            sprites: self.sprites.len(),
            summary,
        };
        self.end_frame(stats);
        Ok(stats)
    }

    fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats.record(stats);

        if stats.total_us > micros(MAX_FRAME_TIME) {
            warn!(
                frame = stats.frame,
                total_us = stats.total_us,
                tick_us = stats.tick_us,
                view_us = stats.view_us,
                "frame exceeded budget"
            );
        }
    }

    /// Returns the session.
    #[inline]
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Sprites from the last frame's view query.
    #[inline]
    #[must_use]
    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprites
    }

    /// Returns the number of frames run.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }
}

#[allow(clippy::cast_possible_truncation)]
fn micros(duration: Duration) -> u64 {
    duration.as_micros() as u64
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of tick times.
    pub tick_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded the target frame time.
    pub frames_over_budget: u64,
    /// Accepted moves across all frames.
    pub moves_accepted: u64,
    /// Rejected moves across all frames.
    pub moves_rejected: u64,
    /// Floor changes across all frames.
    pub floor_changes: u64,
    /// Dropped events across all frames.
    pub events_dropped: u64,
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            tick_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            moves_accepted: 0,
            moves_rejected: 0,
            floor_changes: 0,
            events_dropped: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.tick_us_sum += stats.tick_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        if stats.total_us > micros(TARGET_FRAME_TIME) {
            self.frames_over_budget += 1;
        }

        self.moves_accepted += u64::from(stats.summary.moves_accepted);
        self.moves_rejected += u64::from(stats.summary.moves_rejected);
        self.floor_changes += u64::from(stats.summary.floor_changes);
        self.events_dropped += u64::from(stats.summary.events_dropped);
    }

    /// Returns average frame time in microseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_frame_us(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.total_us_sum as f64 / self.frames_recorded as f64
    }

    /// Returns the share of frames over budget.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
