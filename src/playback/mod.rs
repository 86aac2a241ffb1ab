//! Playback clock and animation-frame plumbing.
//!
//! The clock is a small state machine over `Stopped`, `Playing` and `Paused`.
//! It owns the single outstanding frame handle; a fired frame whose handle
//! does not match, or that arrives after a pause, is ignored.

mod scheduler;
mod trails;

pub use scheduler::{FrameHandle, FrameScheduler, ManualFrameScheduler};
pub use trails::TrailStore;

use serde::{Deserialize, Serialize};

use crate::core::TAU;
use crate::error::{DiagramError, DiagramResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

/// How progress behaves at the top of its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressBound {
    /// Reaching `max` while playing stops playback.
    Terminal { max: f64 },
    /// Progress wraps back into `[0, period)`.
    Wrapping { period: f64 },
    /// Progress grows without limit (elapsed simulated time).
    Unbounded,
}

impl ProgressBound {
    pub const UNIT: Self = Self::Terminal { max: 1.0 };
    pub const FULL_TURN: Self = Self::Wrapping { period: TAU };

    /// Brings `value` into the valid range: clamp, wrap or floor at zero.
    #[must_use]
    pub fn constrain(self, value: f64) -> f64 {
        match self {
            Self::Terminal { max } => value.clamp(0.0, max),
            Self::Wrapping { period } => {
                let wrapped = value.rem_euclid(period);
                if wrapped >= period { 0.0 } else { wrapped }
            }
            Self::Unbounded => value.max(0.0),
        }
    }
}

/// Result of one accepted animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub progress: f64,
    /// Playback reached its terminal value on this tick and stopped.
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    status: PlaybackStatus,
    speed: f64,
    progress: f64,
    bound: ProgressBound,
    allow_reverse: bool,
    pending: Option<FrameHandle>,
}

impl PlaybackClock {
    #[must_use]
    pub fn new(bound: ProgressBound, allow_reverse: bool) -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            speed: 1.0,
            progress: 0.0,
            bound,
            allow_reverse,
            pending: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn bound(&self) -> ProgressBound {
        self.bound
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Enters `Playing`. Returns `true` when the caller must schedule a frame.
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            return false;
        }
        self.status = PlaybackStatus::Playing;
        true
    }

    /// `Playing -> Paused`; a no-op otherwise. Returns the frame to cancel.
    pub fn pause(&mut self) -> Option<FrameHandle> {
        if self.is_playing() {
            self.status = PlaybackStatus::Paused;
        }
        self.pending.take()
    }

    /// Any state -> `Stopped` with progress zeroed. Returns the frame to cancel.
    pub fn reset(&mut self) -> Option<FrameHandle> {
        self.status = PlaybackStatus::Stopped;
        self.progress = 0.0;
        self.pending.take()
    }

    /// Drops the outstanding handle without changing status.
    pub fn cancel_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Scrubs to `value` (constrained to the bound) without touching status.
    pub fn set_progress(&mut self, value: f64) -> f64 {
        self.progress = self.bound.constrain(value);
        self.progress
    }

    /// Sets the per-tick multiplier. Zero is accepted; negative values only
    /// when reverse playback is supported.
    pub fn set_speed(&mut self, multiplier: f64) -> DiagramResult<()> {
        if !multiplier.is_finite() || (multiplier < 0.0 && !self.allow_reverse) {
            return Err(DiagramError::InvalidSpeed(multiplier));
        }
        self.speed = multiplier;
        Ok(())
    }

    /// Records the handle of the frame requested for the next tick.
    pub fn arm(&mut self, handle: FrameHandle) {
        self.pending = Some(handle);
    }

    /// Handles a fired frame. Stale handles and frames arriving while not
    /// playing are ignored and return `None`.
    pub fn fire(&mut self, handle: FrameHandle, delta: f64) -> Option<TickOutcome> {
        if self.pending != Some(handle) {
            return None;
        }
        self.pending = None;
        if !self.is_playing() {
            return None;
        }

        let advanced = self.progress + delta * self.speed;
        let mut finished = false;
        self.progress = match self.bound {
            ProgressBound::Terminal { max } if advanced >= max => {
                finished = true;
                max
            }
            ProgressBound::Terminal { .. } if advanced <= 0.0 && self.speed < 0.0 => {
                finished = true;
                0.0
            }
            bound => bound.constrain(advanced),
        };
        if finished {
            self.status = PlaybackStatus::Stopped;
        }

        Some(TickOutcome {
            progress: self.progress,
            finished,
        })
    }
}
