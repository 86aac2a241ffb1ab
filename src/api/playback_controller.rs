use tracing::{debug, trace, warn};

use crate::error::DiagramResult;
use crate::extensions::UpdateEvent;
use crate::playback::{FrameHandle, PlaybackStatus};
use crate::render::Renderer;

use super::SceneHost;
use super::validation::validate_progress;

impl<R: Renderer> SceneHost<R> {
    /// Starts or resumes playback by requesting the first frame.
    /// Playing already is a no-op.
    pub fn play(&mut self) -> DiagramResult<()> {
        self.ensure_alive()?;
        if !self.clock.play() {
            return Ok(());
        }
        self.schedule_next_frame();
        debug!(widget = self.widget.name(), "playback started");
        self.emit(UpdateEvent::Playback {
            status: PlaybackStatus::Playing,
        });
        Ok(())
    }

    /// Pauses and cancels the pending frame. Only `Playing` changes status.
    pub fn pause(&mut self) -> DiagramResult<()> {
        self.ensure_alive()?;
        let was_playing = self.clock.is_playing();
        if let Some(handle) = self.clock.pause() {
            self.scheduler.cancel_frame(handle);
        }
        if was_playing {
            debug!(widget = self.widget.name(), "playback paused");
            self.emit(UpdateEvent::Playback {
                status: PlaybackStatus::Paused,
            });
        }
        Ok(())
    }

    /// Stops, zeroes progress, clears trails and rebuilds.
    ///
    /// Playback stops even when the rebuild fails; the previous frame,
    /// progress and trails then stay in place.
    pub fn reset(&mut self) -> DiagramResult<()> {
        self.ensure_alive()?;
        let previous = self.clock.status();
        if let Some(handle) = self.clock.reset() {
            self.scheduler.cancel_frame(handle);
        }

        let mut next = self.state.clone();
        next.progress = 0.0;
        let rebuilt = self.rebuild_without_trails(next);
        match &rebuilt {
            Ok(()) => {
                debug!(widget = self.widget.name(), "playback reset");
                self.emit(self.progress_event());
            }
            Err(err) => {
                warn!(error = %err, "reset rebuild failed, playback stopped");
                self.clock.set_progress(self.state.progress);
            }
        }
        if previous != PlaybackStatus::Stopped {
            self.emit(UpdateEvent::Playback {
                status: PlaybackStatus::Stopped,
            });
        }
        rebuilt
    }

    /// Scales the per-frame progress delta. Zero freezes the picture while
    /// staying `Playing`; negative values need reverse support.
    pub fn set_speed(&mut self, multiplier: f64) -> DiagramResult<()> {
        self.ensure_alive()?;
        self.clock.set_speed(multiplier)?;
        debug!(multiplier, "playback speed set");
        Ok(())
    }

    /// Scrubs to `value` without touching playback status. Rebuilds and
    /// emits exactly one `progress` event. Returns the constrained value.
    pub fn set_progress(&mut self, value: f64) -> DiagramResult<f64> {
        self.ensure_alive()?;
        let progress = self.clock.bound().constrain(validate_progress(value)?);

        let mut next = self.state.clone();
        next.progress = progress;
        self.record_trails(&next);
        self.rebuild_with(next)?;
        self.clock.set_progress(progress);

        self.emit(self.progress_event());
        Ok(progress)
    }

    /// Entry point for the environment's frame callback.
    ///
    /// Frames that were cancelled, superseded, or arrive after `pause` or
    /// `destroy` are dropped without rebuilding. A render failure is returned
    /// after the loop has been rescheduled, so one bad frame does not stop
    /// playback.
    pub fn on_animation_frame(&mut self, handle: FrameHandle) -> DiagramResult<()> {
        if self.destroyed {
            warn!(handle = handle.raw(), "frame fired after destroy, ignoring");
            return Ok(());
        }
        let delta = self.widget.tick_delta(&self.state.mode);
        let Some(outcome) = self.clock.fire(handle, delta) else {
            warn!(handle = handle.raw(), "stale animation frame, ignoring");
            return Ok(());
        };

        let mut next = self.state.clone();
        next.progress = outcome.progress;
        self.record_trails(&next);
        if let Err(err) = self.rebuild_with(next) {
            warn!(error = %err, "frame rebuild failed");
            self.clock.set_progress(self.state.progress);
            if self.clock.is_playing() {
                self.schedule_next_frame();
            }
            return Err(err);
        }
        trace!(progress = outcome.progress, "tick");

        self.emit(self.progress_event());
        if outcome.finished {
            debug!(widget = self.widget.name(), "playback reached its end");
            self.emit(UpdateEvent::Playback {
                status: PlaybackStatus::Stopped,
            });
        } else {
            self.schedule_next_frame();
        }
        Ok(())
    }

    fn schedule_next_frame(&mut self) {
        let handle = self.scheduler.request_frame();
        self.clock.arm(handle);
    }
}
