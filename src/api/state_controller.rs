use tracing::debug;

use crate::error::{DiagramError, DiagramResult};
use crate::extensions::UpdateEvent;
use crate::render::Renderer;

use super::validation::{
    validate_colors, validate_mode, validate_param, validate_params, validate_progress,
};
use super::{SceneHost, SceneState, SceneStatePatch};

impl<R: Renderer> SceneHost<R> {
    /// Copy of the current state.
    #[must_use]
    pub fn get_state(&self) -> SceneState {
        self.state.clone()
    }

    /// Merges `patch` into the state and rebuilds once.
    ///
    /// The whole patch is validated before anything changes. No update event
    /// is emitted; callers that need one use the dedicated setters.
    pub fn set_state(&mut self, patch: SceneStatePatch) -> DiagramResult<()> {
        self.ensure_alive()?;
        let widget = self.widget.as_ref();
        if let Some(mode) = patch.mode.as_deref() {
            validate_mode(widget, mode)?;
        }
        let progress = patch
            .progress
            .map(validate_progress)
            .transpose()?
            .map(|value| self.clock.bound().constrain(value));
        let colors = validate_colors(&patch.colors)?;
        let params = validate_params(widget, &patch.params)?;

        let mut next = self.state.clone();
        let mut drop_trails = false;
        if let Some(mode) = patch.mode {
            drop_trails |= mode != next.mode;
            next.mode = mode;
        }
        if let Some(progress) = progress {
            next.progress = progress;
        }
        if let Some(highlight) = patch.highlighted_region {
            next.highlighted_region = highlight;
        }
        next.palette = next.palette.merged(&colors);
        next.params.extend(params);
        if let Some(show_trail) = patch.show_trail {
            drop_trails |= !show_trail;
            next.show_trail = show_trail;
        }

        if drop_trails {
            self.rebuild_without_trails(next)?;
        } else {
            self.rebuild_with(next)?;
        }
        if let Some(progress) = progress {
            self.clock.set_progress(progress);
        }
        debug!(mode = %self.state.mode, progress = self.state.progress, "state merged");
        Ok(())
    }

    /// Switches to `mode`, rebuilds and emits `modeChange`.
    ///
    /// Trails restart; progress restarts too when the widget says the two
    /// modes live on different scales.
    pub fn set_mode(&mut self, mode: &str) -> DiagramResult<()> {
        self.ensure_alive()?;
        validate_mode(self.widget.as_ref(), mode)?;

        let mut next = self.state.clone();
        let restart = self.widget.resets_progress_on_mode_change(&next.mode, mode);
        if restart {
            next.progress = 0.0;
        }
        next.mode = mode.to_owned();

        self.rebuild_without_trails(next)?;
        if restart {
            self.clock.set_progress(0.0);
        }
        debug!(mode, restart, "mode changed");
        self.emit(UpdateEvent::ModeChange {
            mode: mode.to_owned(),
            payload: self.widget.mode_payload(mode),
        });
        Ok(())
    }

    /// Advances to the next mode in declaration order, wrapping around.
    pub fn cycle_mode(&mut self) -> DiagramResult<&'static str> {
        self.ensure_alive()?;
        let next = self
            .widget
            .modes()
            .next_after(&self.state.mode)
            .ok_or_else(|| DiagramError::UnknownMode {
                widget: self.widget.name().to_owned(),
                mode: self.state.mode.clone(),
            })?;
        self.set_mode(next)?;
        Ok(next)
    }

    /// Sets one named param, clamped into its range. Returns the stored value.
    pub fn set_param(&mut self, key: &str, value: f64) -> DiagramResult<f64> {
        self.ensure_alive()?;
        let value = validate_param(self.widget.as_ref(), key, value)?;

        let mut next = self.state.clone();
        next.params.insert(key.to_owned(), value);
        self.rebuild_with(next)?;

        self.emit(UpdateEvent::Params {
            info: self.widget.derived_info(&self.state),
        });
        Ok(value)
    }

    /// Jumps to the preset `key` atomically. Returns its display name.
    pub fn apply_preset(&mut self, key: &str) -> DiagramResult<&'static str> {
        self.ensure_alive()?;
        let widget = self.widget.as_ref();
        let preset = widget
            .presets()
            .iter()
            .find(|preset| preset.key == key)
            .copied()
            .ok_or_else(|| DiagramError::UnknownPreset {
                widget: widget.name().to_owned(),
                preset: key.to_owned(),
            })?;
        if let Some(mode) = preset.mode {
            validate_mode(widget, mode)?;
        }
        let progress = preset
            .progress
            .map(|value| self.clock.bound().constrain(value));
        let mut params = Vec::with_capacity(preset.params.len());
        for (param, value) in preset.params {
            params.push((param.to_string(), validate_param(widget, param, *value)?));
        }

        let mut next = self.state.clone();
        let mode_changed = preset.mode.is_some_and(|mode| mode != next.mode);
        if let Some(mode) = preset.mode {
            next.mode = mode.to_owned();
        }
        if let Some(progress) = progress {
            next.progress = progress;
        }
        next.params.extend(params);

        if mode_changed {
            self.rebuild_without_trails(next)?;
        } else {
            self.rebuild_with(next)?;
        }
        if let Some(progress) = progress {
            self.clock.set_progress(progress);
        }
        debug!(preset = key, "preset applied");
        self.emit(UpdateEvent::Preset {
            preset: key.to_owned(),
            name: preset.name.to_owned(),
        });
        Ok(preset.name)
    }

    /// Shows or hides trails; hiding also forgets the recorded points.
    pub fn set_show_trail(&mut self, show: bool) -> DiagramResult<()> {
        self.set_state(SceneStatePatch {
            show_trail: Some(show),
            ..SceneStatePatch::default()
        })
    }
}
