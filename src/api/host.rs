use tracing::{debug, trace, warn};

use crate::core::Viewport;
use crate::error::{DiagramError, DiagramResult};
use crate::extensions::{SceneObserver, UpdateCallback, UpdateEvent};
use crate::interaction::{PointerState, RegionRegistry, notify_region_entered, notify_region_left};
use crate::playback::{FrameScheduler, PlaybackClock, PlaybackStatus, TrailStore};
use crate::render::{BuildContext, Container, Renderer, SceneFrame, build_scene};
use crate::widgets::WidgetConfig;

use super::SceneState;

/// Owns one widget's surface, state, regions and playback loop.
///
/// Every public mutation goes through the same pipeline: validate, build a
/// new frame from the candidate state, render it, then commit state and
/// frame together and re-register hover regions. A failed step leaves the
/// previous state and frame in place.
pub struct SceneHost<R: Renderer> {
    pub(super) container: Container<R>,
    pub(super) widget: Box<dyn WidgetConfig>,
    pub(super) scheduler: Box<dyn FrameScheduler>,
    pub(super) viewport: Viewport,
    pub(super) seed: u64,
    pub(super) interactive: bool,
    pub(super) state: SceneState,
    pub(super) frame: SceneFrame,
    pub(super) clock: PlaybackClock,
    pub(super) regions: RegionRegistry,
    pub(super) pointer: PointerState,
    pub(super) trails: TrailStore,
    pub(super) on_update: Option<UpdateCallback>,
    pub(super) observers: Vec<Box<dyn SceneObserver>>,
    pub(super) destroyed: bool,
}

impl<R: Renderer> SceneHost<R> {
    #[must_use]
    pub fn widget_name(&self) -> &'static str {
        self.widget.name()
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        self.container.id()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// State reflected by the most recently rendered frame.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> &SceneFrame {
        &self.frame
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        self.container.surface()
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.clock.status()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.clock.speed()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn hovered_region(&self) -> Option<&str> {
        self.regions.hovered_region()
    }

    #[must_use]
    pub fn trails(&self) -> &TrailStore {
        &self.trails
    }

    /// Widget-specific readout of the current state.
    #[must_use]
    pub fn derived_info(&self) -> serde_json::Value {
        self.widget.derived_info(&self.state)
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.container.into_surface()
    }

    pub(super) fn ensure_alive(&self) -> DiagramResult<()> {
        if self.destroyed {
            warn!(
                widget = self.widget.name(),
                "call on destroyed scene host rejected"
            );
            return Err(DiagramError::Destroyed);
        }
        Ok(())
    }

    /// Builds and renders `next`, then commits it as the current state.
    ///
    /// A highlight naming a region the new frame no longer declares is
    /// dropped before commit.
    pub(super) fn rebuild_with(&mut self, mut next: SceneState) -> DiagramResult<()> {
        let ctx = BuildContext {
            viewport: self.viewport,
            trails: &self.trails,
            seed: self.seed,
        };
        let frame = build_scene(self.widget.as_ref(), &next, &ctx)?;
        self.container.surface_mut().render(&frame)?;
        self.frame = frame;

        let hovered = self.regions.hovered_region().map(str::to_owned);
        self.register_regions(&next.mode);
        let stale = match next.highlighted_region.as_deref() {
            Some(region) => {
                let declared = self
                    .frame
                    .region_nodes()
                    .any(|node| node.region_id.as_deref() == Some(region));
                // Only a pointer that was already inside keeps its hover.
                if declared && hovered.as_deref() == Some(region) {
                    self.regions.restore_hover(region);
                }
                !declared
            }
            None => false,
        };
        if stale {
            debug!(
                region = next.highlighted_region.as_deref().unwrap_or_default(),
                "highlighted region missing from new frame, clearing"
            );
            next.highlighted_region = None;
        }
        self.state = next;
        Ok(())
    }

    /// Rebuilds `next` against empty trails. The recorded points are dropped
    /// only once the new frame is committed.
    pub(super) fn rebuild_without_trails(&mut self, next: SceneState) -> DiagramResult<()> {
        let fresh = TrailStore::new(self.trails.capacity());
        let recorded = std::mem::replace(&mut self.trails, fresh);
        let result = self.rebuild_with(next);
        if result.is_err() {
            self.trails = recorded;
        }
        result
    }

    /// Clears the registry and binds every region node of the current frame
    /// that the widget has metadata for.
    fn register_regions(&mut self, mode: &str) {
        self.regions.clear();
        if !self.interactive {
            return;
        }
        for node in self.frame.region_nodes() {
            let Some(region_id) = node.region_id.as_deref() else {
                continue;
            };
            match self.widget.region_info(mode, region_id) {
                Some(info) => {
                    self.regions
                        .register_region(node, info, notify_region_entered, notify_region_left);
                }
                None => trace!(region = region_id, "region has no metadata, not hoverable"),
            }
        }
        debug!(
            generation = self.regions.generation(),
            regions = self.regions.len(),
            "hover regions registered"
        );
    }

    /// Appends the widget's trail samples for `state`, when trails are shown.
    pub(super) fn record_trails(&mut self, state: &SceneState) {
        if !state.show_trail || self.trails.capacity() == 0 {
            return;
        }
        for (name, point) in self.widget.trail_samples(state, self.viewport) {
            self.trails.record(name, point);
        }
    }

    /// Delivers `event` to the `on_update` callback, then to observers.
    pub(super) fn emit(&mut self, event: UpdateEvent) {
        trace!(kind = event.kind(), "emitting update");
        if let Some(callback) = self.on_update.as_mut() {
            callback(&event);
        }
        self.emit_observer_event(&event);
    }

    pub(super) fn progress_event(&self) -> UpdateEvent {
        UpdateEvent::Progress {
            progress: self.state.progress,
            info: self.widget.derived_info(&self.state),
        }
    }
}
