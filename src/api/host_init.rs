use tracing::info;

use crate::error::{DiagramError, DiagramResult};
use crate::interaction::{PointerState, RegionRegistry};
use crate::playback::{FrameScheduler, PlaybackClock, TrailStore};
use crate::render::{ColorPalette, Container, Page, Renderer, SceneFrame};
use crate::widgets::WidgetConfig;

use super::validation::{validate_colors, validate_mode, validate_params, validate_viewport};
use super::{SceneHost, SceneState, WidgetOptions};

/// Mounts `widget` on `container` and renders its first frame.
///
/// Configuration errors (bad size, unknown mode or param, unparsable color,
/// unsupported speed) fail here before anything is drawn.
pub fn create_widget<R: Renderer>(
    container: Container<R>,
    widget: Box<dyn WidgetConfig>,
    scheduler: impl FrameScheduler + 'static,
    options: WidgetOptions,
) -> DiagramResult<SceneHost<R>> {
    SceneHost::new(container, widget, Box::new(scheduler), options)
}

impl<R: Renderer> SceneHost<R> {
    /// Claims container `container_id` from `page` and mounts `widget` on it.
    pub fn mount(
        page: &mut Page<R>,
        container_id: &str,
        widget: Box<dyn WidgetConfig>,
        scheduler: impl FrameScheduler + 'static,
        options: WidgetOptions,
    ) -> DiagramResult<Self> {
        let container = page.take_container(container_id)?;
        Self::new(container, widget, Box::new(scheduler), options)
    }

    fn new(
        container: Container<R>,
        widget: Box<dyn WidgetConfig>,
        scheduler: Box<dyn FrameScheduler>,
        mut options: WidgetOptions,
    ) -> DiagramResult<Self> {
        let size = options.size.unwrap_or_else(|| widget.default_size());
        let viewport = validate_viewport(widget.as_ref(), size)?;

        let mode = match options.mode.take() {
            Some(mode) => mode,
            None => widget
                .default_mode()
                .ok_or_else(|| {
                    DiagramError::InvalidData(format!(
                        "widget `{}` declares no modes",
                        widget.name()
                    ))
                })?
                .to_owned(),
        };
        validate_mode(widget.as_ref(), &mode)?;

        let palette = ColorPalette::from_css(widget.palette().iter().copied())?
            .merged(&validate_colors(&options.colors)?);

        let mut state = SceneState::new(mode, palette);
        for spec in widget.params() {
            state.params.insert(spec.key.to_owned(), spec.default);
        }
        let params = validate_params(widget.as_ref(), &options.params)?;
        state.params.extend(params);
        state.show_trail = options.show_trail;

        let mut clock = PlaybackClock::new(widget.progress_bound(), widget.supports_reverse());
        clock.set_speed(options.speed)?;

        let seed = options.seed.unwrap_or_else(rand::random);
        let trails = TrailStore::new(widget.trail_capacity());

        let mut host = Self {
            container,
            widget,
            scheduler,
            viewport,
            seed,
            interactive: options.interactive,
            state: state.clone(),
            frame: SceneFrame::empty(viewport),
            clock,
            regions: RegionRegistry::new(),
            pointer: PointerState::default(),
            trails,
            on_update: options.on_update.take(),
            observers: Vec::new(),
            destroyed: false,
        };
        host.rebuild_with(state)?;

        info!(
            widget = host.widget.name(),
            container = host.container.id(),
            width = viewport.width,
            height = viewport.height,
            mode = %host.state.mode,
            seed,
            "widget mounted"
        );

        if options.animate {
            host.play()?;
        }
        Ok(host)
    }

    /// Cancels the pending frame, drops regions, listeners and observers, and
    /// releases the surface. Calling it twice is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(handle) = self.clock.cancel_pending() {
            self.scheduler.cancel_frame(handle);
        }
        self.clock.reset();
        self.regions.clear();
        self.pointer = PointerState::default();
        self.trails.clear();
        self.on_update = None;
        self.observers.clear();
        self.container.surface_mut().release();
        self.destroyed = true;
        info!(
            widget = self.widget.name(),
            container = self.container.id(),
            "widget destroyed"
        );
    }
}
