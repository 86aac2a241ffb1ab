use tracing::trace;

use crate::core::Point;
use crate::error::DiagramResult;
use crate::extensions::UpdateEvent;
use crate::interaction::PointerMode;
use crate::render::Renderer;

use super::SceneHost;

impl<R: Renderer> SceneHost<R> {
    /// Pointer moved to `(x, y)` in surface coordinates.
    ///
    /// While dragging, widgets that map positions to progress scrub instead
    /// of hovering. Otherwise hover transitions rebuild with the new
    /// highlight and then emit `clear` / `region` events. Ignored on
    /// destroyed or non-interactive hosts.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> DiagramResult<()> {
        if !self.accepts_pointer() {
            return Ok(());
        }
        let point = Point::new(x, y);
        self.pointer.on_pointer_move(point);
        if self.pointer.mode() == PointerMode::Dragging {
            if let Some(progress) = self.widget.progress_from_pointer(point, self.viewport) {
                self.set_progress(progress)?;
            }
            return Ok(());
        }

        let mut events = Vec::new();
        self.regions
            .pointer_move(point, &mut |event| events.push(event));
        self.apply_hover(events)
    }

    pub fn pointer_leave(&mut self) -> DiagramResult<()> {
        if !self.accepts_pointer() {
            return Ok(());
        }
        self.pointer.on_pointer_leave();
        let mut events = Vec::new();
        self.regions.pointer_leave(&mut |event| events.push(event));
        self.apply_hover(events)
    }

    /// Starts drag scrubbing when the widget maps this position to progress.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> DiagramResult<()> {
        if !self.accepts_pointer() {
            return Ok(());
        }
        let point = Point::new(x, y);
        let Some(progress) = self.widget.progress_from_pointer(point, self.viewport) else {
            self.pointer.on_pointer_move(point);
            return Ok(());
        };
        self.pointer.on_pointer_down(point);
        self.set_progress(progress)?;
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.pointer.on_pointer_up();
    }

    fn accepts_pointer(&self) -> bool {
        if self.destroyed || !self.interactive {
            trace!("pointer input ignored");
            return false;
        }
        true
    }

    /// Syncs `highlighted_region` with the registry's hover, rebuilding when
    /// it changed, then forwards the transition events.
    fn apply_hover(&mut self, events: Vec<UpdateEvent>) -> DiagramResult<()> {
        if events.is_empty() {
            return Ok(());
        }
        let hovered = self.regions.hovered_region().map(str::to_owned);
        if hovered != self.state.highlighted_region {
            let mut next = self.state.clone();
            next.highlighted_region = hovered;
            self.rebuild_with(next)?;
        }
        for event in events {
            self.emit(event);
        }
        Ok(())
    }
}
