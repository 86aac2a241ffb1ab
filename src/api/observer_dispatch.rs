use crate::extensions::{ObserverContext, UpdateEvent};
use crate::render::Renderer;

use super::SceneHost;

impl<R: Renderer> SceneHost<R> {
    pub(super) fn observer_context(&self) -> ObserverContext {
        ObserverContext {
            widget: self.widget.name().to_owned(),
            viewport: self.viewport,
            mode: self.state.mode.clone(),
            progress: self.state.progress,
            status: self.clock.status(),
            highlighted_region: self.state.highlighted_region.clone(),
        }
    }

    pub(super) fn emit_observer_event(&mut self, event: &UpdateEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.observers {
            observer.on_event(event, &context);
        }
    }
}
