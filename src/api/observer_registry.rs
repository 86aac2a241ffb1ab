use crate::error::{DiagramError, DiagramResult};
use crate::extensions::SceneObserver;
use crate::render::Renderer;

use super::SceneHost;

impl<R: Renderer> SceneHost<R> {
    /// Registers an observer with a unique, non-empty id.
    pub fn register_observer(&mut self, observer: Box<dyn SceneObserver>) -> DiagramResult<()> {
        self.ensure_alive()?;
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(DiagramError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(DiagramError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }
}
