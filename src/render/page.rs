use indexmap::IndexMap;

use crate::error::{DiagramError, DiagramResult};
use crate::render::Renderer;

/// A mounted drawing surface identified by its container id.
#[derive(Debug)]
pub struct Container<R: Renderer> {
    id: String,
    surface: R,
}

impl<R: Renderer> Container<R> {
    #[must_use]
    pub fn new(id: impl Into<String>, surface: R) -> Self {
        Self {
            id: id.into(),
            surface,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub(crate) fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> R {
        self.surface
    }
}

/// In-memory stand-in for the hosting page: named containers waiting to be
/// claimed by a widget.
#[derive(Debug)]
pub struct Page<R: Renderer> {
    containers: IndexMap<String, R>,
}

impl<R: Renderer> Default for Page<R> {
    fn default() -> Self {
        Self {
            containers: IndexMap::new(),
        }
    }
}

impl<R: Renderer> Page<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>, surface: R) -> Self {
        self.insert(id, surface);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, surface: R) {
        self.containers.insert(id.into(), surface);
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    /// Claims the container `id`. Each container can be claimed once.
    pub fn take_container(&mut self, id: &str) -> DiagramResult<Container<R>> {
        self.containers
            .shift_remove(id)
            .map(|surface| Container::new(id, surface))
            .ok_or_else(|| DiagramError::ContainerNotFound { id: id.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::Page;
    use crate::error::DiagramError;
    use crate::render::NullRenderer;

    #[test]
    fn missing_container_fails_fast() {
        let mut page = Page::new().with_container("galaxy", NullRenderer::default());
        assert!(page.take_container("galaxy").is_ok());
        let err = page
            .take_container("galaxy")
            .expect_err("container already claimed");
        assert!(matches!(err, DiagramError::ContainerNotFound { id } if id == "galaxy"));
    }
}
