use crate::error::DiagramResult;
use crate::render::{Renderer, SceneFrame};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests catch invalid geometry before it
/// reaches a real surface.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_node_count: usize,
    pub last_region_count: usize,
    pub render_count: usize,
    pub released: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &SceneFrame) -> DiagramResult<()> {
        frame.validate()?;
        self.last_node_count = frame.nodes.len();
        self.last_region_count = frame.region_nodes().count();
        self.render_count += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}
