use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{DiagramError, DiagramResult};
use crate::render::{Definition, Paint, SceneLayer, ShapeKind, ShapeNode};

/// Contiguous run of nodes belonging to one layer inside `SceneFrame::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpan {
    pub layer: SceneLayer,
    pub start: usize,
    pub len: usize,
}

/// Backend-agnostic shape tree for one rebuild pass, ordered back-to-front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub viewport: Viewport,
    pub defs: Vec<Definition>,
    pub nodes: Vec<ShapeNode>,
    pub layers: Vec<LayerSpan>,
    /// Nodes dropped by the builder because their geometry was degenerate.
    pub suppressed: usize,
}

impl SceneFrame {
    #[must_use]
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            defs: Vec::new(),
            nodes: Vec::new(),
            layers: Vec::new(),
            suppressed: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes of one layer, in draw order.
    #[must_use]
    pub fn layer_nodes(&self, layer: SceneLayer) -> &[ShapeNode] {
        self.layers
            .iter()
            .find(|span| span.layer == layer)
            .map_or(&[], |span| &self.nodes[span.start..span.start + span.len])
    }

    /// Layer that owns the node at `index`.
    #[must_use]
    pub fn layer_of(&self, index: usize) -> Option<SceneLayer> {
        self.layers
            .iter()
            .find(|span| (span.start..span.start + span.len).contains(&index))
            .map(|span| span.layer)
    }

    /// Region-tagged nodes, in draw order.
    pub fn region_nodes(&self) -> impl Iterator<Item = &ShapeNode> {
        self.nodes.iter().filter(|node| node.region_id.is_some())
    }

    pub fn validate(&self) -> DiagramResult<()> {
        if !self.viewport.is_valid() {
            return Err(DiagramError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for node in &self.nodes {
            self.validate_node(node)?;
        }
        Ok(())
    }

    fn validate_node(&self, node: &ShapeNode) -> DiagramResult<()> {
        if node.is_degenerate() {
            return Err(DiagramError::InvalidData(format!(
                "degenerate {} node reached the frame",
                node.kind_name()
            )));
        }
        for paint in [&node.style.fill, &node.style.stroke].into_iter().flatten() {
            match paint {
                Paint::Solid(color) => color.validate()?,
                Paint::Reference(id) => self.ensure_defined(id)?,
            }
        }
        if let Some(filter) = &node.style.filter {
            self.ensure_defined(filter)?;
        }
        if let ShapeKind::Group { children } = &node.kind {
            for child in children {
                self.validate_node(child)?;
            }
        }
        Ok(())
    }

    fn ensure_defined(&self, id: &str) -> DiagramResult<()> {
        if self.defs.iter().any(|def| def.id() == id) {
            Ok(())
        } else {
            Err(DiagramError::InvalidData(format!(
                "paint reference `{id}` has no definition"
            )))
        }
    }
}
