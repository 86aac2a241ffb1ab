mod color;
mod frame;
mod layer_stack;
mod null_renderer;
mod page;
mod path;
mod primitives;
mod scene_builder;
mod svg_backend;

pub use color::{Color, ColorPalette};
pub use frame::{LayerSpan, SceneFrame};
pub use layer_stack::SceneLayer;
pub use null_renderer::NullRenderer;
pub use page::{Container, Page};
pub use path::{PathCommand, PathData};
pub use primitives::{
    Definition, FontWeight, GradientStop, Paint, ShapeKind, ShapeNode, ShapeStyle, TextAnchor,
};
pub use scene_builder::{BuildContext, SceneBuilder, build_scene};
pub use svg_backend::{SvgRenderer, frame_to_svg};

use crate::error::DiagramResult;

/// Contract implemented by any drawing surface.
///
/// Backends receive a fully materialized `SceneFrame`, so drawing code stays
/// isolated from widget state and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &SceneFrame) -> DiagramResult<()>;

    /// Detaches listeners and drops surface content when the host is destroyed.
    fn release(&mut self) {}
}
