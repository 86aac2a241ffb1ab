use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::api::SceneState;
use crate::core::{Point, Viewport};
use crate::error::{DiagramError, DiagramResult};
use crate::playback::TrailStore;
use crate::render::{
    Color, ColorPalette, Definition, LayerSpan, Paint, SceneFrame, SceneLayer, ShapeKind,
    ShapeNode,
};
use crate::widgets::WidgetConfig;

/// Everything a rebuild needs besides the widget and its state.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub viewport: Viewport,
    pub trails: &'a TrailStore,
    /// Seed for producer randomness; equal seeds give equal frames.
    pub seed: u64,
}

/// Runs the producer registered for `state.mode` and returns the flattened frame.
///
/// Pure over its inputs: the same widget, state and context always yield the
/// same frame.
pub fn build_scene(
    widget: &dyn WidgetConfig,
    state: &SceneState,
    ctx: &BuildContext<'_>,
) -> DiagramResult<SceneFrame> {
    let producer = widget
        .modes()
        .get(&state.mode)
        .ok_or_else(|| DiagramError::UnknownMode {
            widget: widget.name().to_owned(),
            mode: state.mode.clone(),
        })?;

    let mut builder = SceneBuilder::new(ctx.viewport, &state.palette, ctx.trails, ctx.seed);
    producer(&mut builder, state);
    let frame = builder.finish();
    debug!(
        widget = widget.name(),
        mode = %state.mode,
        nodes = frame.len(),
        suppressed = frame.suppressed,
        "scene rebuilt"
    );
    Ok(frame)
}

/// Mutable drawing context handed to shape producers during one rebuild.
///
/// Producers push nodes into layers in any order; `finish` flattens them in
/// canonical layer order. Degenerate nodes are dropped here, never rendered.
pub struct SceneBuilder<'a> {
    viewport: Viewport,
    palette: &'a ColorPalette,
    trails: &'a TrailStore,
    rng: StdRng,
    defs: Vec<Definition>,
    layers: [Vec<ShapeNode>; 4],
    suppressed: usize,
}

impl<'a> SceneBuilder<'a> {
    #[must_use]
    pub fn new(
        viewport: Viewport,
        palette: &'a ColorPalette,
        trails: &'a TrailStore,
        seed: u64,
    ) -> Self {
        Self {
            viewport,
            palette,
            trails,
            rng: StdRng::seed_from_u64(seed),
            defs: Vec::new(),
            layers: Default::default(),
            suppressed: 0,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.viewport.center()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        f64::from(self.viewport.width)
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        f64::from(self.viewport.height)
    }

    /// Palette color for `role`; white when the role is missing.
    #[must_use]
    pub fn color(&self, role: &str) -> Color {
        self.palette.get(role).unwrap_or_else(|| {
            debug!(role, "palette role missing, falling back to white");
            Color::WHITE
        })
    }

    #[must_use]
    pub fn paint(&self, role: &str) -> Paint {
        Paint::Solid(self.color(role))
    }

    /// Recorded trail points for `name`, oldest first.
    #[must_use]
    pub fn trail(&self, name: &str) -> Vec<Point> {
        self.trails.points(name)
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform sample in `[-spread / 2, spread / 2)`.
    pub fn jitter(&mut self, spread: f64) -> f64 {
        (self.rng.random::<f64>() - 0.5) * spread
    }

    /// Registers a definition once; repeated ids are ignored.
    pub fn define(&mut self, definition: Definition) {
        if self.defs.iter().all(|def| def.id() != definition.id()) {
            self.defs.push(definition);
        }
    }

    /// Pushes a node into `layer`. Returns `false` when it was suppressed.
    pub fn push(&mut self, layer: SceneLayer, node: ShapeNode) -> bool {
        match self.sanitize(node) {
            Some(node) => {
                self.layers[layer.index()].push(node);
                true
            }
            None => false,
        }
    }

    fn sanitize(&mut self, mut node: ShapeNode) -> Option<ShapeNode> {
        if let ShapeKind::Group { children } = &mut node.kind {
            let taken = std::mem::take(children);
            *children = taken
                .into_iter()
                .filter_map(|child| self.sanitize(child))
                .collect();
        }
        if node.is_degenerate() {
            self.suppressed += 1;
            debug!(
                kind = node.kind_name(),
                region = node.region_id.as_deref().unwrap_or("-"),
                "suppressing degenerate shape"
            );
            return None;
        }
        Some(node)
    }

    #[must_use]
    pub fn finish(self) -> SceneFrame {
        let mut nodes = Vec::with_capacity(self.layers.iter().map(Vec::len).sum());
        let mut layers = Vec::new();
        for (layer, bucket) in SceneLayer::ORDER.into_iter().zip(self.layers) {
            if bucket.is_empty() {
                continue;
            }
            layers.push(LayerSpan {
                layer,
                start: nodes.len(),
                len: bucket.len(),
            });
            nodes.extend(bucket);
        }
        SceneFrame {
            viewport: self.viewport,
            defs: self.defs,
            nodes,
            layers,
            suppressed: self.suppressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BuildContext, SceneBuilder, build_scene};
    use crate::api::SceneState;
    use crate::core::{Point, Viewport};
    use crate::error::DiagramError;
    use crate::playback::TrailStore;
    use crate::render::{Color, ColorPalette, SceneLayer, ShapeNode, ShapeStyle};
    use crate::widgets::CircleCanvas;

    #[test]
    fn finish_orders_layers_back_to_front() {
        let palette = ColorPalette::default();
        let trails = TrailStore::new(0);
        let mut builder = SceneBuilder::new(Viewport::new(100, 100), &palette, &trails, 1);
        let style = ShapeStyle::filled(Color::WHITE);
        builder.push(
            SceneLayer::Labels,
            ShapeNode::circle(Point::new(1.0, 1.0), 1.0, style.clone()),
        );
        builder.push(
            SceneLayer::Background,
            ShapeNode::circle(Point::new(2.0, 2.0), 2.0, style.clone()),
        );
        builder.push(
            SceneLayer::Background,
            ShapeNode::circle(Point::new(3.0, 3.0), 3.0, style),
        );
        let frame = builder.finish();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.layer_of(0), Some(SceneLayer::Background));
        assert_eq!(frame.layer_of(1), Some(SceneLayer::Background));
        assert_eq!(frame.layer_of(2), Some(SceneLayer::Labels));
        assert!(frame.layer_nodes(SceneLayer::Structure).is_empty());
    }

    #[test]
    fn degenerate_nodes_are_counted_not_pushed() {
        let palette = ColorPalette::default();
        let trails = TrailStore::new(0);
        let mut builder = SceneBuilder::new(Viewport::new(100, 100), &palette, &trails, 1);
        let style = ShapeStyle::filled(Color::WHITE);
        assert!(!builder.push(
            SceneLayer::Markers,
            ShapeNode::circle(Point::new(0.0, 0.0), 0.0, style.clone())
        ));
        assert!(builder.push(
            SceneLayer::Markers,
            ShapeNode::group(vec![
                ShapeNode::circle(Point::new(0.0, 0.0), -1.0, style.clone()),
                ShapeNode::circle(Point::new(0.0, 0.0), 1.0, style),
            ])
        ));
        let frame = builder.finish();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.suppressed, 2);
    }

    #[test]
    fn build_scene_rejects_unknown_mode() {
        let widget = CircleCanvas::new();
        let trails = TrailStore::new(0);
        let ctx = BuildContext {
            viewport: Viewport::new(360, 360),
            trails: &trails,
            seed: 3,
        };
        let state = SceneState::new("sideways", ColorPalette::default());
        assert!(matches!(
            build_scene(&widget, &state, &ctx),
            Err(DiagramError::UnknownMode { mode, .. }) if mode == "sideways"
        ));

        let state = SceneState::new("full", ColorPalette::default());
        let first = build_scene(&widget, &state, &ctx).expect("frame");
        let second = build_scene(&widget, &state, &ctx).expect("frame");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn same_seed_gives_same_jitter() {
        let palette = ColorPalette::default();
        let trails = TrailStore::new(0);
        let mut first = SceneBuilder::new(Viewport::new(10, 10), &palette, &trails, 42);
        let mut second = SceneBuilder::new(Viewport::new(10, 10), &palette, &trails, 42);
        for _ in 0..8 {
            assert_eq!(first.jitter(10.0), second.jitter(10.0));
        }
    }
}
