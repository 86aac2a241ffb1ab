use std::f64::consts::PI;

use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::{Point, Viewport, angle_from_point, point_on_circle, rotate, to_degrees};
use crate::playback::ProgressBound;
use crate::render::{
    Color, PathData, SceneBuilder, SceneLayer, ShapeNode, ShapeStyle, TextAnchor,
};

use super::{ModeTable, Preset, WidgetConfig};

const PALETTE: &[(&str, &str)] = &[
    ("circle", "#d4af37"),
    ("point", "#00d4ff"),
    ("projectionX", "#ff6b6b"),
    ("projectionY", "#4ecdc4"),
    ("angle", "rgba(212, 175, 55, 0.3)"),
    ("grid", "rgba(255, 255, 255, 0.1)"),
    ("axes", "rgba(255, 255, 255, 0.3)"),
    ("trace", "rgba(0, 212, 255, 0.3)"),
];

const PRESETS: &[Preset] = &[
    Preset {
        key: "zero",
        name: "Starting point (0°)",
        mode: None,
        progress: Some(0.0),
        params: &[],
    },
    Preset {
        key: "quarter",
        name: "Quarter turn (90°)",
        mode: None,
        progress: Some(PI / 2.0),
        params: &[],
    },
    Preset {
        key: "half",
        name: "Half turn (180°), where 1 becomes -1",
        mode: None,
        progress: Some(PI),
        params: &[],
    },
    Preset {
        key: "three_quarters",
        name: "Three-quarter turn (270°)",
        mode: None,
        progress: Some(PI * 1.5),
        params: &[],
    },
];

/// Unit-circle explorer: a point dragged or spun around a circle, with
/// optional sine/cosine projections and the swept angle.
///
/// Progress is the angle in radians, wrapping at a full turn.
#[derive(Debug, Clone)]
pub struct CircleCanvas {
    modes: ModeTable,
}

impl CircleCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new()
                .with("plain", draw_plain)
                .with("projections", draw_projections)
                .with("full", draw_full),
        }
    }
}

impl Default for CircleCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for CircleCanvas {
    fn name(&self) -> &'static str {
        "circle-canvas"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn default_size(&self) -> f64 {
        360.0
    }

    fn progress_bound(&self) -> ProgressBound {
        ProgressBound::FULL_TURN
    }

    fn tick_delta(&self, _mode: &str) -> f64 {
        0.02
    }

    fn supports_reverse(&self) -> bool {
        true
    }

    fn presets(&self) -> &'static [Preset] {
        PRESETS
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        circle_values(state.progress)
    }

    fn trail_capacity(&self) -> usize {
        500
    }

    fn trail_samples(&self, state: &SceneState, viewport: Viewport) -> Vec<(&'static str, Point)> {
        vec![("trace", point_at(viewport.center(), radius_for(viewport), state.progress))]
    }

    /// Angle of the pointer around the circle center, y axis pointing up.
    fn progress_from_pointer(&self, point: Point, viewport: Viewport) -> Option<f64> {
        let center = viewport.center();
        let (dx, dy) = (point.x - center.x, center.y - point.y);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(angle_from_point(dx, dy))
    }
}

/// Trigonometric readout for `angle`; `tan` is `null` where it is undefined.
fn circle_values(angle: f64) -> Value {
    let unit = point_on_circle(angle);
    json!({
        "angle": angle,
        "degrees": to_degrees(angle),
        "x": unit.x,
        "y": unit.y,
        "sin": unit.y,
        "cos": unit.x,
        "tan": unit.y / unit.x,
    })
}

fn radius_for(viewport: Viewport) -> f64 {
    viewport.min_side() / 3.0
}

/// Screen position of the point; screen y grows downward.
fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    let unit = point_on_circle(angle);
    Point::new(center.x + radius * unit.x, center.y - radius * unit.y)
}

struct Frame {
    center: Point,
    radius: f64,
    point: Point,
}

fn frame(builder: &SceneBuilder<'_>, state: &SceneState) -> Frame {
    let center = builder.center();
    let radius = radius_for(builder.viewport());
    Frame {
        center,
        radius,
        point: point_at(center, radius, state.progress),
    }
}

fn draw_plain(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let frame = frame(builder, state);
    draw_base(builder, state, &frame);
    draw_point(builder, &frame);
}

fn draw_projections(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let frame = frame(builder, state);
    draw_base(builder, state, &frame);
    draw_projection_lines(builder, &frame);
    draw_point(builder, &frame);
}

fn draw_full(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let frame = frame(builder, state);
    draw_base(builder, state, &frame);
    draw_angle(builder, state, &frame);
    draw_projection_lines(builder, &frame);
    draw_point(builder, &frame);
    draw_readout(builder, state, &frame);
}

fn draw_base(builder: &mut SceneBuilder<'_>, state: &SceneState, frame: &Frame) {
    let Frame { center, radius, .. } = *frame;

    let grid = builder.color("grid");
    let step = radius / 4.0;
    for i in -4..=4 {
        let offset = f64::from(i) * step;
        builder.push(
            SceneLayer::Background,
            ShapeNode::line(
                center.offset(offset, -radius * 1.2),
                center.offset(offset, radius * 1.2),
                ShapeStyle::stroked(grid, 1.0),
            ),
        );
        builder.push(
            SceneLayer::Background,
            ShapeNode::line(
                center.offset(-radius * 1.2, offset),
                center.offset(radius * 1.2, offset),
                ShapeStyle::stroked(grid, 1.0),
            ),
        );
    }

    let axes = builder.color("axes");
    let reach = radius * 1.3;
    builder.push(
        SceneLayer::Background,
        ShapeNode::line(
            center.offset(-reach, 0.0),
            center.offset(reach, 0.0),
            ShapeStyle::stroked(axes, 2.0),
        ),
    );
    builder.push(
        SceneLayer::Background,
        ShapeNode::line(
            center.offset(0.0, -reach),
            center.offset(0.0, reach),
            ShapeStyle::stroked(axes, 2.0),
        ),
    );
    arrow_head(builder, center.offset(reach, 0.0), 0.0, axes);
    arrow_head(builder, center.offset(0.0, -reach), -PI / 2.0, axes);

    let circle = builder.color("circle");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(center, radius, ShapeStyle::stroked(circle, 2.0)),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(center, 4.0, ShapeStyle::filled(circle)),
    );

    if state.show_trail {
        let trace = builder.trail("trace");
        if trace.len() >= 2 {
            let color = builder.color("trace");
            builder.push(
                SceneLayer::Structure,
                ShapeNode::path(PathData::polyline(&trace), ShapeStyle::stroked(color, 3.0)),
            );
        }
    }
}

fn arrow_head(builder: &mut SceneBuilder<'_>, tip: Point, rotation: f64, color: Color) {
    let corner = |x: f64, y: f64| {
        let turned = rotate(Point::new(x, y), rotation);
        tip.offset(turned.x, turned.y)
    };
    let head = PathData::polyline(&[corner(-6.0, -4.0), tip, corner(-6.0, 4.0)]);
    builder.push(
        SceneLayer::Background,
        ShapeNode::path(head, ShapeStyle::stroked(color, 2.0)),
    );
}

/// Wedge and thick arc sweeping from the positive x axis to the point.
fn draw_angle(builder: &mut SceneBuilder<'_>, state: &SceneState, frame: &Frame) {
    let angle = state.progress;
    let arc_radius = frame.radius * 0.3;
    let start = frame.center.offset(arc_radius, 0.0);
    let end = point_at(frame.center, arc_radius, angle);
    let large_arc = angle.abs() > PI;
    let sweep = angle < 0.0;

    let color = builder.color("angle");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::path(
            PathData::new()
                .move_to(start)
                .arc_to(arc_radius, large_arc, sweep, end),
            ShapeStyle::stroked(color, 20.0),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::path(
            PathData::new()
                .move_to(frame.center)
                .line_to(start)
                .arc_to(arc_radius, large_arc, sweep, end)
                .close(),
            ShapeStyle::filled(color),
        ),
    );
    let circle = builder.color("circle");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::line(frame.center, frame.point, ShapeStyle::stroked(circle, 2.0)),
    );
}

fn draw_projection_lines(builder: &mut SceneBuilder<'_>, frame: &Frame) {
    let Frame { center, point, .. } = *frame;
    let on_x_axis = Point::new(point.x, center.y);
    let on_y_axis = Point::new(center.x, point.y);

    let sin_color = builder.color("projectionY");
    let cos_color = builder.color("projectionX");
    let segments = [
        (point, on_x_axis, sin_color, 2.0, true),
        (center, on_y_axis, sin_color, 4.0, false),
        (point, on_y_axis, cos_color, 2.0, true),
        (center, on_x_axis, cos_color, 4.0, false),
    ];
    for (from, to, color, width, dashed) in segments {
        let style = ShapeStyle::stroked(color, width);
        let style = if dashed { style.with_dash(5.0, 5.0) } else { style };
        builder.push(SceneLayer::Markers, ShapeNode::line(from, to, style));
    }
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(on_x_axis, 5.0, ShapeStyle::filled(cos_color)),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(on_y_axis, 5.0, ShapeStyle::filled(sin_color)),
    );
}

fn draw_point(builder: &mut SceneBuilder<'_>, frame: &Frame) {
    let color = builder.color("point");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            frame.point,
            15.0,
            ShapeStyle::filled(color).with_opacity(0.3),
        ),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            frame.point,
            10.0,
            ShapeStyle::filled(color).with_stroke(Color::WHITE, 2.0),
        ),
    );
}

fn draw_readout(builder: &mut SceneBuilder<'_>, state: &SceneState, frame: &Frame) {
    let unit = point_on_circle(state.progress);
    let circle = builder.color("circle");
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            frame.center.offset(35.0, -15.0),
            format!("{:.1}°", to_degrees(state.progress)),
            14.0,
            TextAnchor::Start,
            circle,
        ),
    );
    let cos_color = builder.color("projectionX");
    let sin_color = builder.color("projectionY");
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            Point::new(frame.point.x, frame.center.y + 25.0),
            format!("cos: {:.2}", unit.x),
            12.0,
            TextAnchor::Middle,
            cos_color,
        ),
    );
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            Point::new(frame.center.x - frame.radius - 10.0, frame.point.y + 5.0),
            format!("sin: {:.2}", unit.y),
            12.0,
            TextAnchor::End,
            sin_color,
        ),
    );
}
