use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::Point;
use crate::interaction::RegionInfo;
use crate::render::{SceneBuilder, SceneLayer, ShapeNode, ShapeStyle, TextAnchor};

use super::{ModeTable, ParamSpec, Preset, WidgetConfig};

const CONSCIOUSNESS: f64 = 729.0;
const PHYSICAL: f64 = 1000.0;
/// Consciousness plus physical boundary; drawn as the dashed outer sphere.
const INVERSION: f64 = CONSCIOUSNESS + PHYSICAL;
const MAX_DISPLAY_DISTANCE: f64 = 1000.0;

const PALETTE: &[(&str, &str)] = &[
    ("you", "#d4af37"),
    ("consciousness", "#4ecdc4"),
    ("physical", "#ff6b6b"),
    ("sphere", "rgba(255, 255, 255, 0.2)"),
    ("text", "#e8dcc4"),
    ("dim", "rgba(255, 255, 255, 0.5)"),
];

const PARAMS: &[ParamSpec] = &[ParamSpec {
    key: "position",
    label: "Your position in the absolute frame",
    min: 0.0,
    max: 1000.0,
    default: 0.0,
}];

const PRESETS: &[Preset] = &[
    Preset {
        key: "standard",
        name: "Standard observer position",
        mode: None,
        progress: None,
        params: &[("position", 0.0)],
    },
    Preset {
        key: "midpoint",
        name: "Exactly between both boundaries",
        mode: None,
        progress: None,
        params: &[("position", 365.0)],
    },
    Preset {
        key: "consciousness",
        name: "AT the consciousness boundary",
        mode: None,
        progress: None,
        params: &[("position", CONSCIOUSNESS)],
    },
    Preset {
        key: "physical",
        name: "AT the physical boundary",
        mode: None,
        progress: None,
        params: &[("position", PHYSICAL)],
    },
];

/// Observer-centred view: the consciousness and physical boundaries are
/// drawn at their distance from the chosen position, which always sits in
/// the middle.
#[derive(Debug, Clone)]
pub struct ScalarViewer {
    modes: ModeTable,
}

impl ScalarViewer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new().with("relative", draw_relative),
        }
    }
}

impl Default for ScalarViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for ScalarViewer {
    fn name(&self) -> &'static str {
        "scalar-viewer"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn presets(&self) -> &'static [Preset] {
        PRESETS
    }

    fn region_info(&self, _mode: &str, region_id: &str) -> Option<RegionInfo> {
        match region_id {
            "inversion" => Some(RegionInfo::new(
                region_id,
                "Inversion sphere (729 + 1000)",
                INVERSION,
            )),
            "you" => Some(RegionInfo::new(region_id, "You, always at the center", 0.0)),
            _ => None,
        }
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        let position = position(state);
        json!({
            "yourPosition": position,
            "distanceToConsciousness": (CONSCIOUSNESS - position).abs(),
            "distanceToPhysical": (PHYSICAL - position).abs(),
            "description": nearest_boundary(position),
            "positionDescription": position_description(position),
        })
    }
}

fn position(state: &SceneState) -> f64 {
    state.param_or("position", PARAMS[0].default)
}

fn nearest_boundary(position: f64) -> &'static str {
    let to_consciousness = (CONSCIOUSNESS - position).abs();
    let to_physical = (PHYSICAL - position).abs();
    if to_consciousness < to_physical {
        "Consciousness is closer to you than physical reality"
    } else if to_physical < to_consciousness {
        "Physical reality is closer to you than consciousness"
    } else {
        "You are equidistant from both boundaries"
    }
}

#[allow(clippy::float_cmp)]
fn position_description(position: f64) -> &'static str {
    if position == 0.0 {
        "Standard observer position"
    } else if position < 365.0 {
        "Closer to consciousness than physical"
    } else if position == 365.0 {
        "Exactly between both boundaries"
    } else if position < CONSCIOUSNESS {
        "Moving toward consciousness boundary"
    } else if position == CONSCIOUSNESS {
        "AT the consciousness boundary"
    } else if position < PHYSICAL {
        "Past consciousness, approaching physical"
    } else if position == PHYSICAL {
        "AT the physical boundary"
    } else {
        "Beyond physical boundary"
    }
}

/// Whole distances print without decimals.
fn format_distance(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{distance:.0}")
    } else {
        format!("{distance:.1}")
    }
}

fn draw_relative(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let center = builder.center();
    let size = builder.width().min(builder.height());
    let max_radius = size * 0.42;
    let position = position(state);

    let sphere = builder.color("sphere");
    builder.push(
        SceneLayer::Background,
        ShapeNode::circle(
            center,
            max_radius,
            ShapeStyle::stroked(sphere, 1.0).with_dash(4.0, 4.0),
        )
        .with_region("inversion"),
    );

    let to_consciousness = (CONSCIOUSNESS - position).abs();
    let radius = to_consciousness / MAX_DISPLAY_DISTANCE * max_radius;
    let color = builder.color("consciousness");
    // Zero radius means the observer sits on the boundary; the builder drops it.
    if builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(center, radius, ShapeStyle::stroked(color, 2.0)),
    ) {
        let dim = builder.color("dim");
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(center.x, center.y - radius - 15.0),
                "CONSCIOUSNESS",
                12.0,
                TextAnchor::Middle,
                color,
            ),
        );
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(center.x, center.y - radius + 15.0),
                format!("{} away", format_distance(to_consciousness)),
                10.0,
                TextAnchor::Middle,
                dim,
            ),
        );
    }

    let to_physical = (PHYSICAL - position).abs();
    let radius = to_physical / MAX_DISPLAY_DISTANCE * max_radius;
    let color = builder.color("physical");
    if builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(center, radius, ShapeStyle::stroked(color, 2.0)),
    ) {
        let dim = builder.color("dim");
        let label_y = center.y + radius + 15.0;
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(center.x, label_y),
                "PHYSICAL",
                12.0,
                TextAnchor::Middle,
                color,
            ),
        );
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(center.x, label_y + 15.0),
                format!("{} away", format_distance(to_physical)),
                10.0,
                TextAnchor::Middle,
                dim,
            ),
        );
    }

    draw_observer(builder, center);

    let text = builder.color("text");
    let footer = Point::new(center.x, builder.height() - 30.0);
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            footer,
            position_description(position),
            11.0,
            TextAnchor::Middle,
            text,
        ),
    );
}

fn draw_observer(builder: &mut SceneBuilder<'_>, center: Point) {
    let you = builder.color("you");
    let dim = builder.color("dim");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(center, 25.0, ShapeStyle::filled(you).with_opacity(0.3)),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(center, 12.0, ShapeStyle::filled(you)).with_region("you"),
    );
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center.offset(0.0, 35.0),
            "YOU",
            14.0,
            TextAnchor::Middle,
            you,
        )
        .bold(),
    );
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center.offset(0.0, 50.0),
            "(always at center)",
            10.0,
            TextAnchor::Middle,
            dim,
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::{format_distance, nearest_boundary, position_description};

    #[test]
    fn position_descriptions_follow_boundaries() {
        assert_eq!(position_description(0.0), "Standard observer position");
        assert_eq!(
            position_description(200.0),
            "Closer to consciousness than physical"
        );
        assert_eq!(
            position_description(365.0),
            "Exactly between both boundaries"
        );
        assert_eq!(
            position_description(500.0),
            "Moving toward consciousness boundary"
        );
        assert_eq!(position_description(729.0), "AT the consciousness boundary");
        assert_eq!(
            position_description(900.0),
            "Past consciousness, approaching physical"
        );
        assert_eq!(position_description(1000.0), "AT the physical boundary");
    }

    #[test]
    fn midway_between_boundaries_is_equidistant() {
        assert_eq!(
            nearest_boundary(864.5),
            "You are equidistant from both boundaries"
        );
        assert_eq!(
            nearest_boundary(0.0),
            "Consciousness is closer to you than physical reality"
        );
    }

    #[test]
    fn whole_distances_have_no_decimals() {
        assert_eq!(format_distance(729.0), "729");
        assert_eq!(format_distance(0.5), "0.5");
    }
}
