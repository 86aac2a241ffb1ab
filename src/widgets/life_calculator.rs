use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::{polar, to_radians};
use crate::render::{
    Definition, GradientStop, Paint, PathData, SceneBuilder, SceneLayer, ShapeNode,
    ShapeStyle, TextAnchor,
};

use super::{ModeTable, ParamSpec, Preset, WidgetConfig};

const PALETTE: &[(&str, &str)] = &[
    ("barStart", "#4a8ec8"),
    ("barEnd", "#d4af37"),
    ("highlight", "#d4af37"),
    ("text", "#e8dcc4"),
    ("track", "rgba(255, 255, 255, 0.05)"),
    ("trackStroke", "rgba(255, 255, 255, 0.2)"),
];

const fn factor(key: &'static str, label: &'static str, default: f64) -> ParamSpec {
    ParamSpec {
        key,
        label,
        min: 0.0,
        max: 1.0,
        default,
    }
}

/// Τ organization, Κ star type, Φ phase and Σ accessibility, each in `[0, 1]`.
const FACTORS: &[ParamSpec] = &[
    factor(
        "T",
        "Τ Organization: how organized is the local geometry?",
        0.75,
    ),
    factor("K", "Κ Star Type: how Sun-like is the star?", 0.95),
    factor("P", "Φ Phase: where in the 1729 cycle?", 1.0),
    factor("S", "Σ Accessibility: how open is this region?", 0.90),
];

const PRESETS: &[Preset] = &[
    Preset {
        key: "earth",
        name: "Earth's neighborhood",
        mode: None,
        progress: None,
        params: &[("T", 0.75), ("K", 0.95), ("P", 1.0), ("S", 0.90)],
    },
    Preset {
        key: "elliptical",
        name: "Elliptical galaxy",
        mode: None,
        progress: None,
        params: &[("T", 0.10), ("K", 0.50), ("P", 0.50), ("S", 0.20)],
    },
    Preset {
        key: "core",
        name: "Galactic core",
        mode: None,
        progress: None,
        params: &[("T", 0.30), ("K", 0.30), ("P", 0.30), ("S", 0.10)],
    },
    Preset {
        key: "void",
        name: "Intergalactic void",
        mode: None,
        progress: None,
        params: &[("T", 0.01), ("K", 0.10), ("P", 0.10), ("S", 0.10)],
    },
    Preset {
        key: "spiral_arm",
        name: "Spiral arm interior",
        mode: None,
        progress: None,
        params: &[("T", 0.90), ("K", 0.85), ("P", 0.90), ("S", 0.95)],
    },
];

/// Life density gauge: Ω = Τ × Κ × Φ × Σ drawn as a filled wedge.
#[derive(Debug, Clone)]
pub struct LifeCalculator {
    modes: ModeTable,
}

impl LifeCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new().with("omega", draw_gauge),
        }
    }
}

impl Default for LifeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for LifeCalculator {
    fn name(&self) -> &'static str {
        "life-calculator"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn default_size(&self) -> f64 {
        200.0
    }

    fn params(&self) -> &'static [ParamSpec] {
        FACTORS
    }

    fn presets(&self) -> &'static [Preset] {
        PRESETS
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        let omega = omega(state);
        let factors: serde_json::Map<String, Value> = FACTORS
            .iter()
            .map(|spec| (spec.key.to_owned(), json!(factor_value(state, spec))))
            .collect();
        json!({
            "factors": factors,
            "omega": omega,
            "percentage": omega * 100.0,
            "description": describe(omega),
        })
    }
}

fn factor_value(state: &SceneState, spec: &ParamSpec) -> f64 {
    spec.clamp(state.param_or(spec.key, spec.default))
}

fn omega(state: &SceneState) -> f64 {
    FACTORS
        .iter()
        .map(|spec| factor_value(state, spec))
        .product()
}

fn describe(omega: f64) -> &'static str {
    if omega >= 0.5 {
        "HIGHLY LIFE-RICH: Optimal conditions for life"
    } else if omega >= 0.2 {
        "MODERATE: Life possible but not abundant"
    } else if omega >= 0.05 {
        "LOW: Life rare, conditions challenging"
    } else if omega >= 0.01 {
        "VERY LOW: Life extremely rare"
    } else {
        "BARREN: Conditions incompatible with life as we understand it"
    }
}

fn draw_gauge(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let center = builder.center();
    let side = builder.width().min(builder.height());
    let radius = side * 0.4;
    let omega = omega(state);

    let start = builder.color("barStart");
    let end = builder.color("barEnd");
    builder.define(Definition::linear_gradient(
        "lifeGradient",
        &[GradientStop::new(0.0, start), GradientStop::new(1.0, end)],
    ));

    let track = builder.color("track");
    let track_stroke = builder.color("trackStroke");
    builder.push(
        SceneLayer::Background,
        ShapeNode::circle(
            center,
            radius,
            ShapeStyle::filled(track).with_stroke(track_stroke, 2.0),
        ),
    );

    let sweep_degrees = omega * 360.0;
    let fill = ShapeStyle::filled(Paint::reference("lifeGradient"));
    if sweep_degrees >= 360.0 {
        // A closed arc from a point to itself renders nothing in SVG.
        builder.push(
            SceneLayer::Structure,
            ShapeNode::circle(center, radius, fill),
        );
    } else if sweep_degrees > 0.0 {
        let from = polar(center, radius, to_radians(-90.0));
        let to = polar(center, radius, to_radians(sweep_degrees - 90.0));
        let wedge = PathData::new()
            .move_to(center)
            .line_to(from)
            .arc_to(radius, sweep_degrees > 180.0, true, to)
            .close();
        builder.push(SceneLayer::Structure, ShapeNode::path(wedge, fill));
    }

    let highlight = builder.color("highlight");
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center,
            format!("{:.1}%", omega * 100.0),
            side * 0.16,
            TextAnchor::Middle,
            highlight,
        )
        .bold(),
    );
}

#[cfg(test)]
mod tests {
    use super::{LifeCalculator, describe, omega};
    use crate::api::SceneState;
    use crate::render::ColorPalette;
    use crate::widgets::WidgetConfig;
    use approx::assert_relative_eq;

    fn state_with(params: &[(&str, f64)]) -> SceneState {
        params
            .iter()
            .fold(SceneState::new("omega", ColorPalette::default()), |state, (key, value)| {
                state.with_param(*key, *value)
            })
    }

    #[test]
    fn default_factors_give_earth_omega() {
        let state = SceneState::new("omega", ColorPalette::default());
        assert_relative_eq!(omega(&state), 0.75 * 0.95 * 1.0 * 0.9, epsilon = 1e-12);
        assert_eq!(
            describe(omega(&state)),
            "HIGHLY LIFE-RICH: Optimal conditions for life"
        );
    }

    #[test]
    fn void_preset_is_barren() {
        let widget = LifeCalculator::new();
        let void = widget
            .presets()
            .iter()
            .find(|preset| preset.key == "void")
            .expect("void preset");
        let state = state_with(void.params);
        assert_relative_eq!(omega(&state), 0.01 * 0.1 * 0.1 * 0.1, epsilon = 1e-15);
        assert!(describe(omega(&state)).starts_with("BARREN"));
    }

    #[test]
    fn out_of_range_factors_are_clamped() {
        let state = state_with(&[("T", 3.0), ("K", 1.0), ("P", 1.0), ("S", -1.0)]);
        assert_eq!(omega(&state), 0.0);
    }

    #[test]
    fn info_reports_percentage() {
        let widget = LifeCalculator::new();
        let state = state_with(&[("T", 0.5), ("K", 1.0), ("P", 1.0), ("S", 1.0)]);
        let info = widget.derived_info(&state);
        assert_relative_eq!(
            info["percentage"].as_f64().expect("pct"),
            50.0,
            epsilon = 1e-9
        );
        assert_eq!(info["factors"]["T"].as_f64(), Some(0.5));
    }
}
