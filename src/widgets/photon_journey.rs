use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::{Point, TAU, Viewport};
use crate::render::{
    Color, Definition, GradientStop, Paint, SceneBuilder, SceneLayer, ShapeNode, ShapeStyle,
    TextAnchor,
};

use super::{ModeTable, WidgetConfig};

const PALETTE: &[(&str, &str)] = &[
    ("photon", "#d4af37"),
    ("sunCore", "#ff6b6b"),
    ("sunSurface", "#f39c12"),
    ("space", "#4a8ec8"),
    ("earth", "#4ecdc4"),
    ("text", "#e8dcc4"),
    ("dim", "rgba(255, 255, 255, 0.5)"),
    ("track", "rgba(255, 255, 255, 0.2)"),
];

const SUN_RADIUS: f64 = 45.0;
const EARTH_RADIUS: f64 = 20.0;
/// Progress at which the photon leaves the photosphere.
const ESCAPE: f64 = 0.4;

/// A photon's trip from the solar core to an eye on Earth, driven by unit
/// progress.
#[derive(Debug, Clone)]
pub struct PhotonJourney {
    modes: ModeTable,
}

impl PhotonJourney {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new().with("journey", draw_journey),
        }
    }
}

impl Default for PhotonJourney {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for PhotonJourney {
    fn name(&self) -> &'static str {
        "photon-journey"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn default_size(&self) -> f64 {
        600.0
    }

    /// Twice as wide as tall.
    fn viewport(&self, size: f64) -> Viewport {
        let square = Viewport::square(size);
        Viewport::new(square.width, square.height / 2)
    }

    fn tick_delta(&self, _mode: &str) -> f64 {
        0.002
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        journey_info(state.progress)
    }
}

/// Phase key for unit progress.
#[must_use]
pub fn phase_at(progress: f64) -> &'static str {
    match progress {
        p if p < 0.15 => "core",
        p if p < 0.25 => "radiative",
        p if p < 0.35 => "convective",
        p if p < 0.42 => "surface",
        p if p < 0.95 => "space",
        p if p < 0.99 => "atmosphere",
        _ => "eye",
    }
}

fn phase_description(phase: &str) -> &'static str {
    match phase {
        "core" => "Born in nuclear fusion at 15 million °C",
        "radiative" => "Bouncing through dense plasma",
        "convective" => "Carried upward by convection currents",
        "surface" => "Breaking free from the photosphere",
        "space" => "Traveling at 299,792 km/s through empty space",
        "atmosphere" => "Passing through Earth's atmosphere",
        "eye" => "Absorbed by your retina, journey complete",
        _ => "",
    }
}

fn journey_info(progress: f64) -> Value {
    let phase = phase_at(progress);
    let (age, wavelength, energy) = if progress < ESCAPE {
        let wavelength = if progress < 0.2 { "Gamma Ray" } else { "X-Ray" };
        (
            json!((progress * 250_000.0).round()),
            wavelength,
            100.0 - progress * 150.0,
        )
    } else {
        let minutes = ((progress - ESCAPE) / (1.0 - ESCAPE) * 8.0 * 100.0).round() / 100.0;
        let age = if minutes > 0.0 {
            json!(format!("100,000 years + {minutes:.1} min"))
        } else {
            json!(100_000)
        };
        (age, "Visible Light", 40.0)
    };
    json!({
        "progress": progress,
        "phase": phase,
        "ageYears": age,
        "wavelength": wavelength,
        "energy": energy.round().max(0.0),
        "description": phase_description(phase),
    })
}

fn draw_journey(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    let progress = state.progress;
    let width = builder.width();
    let height = builder.height();
    let center_y = height / 2.0;
    let sun = Point::new(50.0, center_y);
    let earth = Point::new(width - 50.0, center_y);

    add_defs(builder);
    draw_sun(builder, sun);
    draw_track(builder, Point::new(90.0, center_y), width - 180.0, progress);
    draw_earth(builder, earth);
    draw_photon(builder, photon_position(progress, sun, earth));
    draw_phase_labels(builder, width, height);
    if progress < ESCAPE {
        draw_bounces(builder, sun, progress);
    }
}

fn add_defs(builder: &mut SceneBuilder<'_>) {
    let core = builder.color("sunCore");
    let surface = builder.color("sunSurface");
    builder.define(Definition::radial_gradient(
        "sunGradient",
        &[
            GradientStop::new(0.0, Color::from_rgba8(0xff, 0xf5, 0xe0, 1.0)),
            GradientStop::new(0.3, core),
            GradientStop::new(0.7, surface),
            GradientStop::new(1.0, surface.with_alpha(0.5)),
        ],
    ));
    builder.define(Definition::radial_gradient(
        "earthGradient",
        &[
            GradientStop::new(0.0, Color::from_rgba8(0x4e, 0xcd, 0xc4, 1.0)),
            GradientStop::new(0.5, Color::from_rgba8(0x34, 0x98, 0xdb, 1.0)),
            GradientStop::new(1.0, Color::from_rgba8(0x29, 0x80, 0xb9, 1.0)),
        ],
    ));
    builder.define(Definition::glow("photonGlow", 4.0));
}

fn draw_sun(builder: &mut SceneBuilder<'_>, center: Point) {
    let surface = builder.color("sunSurface");
    builder.push(
        SceneLayer::Background,
        ShapeNode::circle(
            center,
            SUN_RADIUS + 10.0,
            ShapeStyle::filled(surface).with_opacity(0.3),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center,
            SUN_RADIUS,
            ShapeStyle::filled(Paint::reference("sunGradient")),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center,
            15.0,
            ShapeStyle::filled(Color::WHITE).with_opacity(0.8),
        ),
    );
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center.offset(0.0, SUN_RADIUS + 20.0),
            "SUN",
            12.0,
            TextAnchor::Middle,
            surface,
        )
        .bold(),
    );
}

fn draw_earth(builder: &mut SceneBuilder<'_>, center: Point) {
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center,
            EARTH_RADIUS,
            ShapeStyle::filled(Paint::reference("earthGradient")),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center.offset(-5.0, -5.0),
            5.0,
            ShapeStyle::filled(Color::WHITE).with_opacity(0.8),
        ),
    );
    let earth = builder.color("earth");
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center.offset(0.0, EARTH_RADIUS + 20.0),
            "YOUR EYE",
            12.0,
            TextAnchor::Middle,
            earth,
        )
        .bold(),
    );
}

fn draw_track(builder: &mut SceneBuilder<'_>, start: Point, length: f64, progress: f64) {
    let track = builder.color("track");
    builder.push(
        SceneLayer::Background,
        ShapeNode::line(
            start,
            start.offset(length, 0.0),
            ShapeStyle::stroked(track, 2.0).with_dash(5.0, 5.0),
        ),
    );
    let covered = progress * length;
    if covered > 0.0 {
        let photon = builder.color("photon");
        builder.push(
            SceneLayer::Structure,
            ShapeNode::line(
                start,
                start.offset(covered, 0.0),
                ShapeStyle::stroked(photon, 3.0),
            ),
        );
    }
}

/// Spirals outward inside the sun, then travels in a straight line.
fn photon_position(progress: f64, sun: Point, earth: Point) -> Point {
    if progress < ESCAPE {
        let angle = progress * 200.0 + (progress * 50.0).sin() * 2.0;
        let r = (SUN_RADIUS * (0.8 - progress * 1.5)).max(5.0);
        Point::new(sun.x + angle.cos() * r, sun.y + angle.sin() * r * 0.5)
    } else {
        let travel = earth.x - sun.x;
        let space_progress = (progress - ESCAPE) / (1.0 - ESCAPE);
        Point::new(sun.x + SUN_RADIUS + space_progress * (travel - 65.0), sun.y)
    }
}

fn draw_photon(builder: &mut SceneBuilder<'_>, position: Point) {
    let photon = builder.color("photon");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            position,
            12.0,
            ShapeStyle::filled(photon)
                .with_opacity(0.4)
                .with_filter("photonGlow"),
        ),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(position, 6.0, ShapeStyle::filled(photon)),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            position.offset(-1.0, -1.0),
            2.0,
            ShapeStyle::filled(Color::WHITE),
        ),
    );
}

fn draw_bounces(builder: &mut SceneBuilder<'_>, sun: Point, progress: f64) {
    let count = ((progress * 30.0).floor() as usize).min(10);
    let photon = builder.color("photon");
    for i in 0..count {
        let from_angle = i as f64 / count as f64 * TAU;
        let to_angle = (i as f64 + 0.5) / count as f64 * TAU;
        let from_radius = 15.0 + builder.unit() * 25.0;
        let to_radius = 15.0 + builder.unit() * 25.0;
        let from = Point::new(
            sun.x + from_angle.cos() * from_radius,
            sun.y + from_angle.sin() * from_radius * 0.6,
        );
        let to = Point::new(
            sun.x + to_angle.cos() * to_radius,
            sun.y + to_angle.sin() * to_radius * 0.6,
        );
        builder.push(
            SceneLayer::Structure,
            ShapeNode::line(from, to, ShapeStyle::stroked(photon, 1.0).with_opacity(0.3)),
        );
    }
}

fn draw_phase_labels(builder: &mut SceneBuilder<'_>, width: f64, height: f64) {
    let label_y = height - 25.0;
    let markers = [
        (50.0, "BIRTH", "100,000 years ago"),
        (width * 0.4, "ESCAPE", "breaks free"),
        (width - 50.0, "NOW", "8 min later"),
    ];
    let dim = builder.color("dim");
    let text = builder.color("text");
    for (x, label, sublabel) in markers {
        builder.push(
            SceneLayer::Labels,
            ShapeNode::line(
                Point::new(x, height / 2.0 + 30.0),
                Point::new(x, height / 2.0 + 40.0),
                ShapeStyle::stroked(dim, 1.0),
            ),
        );
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(x, label_y - 12.0),
                label,
                10.0,
                TextAnchor::Middle,
                text,
            )
            .bold(),
        );
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(
                Point::new(x, label_y + 2.0),
                sublabel,
                9.0,
                TextAnchor::Middle,
                dim,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{journey_info, phase_at};
    use approx::assert_relative_eq;

    #[test]
    fn phases_follow_progress_thresholds() {
        assert_eq!(phase_at(0.0), "core");
        assert_eq!(phase_at(0.2), "radiative");
        assert_eq!(phase_at(0.3), "convective");
        assert_eq!(phase_at(0.41), "surface");
        assert_eq!(phase_at(0.5), "space");
        assert_eq!(phase_at(0.97), "atmosphere");
        assert_eq!(phase_at(1.0), "eye");
    }

    #[test]
    fn info_inside_the_sun_counts_years() {
        let info = journey_info(0.3);
        assert_eq!(info["phase"], "convective");
        assert_eq!(info["wavelength"], "X-Ray");
        assert_relative_eq!(info["ageYears"].as_f64().expect("number"), 75_000.0);
        assert_relative_eq!(info["energy"].as_f64().expect("number"), 55.0);
    }

    #[test]
    fn info_in_space_reports_travel_minutes() {
        let info = journey_info(1.0);
        assert_eq!(info["ageYears"], "100,000 years + 8.0 min");
        assert_eq!(info["wavelength"], "Visible Light");
    }
}
