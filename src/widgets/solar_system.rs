use std::f64::consts::PI;

use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::{Point, TAU, Viewport, polar};
use crate::interaction::RegionInfo;
use crate::playback::ProgressBound;
use crate::render::{
    Color, Definition, GradientStop, Paint, PathData, SceneBuilder, SceneLayer, ShapeNode,
    ShapeStyle, TextAnchor,
};

use super::{ModeTable, WidgetConfig};

const PALETTE: &[(&str, &str)] = &[
    ("sun", "#f39c12"),
    ("sunGlow", "rgba(243, 156, 18, 0.3)"),
    ("earth", "#4ecdc4"),
    ("earthGlow", "rgba(78, 205, 196, 0.3)"),
    ("balancePoint", "#d4af37"),
    ("jupiter", "#e67e22"),
    ("mars", "#e74c3c"),
    ("orbit", "rgba(255, 255, 255, 0.2)"),
    ("faintOrbit", "rgba(255, 255, 255, 0.1)"),
    ("trail", "rgba(243, 156, 18, 0.5)"),
    ("earthTrail", "rgba(78, 205, 196, 0.4)"),
    ("text", "#e8dcc4"),
    ("dim", "rgba(255, 255, 255, 0.5)"),
    ("galacticCenter", "#9b59b6"),
    ("spiralArm", "rgba(100, 100, 200, 0.3)"),
    ("nearbyStars", "#ffffff"),
];

/// Orbital period (years) and distance (AU).
struct Orbit {
    period: f64,
    distance: f64,
}

impl Orbit {
    const fn new(period: f64, distance: f64) -> Self {
        Self { period, distance }
    }
}

const EARTH: Orbit = Orbit::new(1.0, 1.0);
const MARS: Orbit = Orbit::new(1.88, 1.52);
const JUPITER: Orbit = Orbit::new(11.86, 5.2);
const GALACTIC_YEAR: f64 = 225_000_000.0;
/// Sun's distance from the galactic center at 500 ly per pixel.
const GALACTIC_ORBIT_PX: f64 = 52.0;
const LOCAL_MODES: [&str; 3] = ["earth_center", "sun_center", "both_true"];

struct NearbyStar {
    key: &'static str,
    name: &'static str,
    distance_ly: f64,
    right_ascension: f64,
    z: f64,
    magnitude: f64,
    spectral: char,
    highlight: bool,
}

#[rustfmt::skip]
const NEARBY_STARS: [NearbyStar; 10] = [
    NearbyStar { key: "proxima", name: "Proxima Centauri", distance_ly: 4.24, right_ascension: 217.4, z: -1.0, magnitude: 11.1, spectral: 'M', highlight: false },
    NearbyStar { key: "alpha_centauri", name: "Alpha Centauri A", distance_ly: 4.37, right_ascension: 219.9, z: -0.9, magnitude: 0.0, spectral: 'G', highlight: false },
    NearbyStar { key: "barnard", name: "Barnard's Star", distance_ly: 5.96, right_ascension: 269.5, z: 5.0, magnitude: 9.5, spectral: 'M', highlight: false },
    NearbyStar { key: "wolf_359", name: "Wolf 359", distance_ly: 7.86, right_ascension: 164.1, z: 4.7, magnitude: 13.5, spectral: 'M', highlight: false },
    NearbyStar { key: "sirius", name: "SIRIUS", distance_ly: 8.60, right_ascension: 101.3, z: -1.8, magnitude: -1.5, spectral: 'A', highlight: true },
    NearbyStar { key: "ross_154", name: "Ross 154", distance_ly: 9.69, right_ascension: 283.3, z: -2.5, magnitude: 10.4, spectral: 'M', highlight: false },
    NearbyStar { key: "epsilon_eridani", name: "Epsilon Eridani", distance_ly: 10.5, right_ascension: 53.2, z: -8.1, magnitude: 3.7, spectral: 'K', highlight: false },
    NearbyStar { key: "tau_ceti", name: "Tau Ceti", distance_ly: 11.9, right_ascension: 26.0, z: -10.9, magnitude: 3.5, spectral: 'G', highlight: false },
    NearbyStar { key: "procyon", name: "Procyon", distance_ly: 11.5, right_ascension: 114.8, z: 1.0, magnitude: 0.4, spectral: 'F', highlight: false },
    NearbyStar { key: "luyten", name: "Luyten's Star", distance_ly: 12.4, right_ascension: 109.9, z: 1.2, magnitude: 9.9, spectral: 'M', highlight: false },
];

/// Earth-centered, sun-centered and barycentric views of the inner solar
/// system, plus the solar neighborhood and the Sun's galactic orbit.
///
/// Progress is elapsed simulated time in years and never wraps.
///
/// View and scale share one flat mode list: the three local views come
/// first, then the `solar` and `galactic` scales, and `cycle_mode` walks
/// all five in that order. Switching between two local views keeps the
/// clock; any switch that changes the scale restarts it at zero.
#[derive(Debug, Clone)]
pub struct SolarSystemMotion {
    modes: ModeTable,
}

impl SolarSystemMotion {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new()
                .with("earth_center", draw_earth_centered)
                .with("sun_center", draw_sun_centered)
                .with("both_true", draw_both_true)
                .with("solar", draw_solar_neighborhood)
                .with("galactic", draw_galactic),
        }
    }
}

impl Default for SolarSystemMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for SolarSystemMotion {
    fn name(&self) -> &'static str {
        "solar-system-motion"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn progress_bound(&self) -> ProgressBound {
        ProgressBound::Unbounded
    }

    fn tick_delta(&self, mode: &str) -> f64 {
        match mode {
            "solar" => 0.005,
            "galactic" => 1_000_000.0,
            _ => 0.008,
        }
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        let time = state.progress;
        let (view, scale) = if is_local(&state.mode) {
            (state.mode.as_str(), "local")
        } else {
            ("earth_center", state.mode.as_str())
        };
        json!({
            "time": time,
            "viewMode": view,
            "scaleMode": scale,
            "earthYear": time / EARTH.period,
            "galacticYear": time / GALACTIC_YEAR,
            "description": description(&state.mode),
        })
    }

    fn region_info(&self, mode: &str, region_id: &str) -> Option<RegionInfo> {
        if mode != "solar" {
            return None;
        }
        NEARBY_STARS
            .iter()
            .find(|star| star.key == region_id)
            .map(|star| RegionInfo::new(star.key, star.name, star.distance_ly))
    }

    fn mode_payload(&self, mode: &str) -> Value {
        let (label, sublabel) = mode_labels(mode);
        json!({
            "mode": mode,
            "label": label,
            "sublabel": sublabel,
            "description": description(mode),
        })
    }

    fn trail_capacity(&self) -> usize {
        150
    }

    fn trail_samples(&self, state: &SceneState, viewport: Viewport) -> Vec<(&'static str, Point)> {
        let center = viewport.center();
        let time = state.progress;
        match state.mode.as_str() {
            "earth_center" => vec![("sun", sun_seen_from_earth(center, time))],
            "sun_center" => vec![("earth", orbit_position(center, &EARTH, 20.0, time))],
            "both_true" => {
                let system = Barycentric::at(center, time);
                vec![("sun", system.sun), ("earth", system.earth)]
            }
            "galactic" => vec![("galactic", galactic_sun(center, time))],
            _ => Vec::new(),
        }
    }

    /// Switching between local views and the larger scales restarts the clock.
    fn resets_progress_on_mode_change(&self, from: &str, to: &str) -> bool {
        scale_of(from) != scale_of(to)
    }
}

fn is_local(mode: &str) -> bool {
    LOCAL_MODES.iter().any(|local| *local == mode)
}

fn scale_of(mode: &str) -> &str {
    if is_local(mode) { "local" } else { mode }
}

fn description(mode: &str) -> &'static str {
    match mode {
        "galactic" => {
            "The Sun takes 225 million years to orbit the Milky Way. We are in the Orion Arm, 26,000 light-years from center."
        }
        "solar" => {
            "Our Sun is one of billions. The nearest star, Proxima Centauri, is 4.2 light-years away."
        }
        "earth_center" => {
            "From Earth, the Sun appears to orbit us once per year. This is your direct experience."
        }
        "sun_center" => {
            "From an external view, Earth orbits the Sun. This is the simplified school model."
        }
        "both_true" => {
            "Both views are mathematically valid. The \"center\" depends on where you stand."
        }
        _ => "",
    }
}

fn mode_labels(mode: &str) -> (&'static str, &'static str) {
    match mode {
        "galactic" => (
            "GALACTIC SCALE",
            "Sun orbits the Milky Way: 225 million years per orbit",
        ),
        "solar" => (
            "SOLAR NEIGHBORHOOD",
            "Our Sun among nearby stars (within 50 light-years)",
        ),
        "sun_center" => ("SUN-CENTERED", "The school version (Copernicus)"),
        "both_true" => (
            "BOTH ARE TRUE",
            "Observer position determines center (Tycho/Epoch)",
        ),
        _ => ("EARTH-CENTERED", "As you experience it (Ptolemy)"),
    }
}

fn orbit_angle(orbit: &Orbit, time: f64) -> f64 {
    time / orbit.period * TAU
}

fn orbit_position(center: Point, orbit: &Orbit, scale: f64, time: f64) -> Point {
    polar(center, orbit.distance * scale, orbit_angle(orbit, time))
}

fn sun_seen_from_earth(center: Point, time: f64) -> Point {
    orbit_position(center, &EARTH, 25.0, time)
}

fn galactic_sun(center: Point, time: f64) -> Point {
    polar(center, GALACTIC_ORBIT_PX, time / GALACTIC_YEAR * TAU)
}

/// Bodies around a balance point that shifts with Jupiter.
struct Barycentric {
    balance: Point,
    sun: Point,
    earth: Point,
    jupiter: Point,
    earth_distance: f64,
    jupiter_distance: f64,
}

impl Barycentric {
    const SCALE: f64 = 18.0;

    fn at(center: Point, time: f64) -> Self {
        let earth_angle = orbit_angle(&EARTH, time);
        let jupiter_angle = orbit_angle(&JUPITER, time);
        let balance = polar(center, 8.0, jupiter_angle + PI);
        let earth_distance = EARTH.distance * Self::SCALE;
        let jupiter_distance = JUPITER.distance * Self::SCALE * 0.5;
        Self {
            balance,
            sun: polar(balance, 12.0, jupiter_angle + PI),
            earth: polar(balance, earth_distance, earth_angle),
            jupiter: polar(balance, jupiter_distance, jupiter_angle),
            earth_distance,
            jupiter_distance,
        }
    }
}

fn add_defs(builder: &mut SceneBuilder<'_>) {
    let sun = builder.color("sun");
    let earth = builder.color("earth");
    builder.define(Definition::glow("sunGlow", 4.0));
    builder.define(Definition::radial_gradient(
        "sunGrad",
        &[
            GradientStop::new(0.0, Color::from_rgba8(0xff, 0xf5, 0xe0, 1.0)),
            GradientStop::new(0.5, sun),
            GradientStop::new(1.0, Color::from_rgba8(0xe6, 0x7e, 0x22, 1.0)),
        ],
    ));
    builder.define(Definition::radial_gradient(
        "earthGrad",
        &[
            GradientStop::new(0.0, Color::from_rgba8(0x81, 0xec, 0xec, 1.0)),
            GradientStop::new(0.5, earth),
            GradientStop::new(1.0, Color::from_rgba8(0x00, 0xb8, 0x94, 1.0)),
        ],
    ));
}

fn label(builder: &mut SceneBuilder<'_>, at: Point, text: &str, role: &str, size: f64, bold: bool) {
    let color = builder.color(role);
    let node = ShapeNode::text(at, text, size, TextAnchor::Middle, color);
    builder.push(SceneLayer::Labels, if bold { node.bold() } else { node });
}

fn draw_orbit(builder: &mut SceneBuilder<'_>, center: Point, radius: f64, role: &str) {
    let color = builder.color(role);
    builder.push(
        SceneLayer::Background,
        ShapeNode::circle(
            center,
            radius,
            ShapeStyle::stroked(color, 1.0).with_dash(4.0, 4.0),
        ),
    );
}

fn draw_sun(builder: &mut SceneBuilder<'_>, at: Point, radius: f64, emphasized: bool) {
    let glow = builder.color("sunGlow");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            at,
            radius + 6.0,
            ShapeStyle::filled(glow).with_filter("sunGlow"),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(at, radius, ShapeStyle::filled(Paint::reference("sunGrad")))
            .with_region("sun"),
    );
    if emphasized {
        let sun = builder.color("sun");
        builder.push(
            SceneLayer::Structure,
            ShapeNode::circle(at, radius + 3.0, ShapeStyle::stroked(sun, 2.0)),
        );
    }
}

fn draw_earth(builder: &mut SceneBuilder<'_>, at: Point, radius: f64, emphasized: bool) {
    let glow = builder.color("earthGlow");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(at, radius + 4.0, ShapeStyle::filled(glow)),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            at,
            radius,
            ShapeStyle::filled(Paint::reference("earthGrad")),
        )
        .with_region("earth"),
    );
    if emphasized {
        let earth = builder.color("earth");
        builder.push(
            SceneLayer::Structure,
            ShapeNode::circle(at, radius + 3.0, ShapeStyle::stroked(earth, 2.0)),
        );
    }
}

fn draw_planet(
    builder: &mut SceneBuilder<'_>,
    at: Point,
    radius: f64,
    role: &str,
    name: Option<&str>,
) {
    let color = builder.color(role);
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(at, radius, ShapeStyle::filled(color)),
    );
    if let Some(name) = name {
        label(
            builder,
            at.offset(0.0, radius + 12.0),
            name,
            "dim",
            9.0,
            false,
        );
    }
}

fn draw_trail(builder: &mut SceneBuilder<'_>, state: &SceneState, name: &str, role: &str) {
    if !state.show_trail {
        return;
    }
    let points = builder.trail(name);
    if points.len() < 2 {
        return;
    }
    let color = builder.color(role);
    builder.push(
        SceneLayer::Structure,
        ShapeNode::path(
            PathData::polyline(&points),
            ShapeStyle::stroked(color, 2.0).with_opacity(0.6),
        ),
    );
}

fn draw_mode_label(builder: &mut SceneBuilder<'_>, mode: &str) {
    let (title, subtitle) = mode_labels(mode);
    let x = builder.width() / 2.0;
    label(builder, Point::new(x, 22.0), title, "text", 13.0, true);
    label(builder, Point::new(x, 38.0), subtitle, "dim", 10.0, false);
}

fn draw_earth_centered(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let center = builder.center();
    let time = state.progress;
    draw_orbit(builder, center, EARTH.distance * 25.0, "orbit");
    draw_earth(builder, center, 20.0, true);

    let sun_angle = orbit_angle(&EARTH, time);
    draw_sun(builder, sun_seen_from_earth(center, time), 15.0, false);

    // Retrograde loop: Mars rides an epicycle on the Sun's deferent.
    let epicycle = orbit_angle(&MARS, time) - sun_angle;
    let mars = polar(polar(center, 50.0, sun_angle), 30.0, epicycle);
    draw_planet(builder, mars, 6.0, "mars", Some("Mars"));

    draw_trail(builder, state, "sun", "trail");
    label(
        builder,
        center.offset(0.0, 35.0),
        "EARTH",
        "earth",
        11.0,
        true,
    );
    label(
        builder,
        center.offset(0.0, 48.0),
        "(You are here)",
        "dim",
        9.0,
        false,
    );
    draw_mode_label(builder, &state.mode);
}

fn draw_sun_centered(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    const SCALE: f64 = 20.0;
    add_defs(builder);
    let center = builder.center();
    let time = state.progress;
    draw_orbit(builder, center, EARTH.distance * SCALE, "orbit");
    draw_orbit(builder, center, MARS.distance * SCALE, "orbit");
    // Jupiter's orbit is drawn at 60% so it fits.
    draw_orbit(builder, center, JUPITER.distance * SCALE * 0.6, "orbit");

    draw_sun(builder, center, 22.0, true);
    draw_earth(
        builder,
        orbit_position(center, &EARTH, SCALE, time),
        10.0,
        false,
    );
    draw_planet(
        builder,
        orbit_position(center, &MARS, SCALE, time),
        7.0,
        "mars",
        None,
    );
    draw_planet(
        builder,
        orbit_position(center, &JUPITER, SCALE * 0.6, time),
        12.0,
        "jupiter",
        None,
    );

    draw_trail(builder, state, "earth", "earthGlow");
    label(builder, center.offset(0.0, 38.0), "SUN", "sun", 11.0, true);
    label(
        builder,
        center.offset(0.0, 51.0),
        "(Center of gravity)",
        "dim",
        9.0,
        false,
    );
    draw_mode_label(builder, &state.mode);
}

fn draw_both_true(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let center = builder.center();
    let system = Barycentric::at(center, state.progress);

    draw_orbit(builder, system.balance, system.earth_distance, "faintOrbit");
    draw_orbit(
        builder,
        system.balance,
        system.jupiter_distance,
        "faintOrbit",
    );
    draw_balance_point(builder, system.balance);

    draw_sun(builder, system.sun, 20.0, false);
    draw_earth(builder, system.earth, 12.0, false);
    draw_planet(builder, system.jupiter, 14.0, "jupiter", None);

    draw_trail(builder, state, "sun", "trail");
    draw_trail(builder, state, "earth", "earthTrail");

    for (body, role) in [(system.sun, "sunGlow"), (system.earth, "earthGlow")] {
        let color = builder.color(role);
        builder.push(
            SceneLayer::Markers,
            ShapeNode::line(
                body,
                system.balance,
                ShapeStyle::stroked(color, 1.0).with_dash(2.0, 2.0),
            ),
        );
    }

    label(
        builder,
        system.balance.offset(0.0, -20.0),
        "BALANCE",
        "balancePoint",
        10.0,
        true,
    );
    label(
        builder,
        system.balance.offset(0.0, -8.0),
        "POINT",
        "balancePoint",
        10.0,
        true,
    );
    draw_mode_label(builder, &state.mode);
}

fn draw_balance_point(builder: &mut SceneBuilder<'_>, at: Point) {
    const ARM: f64 = 8.0;
    let color = builder.color("balancePoint");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::line(
            at.offset(-ARM, 0.0),
            at.offset(ARM, 0.0),
            ShapeStyle::stroked(color, 2.0),
        ),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::line(
            at.offset(0.0, -ARM),
            at.offset(0.0, ARM),
            ShapeStyle::stroked(color, 2.0),
        ),
    );
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            at,
            ARM + 4.0,
            ShapeStyle::stroked(color, 1.0).with_dash(3.0, 3.0),
        ),
    );
}

fn star_color(builder: &SceneBuilder<'_>, spectral: char) -> Color {
    match spectral {
        'M' => Color::from_rgba8(0xff, 0x6b, 0x6b, 1.0),
        'K' => Color::from_rgba8(0xff, 0xa9, 0x4d, 1.0),
        'G' => Color::from_rgba8(0xff, 0xf1, 0x76, 1.0),
        'F' => Color::from_rgba8(0xff, 0xff, 0xb0, 1.0),
        'A' => Color::from_rgba8(0xb3, 0xe5, 0xfc, 1.0),
        _ => builder.color("nearbyStars"),
    }
}

fn draw_solar_neighborhood(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    const LY_SCALE: f64 = 12.0;
    add_defs(builder);
    let center = builder.center();
    let size = builder.viewport().min_side();

    draw_dark_zone(builder, center, PI, size);

    let ring = Color::from_rgba8(255, 255, 255, 0.08);
    for distance in [5.0, 10.0, 15.0] {
        builder.push(
            SceneLayer::Background,
            ShapeNode::circle(
                center,
                distance * LY_SCALE,
                ShapeStyle::stroked(ring, 1.0).with_dash(4.0, 4.0),
            ),
        );
        label(
            builder,
            center.offset(distance * LY_SCALE + 8.0, 0.0),
            &format!("{distance} ly"),
            "dim",
            8.0,
            false,
        );
    }

    // Twelve-year wobble from Jupiter, barely visible at this scale.
    let wobble = polar(center, 0.3, state.progress / 12.0 * TAU);
    draw_sun(builder, wobble, 14.0, true);
    label(
        builder,
        center.offset(0.0, 32.0),
        "OUR SUN",
        "sun",
        11.0,
        true,
    );
    label(
        builder,
        center.offset(0.0, 44.0),
        "s = 0 (you are here)",
        "dim",
        8.0,
        false,
    );

    let sirius_glow = Color::from_rgba8(179, 229, 252, 0.3);
    for star in &NEARBY_STARS {
        let projected = (star.distance_ly * LY_SCALE).min(size * 0.42);
        let at = polar(center, projected, star.right_ascension.to_radians())
            .offset(0.0, star.z * 1.5);
        let radius = if star.magnitude < 1.0 {
            6.0
        } else if star.magnitude < 4.0 {
            4.0
        } else {
            3.0
        };
        if star.highlight {
            builder.push(
                SceneLayer::Markers,
                ShapeNode::circle(
                    at,
                    12.0,
                    ShapeStyle::filled(sirius_glow).with_filter("sunGlow"),
                ),
            );
        }
        let color = star_color(builder, star.spectral);
        let style = if state.is_highlighted(star.key) {
            ShapeStyle::filled(color).with_stroke(builder.color("text"), 1.5)
        } else {
            ShapeStyle::filled(color)
        };
        builder.push(
            SceneLayer::Markers,
            ShapeNode::circle(at, radius, style).with_region(star.key),
        );

        if star.magnitude < 4.0 || star.highlight {
            let label_at = at.offset(0.0, radius + 12.0);
            if star.highlight {
                let node = ShapeNode::text(
                    label_at,
                    star.name,
                    10.0,
                    TextAnchor::Middle,
                    sirius_glow.with_alpha(1.0),
                )
                .bold();
                builder.push(SceneLayer::Labels, node);
                label(
                    builder,
                    label_at.offset(0.0, 12.0),
                    &format!("{} light-years", star.distance_ly),
                    "dim",
                    8.0,
                    false,
                );
            } else {
                label(builder, label_at, star.name, "dim", 8.0, false);
            }
        }
    }

    let footer = Point::new(center.x, builder.height() - 25.0);
    label(
        builder,
        footer,
        "Stars above/below galactic plane show scalar offset (s+ / s-)",
        "dim",
        8.0,
        false,
    );
    draw_mode_label(builder, &state.mode);
}

/// Antisolar wedge between an inner and an outer arc.
fn draw_dark_zone(builder: &mut SceneBuilder<'_>, center: Point, angle: f64, size: f64) {
    const INNER: f64 = 20.0;
    const SPAN: f64 = PI * 0.4;
    let outer = size * 0.45;
    let start = angle - SPAN / 2.0;
    let end = angle + SPAN / 2.0;

    let wedge = PathData::new()
        .move_to(polar(center, INNER, start))
        .line_to(polar(center, outer, start))
        .arc_to(outer, false, true, polar(center, outer, end))
        .line_to(polar(center, INNER, end))
        .arc_to(INNER, false, false, polar(center, INNER, start))
        .close();
    builder.push(
        SceneLayer::Background,
        ShapeNode::path(
            wedge,
            ShapeStyle::filled(Color::from_rgba8(26, 26, 46, 0.6))
                .with_stroke(Color::from_rgba8(155, 89, 182, 0.3), 1.0),
        ),
    );

    let label_at = polar(center, outer * 0.7, angle);
    label(builder, label_at, "DARK ZONE", "galacticCenter", 9.0, true);
    label(
        builder,
        label_at.offset(0.0, 12.0),
        "(antisolar region)",
        "dim",
        7.0,
        false,
    );
}

fn draw_galactic(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let center = builder.center();
    let size = builder.viewport().min_side();
    let time = state.progress;

    draw_galactic_center(builder, center);
    draw_spiral_arms(builder, center);
    builder.push(
        SceneLayer::Background,
        ShapeNode::circle(
            center,
            GALACTIC_ORBIT_PX,
            ShapeStyle::stroked(Color::from_rgba8(243, 156, 18, 0.3), 1.0).with_dash(4.0, 4.0),
        ),
    );

    let sun = galactic_sun(center, time);
    let sun_color = builder.color("sun");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(
            sun,
            6.0,
            ShapeStyle::filled(sun_color).with_filter("sunGlow"),
        )
        .with_region("sun"),
    );
    label(
        builder,
        sun.offset(0.0, -15.0),
        "YOU ARE HERE",
        "earth",
        9.0,
        true,
    );
    label(
        builder,
        sun.offset(0.0, 20.0),
        "in the Orion Arm",
        "dim",
        8.0,
        false,
    );
    draw_trail(builder, state, "galactic", "trail");

    label(
        builder,
        center.offset(0.0, size / 2.0 - 25.0),
        "Scale: Each ring = 10,000 light-years",
        "dim",
        9.0,
        false,
    );
    let orbits = (time / GALACTIC_YEAR).floor();
    let current = time.rem_euclid(GALACTIC_YEAR) / GALACTIC_YEAR * 100.0;
    label(
        builder,
        Point::new(center.x, size - 15.0),
        &format!("Galactic orbits: {orbits} ({current:.1}% of current)"),
        "dim",
        9.0,
        false,
    );
    draw_mode_label(builder, &state.mode);
}

fn draw_galactic_center(builder: &mut SceneBuilder<'_>, center: Point) {
    let accent = builder.color("galacticCenter");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center,
            18.0,
            ShapeStyle::filled(Color::from_rgba8(155, 89, 182, 0.4)).with_filter("sunGlow"),
        ),
    );
    builder.push(
        SceneLayer::Structure,
        ShapeNode::circle(
            center,
            8.0,
            ShapeStyle::filled(Color::from_rgba8(0x1a, 0x1a, 0x2e, 1.0)).with_stroke(accent, 2.0),
        )
        .with_region("galactic_center"),
    );
    label(
        builder,
        center.offset(0.0, 30.0),
        "GALACTIC CENTER",
        "galacticCenter",
        10.0,
        true,
    );
    label(
        builder,
        center.offset(0.0, 42.0),
        "Sagittarius A*",
        "dim",
        8.0,
        false,
    );
}

fn draw_spiral_arms(builder: &mut SceneBuilder<'_>, center: Point) {
    let color = builder.color("spiralArm");
    for offset in [0.0, PI / 2.0, PI, PI * 1.5] {
        let points: Vec<Point> = (3..25)
            .map(|step| {
                let t = f64::from(step) / 10.0;
                polar(center, 20.0 + t * 40.0, offset + t * 0.8)
            })
            .collect();
        builder.push(
            SceneLayer::Background,
            ShapeNode::path(
                PathData::polyline(&points),
                ShapeStyle::stroked(color, 12.0).with_opacity(0.5),
            ),
        );
    }
}
