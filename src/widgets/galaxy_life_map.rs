use std::f64::consts::PI;

use serde_json::{Value, json};

use crate::api::SceneState;
use crate::core::{Point, TAU, polar};
use crate::interaction::RegionInfo;
use crate::render::{
    Definition, GradientStop, Paint, PathData, SceneBuilder, SceneLayer, ShapeNode, ShapeStyle,
    TextAnchor,
};

use super::{ModeTable, WidgetConfig};

const PALETTE: &[(&str, &str)] = &[
    ("lifeHigh", "#4ecdc4"),
    ("lifeMedium", "#d4af37"),
    ("lifeLow", "#ff6b6b"),
    ("text", "#e8dcc4"),
    ("dim", "rgba(255, 255, 255, 0.5)"),
    ("arm", "rgba(78, 205, 196, 0.6)"),
    ("core", "rgba(255, 107, 107, 0.4)"),
    ("halo", "rgba(255, 255, 255, 0.05)"),
    ("disk", "rgba(212, 175, 55, 0.15)"),
    ("bar", "rgba(212, 175, 55, 0.4)"),
];

struct Region {
    key: &'static str,
    label: &'static str,
    potential: f64,
}

const fn region(key: &'static str, label: &'static str, potential: f64) -> Region {
    Region {
        key,
        label,
        potential,
    }
}

struct GalaxyType {
    key: &'static str,
    name: &'static str,
    life_potential: f64,
    description: &'static str,
    features: &'static [&'static str],
    regions: &'static [Region],
}

const GALAXY_TYPES: [GalaxyType; 4] = [
    GalaxyType {
        key: "spiral",
        name: "Spiral Galaxy",
        life_potential: 0.85,
        description: "LIFE FACTORY",
        features: &[
            "Spiral arms create new stars constantly",
            "Rich in gas and dust (building blocks)",
            "Organization enables chemistry",
            "Our Milky Way is this type",
        ],
        regions: &[
            region("arms", "Spiral Arms", 0.92),
            region("disk", "Galactic Disk", 0.70),
            region("core", "Central Bulge", 0.15),
            region("halo", "Outer Halo", 0.05),
        ],
    },
    GalaxyType {
        key: "barred",
        name: "Barred Spiral",
        life_potential: 0.80,
        description: "ACTIVE LIFE ZONE",
        features: &[
            "Central bar channels gas to arms",
            "Intense star formation regions",
            "Similar to spiral but more dynamic",
            "Milky Way has a partial bar",
        ],
        regions: &[
            region("arms", "Outer Arms", 0.88),
            region("bar", "Central Bar", 0.45),
            region("ends", "Bar Ends", 0.82),
            region("halo", "Outer Halo", 0.08),
        ],
    },
    GalaxyType {
        key: "elliptical",
        name: "Elliptical Galaxy",
        life_potential: 0.08,
        description: "GRAVEYARD",
        features: &[
            "No new stars forming",
            "Gas and dust exhausted",
            "Only old, dying stars remain",
            "Random motion, no structure",
        ],
        regions: &[
            region("center", "Dense Core", 0.12),
            region("middle", "Middle Region", 0.06),
            region("outer", "Outer Region", 0.03),
            region("edge", "Edge", 0.01),
        ],
    },
    GalaxyType {
        key: "irregular",
        name: "Irregular Galaxy",
        life_potential: 0.55,
        description: "CHAOTIC NURSERY",
        features: &[
            "No defined shape or structure",
            "Bursts of star formation",
            "Often result of galactic collision",
            "High activity but unpredictable",
        ],
        regions: &[
            region("active", "Active Regions", 0.75),
            region("quiet", "Quiet Zones", 0.35),
            region("edge", "Outer Edge", 0.20),
        ],
    },
];

fn galaxy_type(mode: &str) -> Option<&'static GalaxyType> {
    GALAXY_TYPES.iter().find(|galaxy| galaxy.key == mode)
}

fn galaxy_json(galaxy: &GalaxyType) -> Value {
    let regions: serde_json::Map<String, Value> = galaxy
        .regions
        .iter()
        .map(|region| {
            (
                region.key.to_owned(),
                json!({"label": region.label, "potential": region.potential}),
            )
        })
        .collect();
    json!({
        "key": galaxy.key,
        "name": galaxy.name,
        "lifePotential": galaxy.life_potential,
        "description": galaxy.description,
        "features": galaxy.features,
        "regions": regions,
    })
}

/// Galaxy morphology map with hoverable life-potential regions.
#[derive(Debug, Clone)]
pub struct GalaxyLifeMap {
    modes: ModeTable,
}

impl GalaxyLifeMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: ModeTable::new()
                .with("spiral", draw_spiral)
                .with("barred", draw_barred)
                .with("elliptical", draw_elliptical)
                .with("irregular", draw_irregular),
        }
    }
}

impl Default for GalaxyLifeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetConfig for GalaxyLifeMap {
    fn name(&self) -> &'static str {
        "galaxy-life-map"
    }

    fn modes(&self) -> &ModeTable {
        &self.modes
    }

    fn palette(&self) -> &'static [(&'static str, &'static str)] {
        PALETTE
    }

    fn derived_info(&self, state: &SceneState) -> Value {
        match galaxy_type(&state.mode) {
            Some(galaxy) => json!({
                "galaxy": galaxy.key,
                "name": galaxy.name,
                "lifePotential": galaxy.life_potential,
                "description": galaxy.description,
                "highlightedRegion": state.highlighted_region,
            }),
            None => Value::Null,
        }
    }

    fn region_info(&self, mode: &str, region_id: &str) -> Option<RegionInfo> {
        galaxy_type(mode)?
            .regions
            .iter()
            .find(|region| region.key == region_id)
            .map(|region| RegionInfo::new(region.key, region.label, region.potential))
    }

    fn mode_payload(&self, mode: &str) -> Value {
        galaxy_type(mode).map_or(Value::Null, galaxy_json)
    }
}

fn max_radius(builder: &SceneBuilder<'_>) -> f64 {
    builder.viewport().min_side() * 0.42
}

fn add_defs(builder: &mut SceneBuilder<'_>) {
    let high = builder.color("lifeHigh");
    let low = builder.color("lifeLow");
    builder.define(Definition::radial_gradient(
        "lifeRichGradient",
        &[
            GradientStop::new(0.0, high.with_alpha(0.8)),
            GradientStop::new(1.0, high.with_alpha(0.2)),
        ],
    ));
    builder.define(Definition::radial_gradient(
        "coreGradient",
        &[
            GradientStop::new(0.0, low.with_alpha(0.8)),
            GradientStop::new(1.0, low.with_alpha(0.2)),
        ],
    ));
    builder.define(Definition::glow("armGlow", 3.0));
}

/// Highlighted regions get an outline in the text color.
fn region_style(
    builder: &SceneBuilder<'_>,
    state: &SceneState,
    region: &str,
    fill: Paint,
) -> ShapeStyle {
    let style = ShapeStyle::filled(fill);
    if state.is_highlighted(region) {
        style.with_stroke(builder.color("text"), 2.0)
    } else {
        style
    }
}

fn push_region_disk(
    builder: &mut SceneBuilder<'_>,
    state: &SceneState,
    layer: SceneLayer,
    radius: f64,
    region: &str,
    fill: Paint,
) {
    let style = region_style(builder, state, region, fill);
    let center = builder.center();
    builder.push(
        layer,
        ShapeNode::circle(center, radius, style).with_region(region),
    );
}

fn draw_spiral(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let radius = max_radius(builder);
    let halo = builder.paint("halo");
    let disk = builder.paint("disk");
    push_region_disk(builder, state, SceneLayer::Background, radius, "halo", halo);
    push_region_disk(
        builder,
        state,
        SceneLayer::Background,
        radius * 0.85,
        "disk",
        disk,
    );

    for arm in 0..2 {
        spiral_arm(builder, state, radius * 0.9, f64::from(arm) * PI, "arms");
    }

    push_region_disk(
        builder,
        state,
        SceneLayer::Structure,
        radius * 0.2,
        "core",
        Paint::reference("coreGradient"),
    );
    let center = builder.center();
    let low = builder.color("lifeLow");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(center, 8.0, ShapeStyle::filled(low).with_opacity(0.8)),
    );
    draw_legend(builder);
}

fn spiral_arm(
    builder: &mut SceneBuilder<'_>,
    state: &SceneState,
    max_radius: f64,
    start_angle: f64,
    region: &str,
) {
    const TURNS: f64 = 1.5;
    const SEGMENTS: usize = 60;

    let center = builder.center();
    let mut inner = Vec::with_capacity(SEGMENTS + 1);
    let mut outer = Vec::with_capacity(SEGMENTS + 1);
    for i in 0..=SEGMENTS {
        let t = i as f64 / SEGMENTS as f64;
        let angle = start_angle + t * TURNS * TAU;
        let r = (0.2 + t * 0.8) * max_radius;
        let width = 20.0 + (t * PI).sin() * 15.0;
        inner.push(polar(center, r - width / 2.0, angle));
        outer.push(polar(center, r + width / 2.0, angle));
    }

    let outline: Vec<Point> = inner.iter().chain(outer.iter().rev()).copied().collect();
    let arm = builder.paint("arm");
    let style = region_style(builder, state, region, arm).with_filter("armGlow");
    builder.push(
        SceneLayer::Structure,
        ShapeNode::path(PathData::polygon(&outline), style).with_region(region),
    );

    let high = builder.color("lifeHigh");
    for i in (5..=SEGMENTS).step_by(8) {
        let mid = inner[i].midpoint(outer[i]);
        let star = mid.offset(builder.jitter(10.0), builder.jitter(10.0));
        let radius = 2.0 + builder.unit() * 2.0;
        let opacity = 0.6 + builder.unit() * 0.4;
        builder.push(
            SceneLayer::Markers,
            ShapeNode::circle(star, radius, ShapeStyle::filled(high).with_opacity(opacity)),
        );
    }
}

fn draw_barred(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let radius = max_radius(builder);
    let center = builder.center();
    let halo = builder.paint("halo");
    push_region_disk(builder, state, SceneLayer::Background, radius, "halo", halo);

    spiral_arm(builder, state, radius * 0.9, 0.0, "arms");
    spiral_arm(builder, state, radius * 0.9, PI, "arms");

    let bar_width = radius * 0.15;
    let bar_length = radius * 0.5;
    let bar_paint = builder.paint("bar");
    let bar_style = region_style(builder, state, "bar", bar_paint);
    builder.push(
        SceneLayer::Structure,
        ShapeNode::rect(
            center.offset(-bar_length, -bar_width / 2.0),
            bar_length * 2.0,
            bar_width,
            bar_style,
        )
        .with_corner_radius(bar_width / 2.0)
        .with_region("bar"),
    );

    let arm = builder.paint("arm");
    let end_style = region_style(builder, state, "ends", arm).with_opacity(0.7);
    for x_offset in [-bar_length, bar_length] {
        builder.push(
            SceneLayer::Structure,
            ShapeNode::circle(center.offset(x_offset, 0.0), 12.0, end_style.clone())
                .with_region("ends"),
        );
    }

    let low = builder.color("lifeLow");
    builder.push(
        SceneLayer::Markers,
        ShapeNode::circle(center, 15.0, ShapeStyle::filled(low).with_opacity(0.6)),
    );
    draw_legend(builder);
}

fn draw_elliptical(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    let radius = max_radius(builder);
    let center = builder.center();
    let low = builder.color("lifeLow");

    let layers = [
        (1.0, 0.6, "edge", 0.1),
        (0.75, 0.45, "outer", 0.15),
        (0.5, 0.3, "middle", 0.25),
        (0.25, 0.15, "center", 0.4),
    ];
    for (rx, ry, region, opacity) in layers {
        let style = region_style(builder, state, region, low.into()).with_opacity(opacity);
        builder.push(
            SceneLayer::Structure,
            ShapeNode::ellipse(center, radius * rx, radius * ry, style).with_region(region),
        );
    }

    for _ in 0..30 {
        let angle = builder.unit() * TAU;
        let r = builder.unit() * radius * 0.8;
        let star = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin() * 0.6);
        let size = 1.0 + builder.unit() * 1.5;
        let opacity = 0.3 + builder.unit() * 0.3;
        builder.push(
            SceneLayer::Markers,
            ShapeNode::circle(star, size, ShapeStyle::filled(low).with_opacity(opacity)),
        );
    }

    let dim = builder.color("dim");
    builder.push(
        SceneLayer::Labels,
        ShapeNode::text(
            center.offset(0.0, radius * 0.75),
            "No structure. No new stars.",
            11.0,
            TextAnchor::Middle,
            dim,
        ),
    );
}

fn draw_irregular(builder: &mut SceneBuilder<'_>, state: &SceneState) {
    add_defs(builder);
    // Blob offsets are laid out for a 400px surface.
    let scale = max_radius(builder) / 168.0;
    let center = builder.center();
    let blobs = [
        (-40.0, -30.0, 60.0, 40.0, "active", 0.75),
        (50.0, 20.0, 45.0, 55.0, "active", 0.72),
        (-20.0, 50.0, 35.0, 30.0, "quiet", 0.35),
        (30.0, -50.0, 50.0, 35.0, "quiet", 0.40),
        (-70.0, 10.0, 30.0, 25.0, "edge", 0.20),
    ];

    let high = builder.color("lifeHigh");
    for (dx, dy, rx, ry, region, life) in blobs {
        let role = if life > 0.5 {
            "lifeHigh"
        } else if life > 0.3 {
            "lifeMedium"
        } else {
            "lifeLow"
        };
        let fill = builder.paint(role);
        let blob_center = center.offset(dx * scale, dy * scale);
        let (rx, ry) = (rx * scale, ry * scale);
        let style = region_style(builder, state, region, fill).with_opacity(0.3 + life * 0.3);
        builder.push(
            SceneLayer::Structure,
            ShapeNode::ellipse(blob_center, rx, ry, style).with_region(region),
        );

        if life > 0.5 {
            for _ in 0..8 {
                let star =
                    blob_center.offset(builder.jitter(rx * 1.5), builder.jitter(ry * 1.5));
                let size = 2.0 + builder.unit() * 2.0;
                let opacity = 0.5 + builder.unit() * 0.5;
                builder.push(
                    SceneLayer::Markers,
                    ShapeNode::circle(star, size, ShapeStyle::filled(high).with_opacity(opacity)),
                );
            }
        }
    }
    draw_legend(builder);
}

fn draw_legend(builder: &mut SceneBuilder<'_>) {
    let start = Point::new(10.0, builder.height() - 60.0);
    let items = [
        ("lifeHigh", "High Life Potential"),
        ("lifeMedium", "Moderate"),
        ("lifeLow", "Low / Hostile"),
    ];
    let dim = builder.color("dim");
    for (i, (role, label)) in items.into_iter().enumerate() {
        let top = start.offset(0.0, i as f64 * 18.0);
        let fill = builder.color(role);
        builder.push(
            SceneLayer::Labels,
            ShapeNode::rect(top, 12.0, 12.0, ShapeStyle::filled(fill)).with_corner_radius(2.0),
        );
        builder.push(
            SceneLayer::Labels,
            ShapeNode::text(top.offset(20.0, 10.0), label, 10.0, TextAnchor::Start, dim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::GalaxyLifeMap;
    use crate::api::SceneState;
    use crate::core::Viewport;
    use crate::playback::TrailStore;
    use crate::render::{ColorPalette, SceneBuilder, SceneLayer};
    use crate::widgets::WidgetConfig;

    fn build(mode: &str) -> crate::render::SceneFrame {
        let widget = GalaxyLifeMap::new();
        let palette = ColorPalette::from_css(widget.palette().iter().copied()).expect("palette");
        let trails = TrailStore::new(0);
        let state = SceneState::new(mode, palette.clone());
        let mut builder = SceneBuilder::new(Viewport::square(400.0), &palette, &trails, 7);
        let producer = widget.modes().get(mode).expect("mode");
        producer(&mut builder, &state);
        builder.finish()
    }

    #[test]
    fn spiral_declares_every_region_it_describes() {
        let frame = build("spiral");
        let mut regions: Vec<&str> = frame
            .region_nodes()
            .filter_map(|node| node.region_id.as_deref())
            .collect();
        regions.dedup();
        assert_eq!(regions, vec!["halo", "disk", "arms", "core"]);
    }

    #[test]
    fn elliptical_draws_thirty_stars_and_four_shells() {
        let frame = build("elliptical");
        assert_eq!(frame.layer_nodes(SceneLayer::Markers).len(), 30);
        assert_eq!(frame.layer_nodes(SceneLayer::Structure).len(), 4);
        assert_eq!(frame.layer_nodes(SceneLayer::Labels).len(), 1);
    }

    #[test]
    fn region_info_reports_label_and_potential() {
        let widget = GalaxyLifeMap::new();
        let info = widget.region_info("barred", "ends").expect("region");
        assert_eq!(info.label, "Bar Ends");
        assert_eq!(info.metric, 0.82);
        assert!(widget.region_info("barred", "disk").is_none());
    }
}
