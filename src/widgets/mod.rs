//! Concrete widget configurations.
//!
//! A widget is data plus a mode-keyed table of shape producers. The host owns
//! every piece of mutable state; widgets only read `SceneState` and push
//! nodes into a `SceneBuilder`.

mod circle_canvas;
mod galaxy_life_map;
mod life_calculator;
mod photon_journey;
mod scalar_viewer;
mod solar_system;

pub use circle_canvas::CircleCanvas;
pub use galaxy_life_map::GalaxyLifeMap;
pub use life_calculator::LifeCalculator;
pub use photon_journey::PhotonJourney;
pub use scalar_viewer::ScalarViewer;
pub use solar_system::SolarSystemMotion;

use serde_json::Value;

use crate::api::SceneState;
use crate::core::{Point, Viewport};
use crate::interaction::RegionInfo;
use crate::playback::ProgressBound;
use crate::render::SceneBuilder;

/// Draws one mode of a widget.
pub type ShapeProducer = fn(&mut SceneBuilder<'_>, &SceneState);

/// Ordered mapping from mode name to its shape producer.
///
/// Declaration order is the `cycle_mode` order; the first entry is the
/// default mode.
#[derive(Clone, Default)]
pub struct ModeTable {
    entries: Vec<(&'static str, ShapeProducer)>,
}

impl std::fmt::Debug for ModeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(mode, _)| mode))
            .finish()
    }
}

impl ModeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `mode`; a repeated name replaces the earlier producer in place.
    #[must_use]
    pub fn with(mut self, mode: &'static str, producer: ShapeProducer) -> Self {
        match self.entries.iter_mut().find(|(name, _)| *name == mode) {
            Some(entry) => entry.1 = producer,
            None => self.entries.push((mode, producer)),
        }
        self
    }

    #[must_use]
    pub fn get(&self, mode: &str) -> Option<ShapeProducer> {
        self.entries
            .iter()
            .find(|(name, _)| *name == mode)
            .map(|(_, producer)| *producer)
    }

    #[must_use]
    pub fn contains(&self, mode: &str) -> bool {
        self.get(mode).is_some()
    }

    pub fn modes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn first(&self) -> Option<&'static str> {
        self.entries.first().map(|(name, _)| *name)
    }

    /// Mode following `mode`, wrapping to the first.
    #[must_use]
    pub fn next_after(&self, mode: &str) -> Option<&'static str> {
        let position = self.entries.iter().position(|(name, _)| *name == mode)?;
        self.entries
            .get((position + 1) % self.entries.len())
            .map(|(name, _)| *name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named scalar input with its clamp range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamSpec {
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Read-only bundle of state values a widget can jump to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub mode: Option<&'static str>,
    pub progress: Option<f64>,
    pub params: &'static [(&'static str, f64)],
}

/// Everything the host needs to know about one widget.
///
/// Only `name`, `modes`, `palette` and `derived_info` are required; the rest
/// default to a static, non-interactive unit-progress widget.
pub trait WidgetConfig {
    fn name(&self) -> &'static str;

    fn modes(&self) -> &ModeTable;

    /// Default color roles as CSS strings.
    fn palette(&self) -> &'static [(&'static str, &'static str)];

    /// Widget-specific JSON describing `state`, reported with progress and
    /// params events.
    fn derived_info(&self, state: &SceneState) -> Value;

    fn default_mode(&self) -> Option<&'static str> {
        self.modes().first()
    }

    fn default_size(&self) -> f64 {
        400.0
    }

    /// Drawing surface for a requested `size`.
    fn viewport(&self, size: f64) -> Viewport {
        Viewport::square(size)
    }

    fn progress_bound(&self) -> ProgressBound {
        ProgressBound::UNIT
    }

    /// Unscaled progress advance per animation frame in `mode`.
    fn tick_delta(&self, _mode: &str) -> f64 {
        0.002
    }

    fn supports_reverse(&self) -> bool {
        false
    }

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn presets(&self) -> &'static [Preset] {
        &[]
    }

    /// Label and metric for a region declared in `mode`.
    fn region_info(&self, _mode: &str, _region_id: &str) -> Option<RegionInfo> {
        None
    }

    /// Domain payload sent with `modeChange`.
    fn mode_payload(&self, mode: &str) -> Value {
        Value::String(mode.to_owned())
    }

    /// Upper bound of points kept per trail; zero disables trails.
    fn trail_capacity(&self) -> usize {
        0
    }

    /// Named points to append to the trails after progress moved.
    fn trail_samples(
        &self,
        _state: &SceneState,
        _viewport: Viewport,
    ) -> Vec<(&'static str, Point)> {
        Vec::new()
    }

    /// Maps a pointer position to a progress value for drag scrubbing.
    fn progress_from_pointer(&self, _point: Point, _viewport: Viewport) -> Option<f64> {
        None
    }

    /// Whether switching from `from` to `to` restarts progress at zero.
    fn resets_progress_on_mode_change(&self, _from: &str, _to: &str) -> bool {
        false
    }
}

/// Looks up a bundled widget by its `name()`.
#[must_use]
pub fn bundled(name: &str) -> Option<Box<dyn WidgetConfig>> {
    let widget: Box<dyn WidgetConfig> = match name {
        "galaxy-life-map" => Box::new(GalaxyLifeMap::new()),
        "photon-journey" => Box::new(PhotonJourney::new()),
        "solar-system-motion" => Box::new(SolarSystemMotion::new()),
        "circle-canvas" => Box::new(CircleCanvas::new()),
        "scalar-viewer" => Box::new(ScalarViewer::new()),
        "life-calculator" => Box::new(LifeCalculator::new()),
        _ => return None,
    };
    Some(widget)
}

/// Names accepted by [`bundled`].
pub const BUNDLED_WIDGETS: [&str; 6] = [
    "galaxy-life-map",
    "photon-journey",
    "solar-system-motion",
    "circle-canvas",
    "scalar-viewer",
    "life-calculator",
];

#[cfg(test)]
mod tests {
    use super::{BUNDLED_WIDGETS, ModeTable, ParamSpec, bundled};
    use crate::api::SceneState;
    use crate::render::SceneBuilder;

    fn noop(_: &mut SceneBuilder<'_>, _: &SceneState) {}

    #[test]
    fn mode_table_cycles_in_declaration_order() {
        let table = ModeTable::new()
            .with("a", noop)
            .with("b", noop)
            .with("c", noop);
        assert_eq!(table.first(), Some("a"));
        assert_eq!(table.next_after("a"), Some("b"));
        assert_eq!(table.next_after("c"), Some("a"));
        assert_eq!(table.next_after("missing"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn repeated_mode_keeps_single_entry() {
        let table = ModeTable::new().with("a", noop).with("a", noop);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn param_spec_clamps_into_range() {
        let spec = ParamSpec {
            key: "t",
            label: "T",
            min: 0.0,
            max: 1.0,
            default: 0.5,
        };
        assert_eq!(spec.clamp(2.0), 1.0);
        assert_eq!(spec.clamp(-1.0), 0.0);
    }

    #[test]
    fn every_bundled_name_resolves_to_its_widget() {
        for name in BUNDLED_WIDGETS {
            let widget = bundled(name).expect("bundled widget");
            assert_eq!(widget.name(), name);
            assert!(!widget.modes().is_empty());
        }
        assert!(bundled("unknown").is_none());
    }
}
