use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Point;
use crate::extensions::UpdateEvent;
use crate::render::{ShapeKind, ShapeNode};

/// Domain metadata attached to a hover region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub region_id: String,
    pub label: String,
    /// Domain metric reported on hover (life potential for the galaxy map).
    pub metric: f64,
}

impl RegionInfo {
    #[must_use]
    pub fn new(region_id: impl Into<String>, label: impl Into<String>, metric: f64) -> Self {
        Self {
            region_id: region_id.into(),
            label: label.into(),
            metric,
        }
    }
}

/// Callback producing the outbound notification for a hover transition.
pub type RegionHandler = fn(&RegionInfo) -> UpdateEvent;

/// Default `on_enter`: reports region, label and metric.
#[must_use]
pub fn notify_region_entered(info: &RegionInfo) -> UpdateEvent {
    UpdateEvent::Region {
        region: info.region_id.clone(),
        label: info.label.clone(),
        potential: info.metric,
    }
}

/// Default `on_leave`: reports that the hover ended.
#[must_use]
pub fn notify_region_left(_info: &RegionInfo) -> UpdateEvent {
    UpdateEvent::Clear
}

/// Pointer-testable outline derived from a shape node.
#[derive(Debug, Clone, PartialEq)]
pub enum HitArea {
    Circle { center: Point, radius: f64 },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    Polygon(Vec<Point>),
    Union(Vec<HitArea>),
}

impl HitArea {
    /// Hit outline for `node`; lines, text and open paths have none.
    #[must_use]
    pub fn from_node(node: &ShapeNode) -> Option<Self> {
        match &node.kind {
            ShapeKind::Circle { center, radius } => Some(Self::Circle {
                center: *center,
                radius: *radius,
            }),
            ShapeKind::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Some(Self::Ellipse {
                center: *center,
                radius_x: *radius_x,
                radius_y: *radius_y,
            }),
            ShapeKind::Rect {
                origin,
                width,
                height,
                ..
            } => Some(Self::Rect {
                origin: *origin,
                width: *width,
                height: *height,
            }),
            ShapeKind::Path { data } if data.is_closed() => {
                let vertices = data.vertices();
                (vertices.len() >= 3).then_some(Self::Polygon(vertices))
            }
            ShapeKind::Group { children } => {
                let areas: Vec<HitArea> = children.iter().filter_map(Self::from_node).collect();
                (!areas.is_empty()).then_some(Self::Union(areas))
            }
            ShapeKind::Path { .. } | ShapeKind::Line { .. } | ShapeKind::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Circle { center, radius } => center.distance_to(point) <= *radius,
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let dx = (point.x - center.x) / radius_x;
                let dy = (point.y - center.y) / radius_y;
                dx * dx + dy * dy <= 1.0
            }
            Self::Rect {
                origin,
                width,
                height,
            } => {
                (origin.x..=origin.x + width).contains(&point.x)
                    && (origin.y..=origin.y + height).contains(&point.y)
            }
            Self::Polygon(vertices) => polygon_contains(vertices, point),
            Self::Union(areas) => areas.iter().any(|area| area.contains(point)),
        }
    }
}

/// Even-odd ray casting.
fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    let mut inside = false;
    let mut previous = match vertices.last() {
        Some(last) => *last,
        None => return false,
    };
    for current in vertices {
        if (current.y > point.y) != (previous.y > point.y) {
            let cross_x =
                (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y)
                    + current.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        previous = *current;
    }
    inside
}

/// Association between one region-tagged node and its hover callbacks.
#[derive(Debug, Clone)]
pub struct RegionBinding {
    pub info: RegionInfo,
    pub area: HitArea,
    on_enter: RegionHandler,
    on_leave: RegionHandler,
}

/// Maps region-tagged shapes of the current frame to hover callbacks.
///
/// The registry is cleared before every re-registration pass, so bindings
/// never outlive the frame that declared them.
#[derive(Debug, Default)]
pub struct RegionRegistry {
    bindings: Vec<RegionBinding>,
    hovered: Option<usize>,
    generation: u64,
}

impl RegionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` as a hover region. Returns `false` when the node has
    /// no hit outline.
    pub fn register_region(
        &mut self,
        node: &ShapeNode,
        info: RegionInfo,
        on_enter: RegionHandler,
        on_leave: RegionHandler,
    ) -> bool {
        let Some(area) = HitArea::from_node(node) else {
            debug!(
                region = %info.region_id,
                kind = node.kind_name(),
                "region node has no hit outline, skipping"
            );
            return false;
        };
        self.bindings.push(RegionBinding {
            info,
            area,
            on_enter,
            on_leave,
        });
        true
    }

    /// Drops every binding and the hover selection without notifying.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.hovered = None;
        self.generation += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of `clear` calls so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RegionBinding> {
        self.bindings.iter()
    }

    #[must_use]
    pub fn hovered_region(&self) -> Option<&str> {
        self.hovered
            .and_then(|index| self.bindings.get(index))
            .map(|binding| binding.info.region_id.as_str())
    }

    /// Top-most binding under `point`; later registrations win.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&RegionBinding> {
        self.top_most(point).map(|index| &self.bindings[index])
    }

    fn top_most(&self, point: Point) -> Option<usize> {
        self.bindings
            .iter()
            .rposition(|binding| binding.area.contains(point))
    }

    /// Resolves hover at `point`, invoking `on_leave` / `on_enter` when the
    /// hovered region id changes.
    pub fn pointer_move(&mut self, point: Point, notify: &mut dyn FnMut(UpdateEvent)) {
        let next = self.top_most(point);
        let current_id = self.hovered_region().map(str::to_owned);
        let next_id = next.map(|index| self.bindings[index].info.region_id.as_str());
        if current_id.as_deref() == next_id {
            self.hovered = next;
            return;
        }
        self.leave(notify);
        if let Some(index) = next {
            let binding = &self.bindings[index];
            notify((binding.on_enter)(&binding.info));
            self.hovered = Some(index);
        }
    }

    pub fn pointer_leave(&mut self, notify: &mut dyn FnMut(UpdateEvent)) {
        self.leave(notify);
    }

    fn leave(&mut self, notify: &mut dyn FnMut(UpdateEvent)) {
        let Some(index) = self.hovered.take() else {
            return;
        };
        if let Some(binding) = self.bindings.get(index) {
            notify((binding.on_leave)(&binding.info));
        }
    }

    /// Re-selects `region_id` after a rebuild without notifying.
    /// Returns `false` when the new frame no longer declares it.
    pub fn restore_hover(&mut self, region_id: &str) -> bool {
        self.hovered = self
            .bindings
            .iter()
            .position(|binding| binding.info.region_id == region_id);
        self.hovered.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        HitArea, RegionInfo, RegionRegistry, notify_region_entered, notify_region_left,
    };
    use crate::core::Point;
    use crate::extensions::UpdateEvent;
    use crate::render::{Color, PathData, ShapeNode, ShapeStyle};

    fn disk(radius: f64, region: &str) -> ShapeNode {
        ShapeNode::circle(
            Point::new(50.0, 50.0),
            radius,
            ShapeStyle::filled(Color::WHITE),
        )
        .with_region(region)
    }

    fn registry_with_two_disks() -> RegionRegistry {
        let mut registry = RegionRegistry::new();
        registry.register_region(
            &disk(40.0, "halo"),
            RegionInfo::new("halo", "Outer Halo", 0.05),
            notify_region_entered,
            notify_region_left,
        );
        registry.register_region(
            &disk(10.0, "core"),
            RegionInfo::new("core", "Central Bulge", 0.15),
            notify_region_entered,
            notify_region_left,
        );
        registry
    }

    #[test]
    fn top_most_region_wins() {
        let registry = registry_with_two_disks();
        let hit = registry.hit_test(Point::new(52.0, 50.0)).expect("core hit");
        assert_eq!(hit.info.region_id, "core");
        let hit = registry.hit_test(Point::new(80.0, 50.0)).expect("halo hit");
        assert_eq!(hit.info.region_id, "halo");
        assert!(registry.hit_test(Point::new(99.0, 99.0)).is_none());
    }

    #[test]
    fn hover_transitions_emit_leave_then_enter() {
        let mut registry = registry_with_two_disks();
        let mut events = Vec::new();
        registry.pointer_move(Point::new(80.0, 50.0), &mut |event| events.push(event));
        registry.pointer_move(Point::new(81.0, 50.0), &mut |event| events.push(event));
        registry.pointer_move(Point::new(50.0, 50.0), &mut |event| events.push(event));
        registry.pointer_leave(&mut |event| events.push(event));

        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], UpdateEvent::Region { region, .. } if region == "halo"));
        assert_eq!(events[1], UpdateEvent::Clear);
        assert!(matches!(&events[2], UpdateEvent::Region { region, .. } if region == "core"));
        assert_eq!(events[3], UpdateEvent::Clear);
    }

    #[test]
    fn clear_drops_bindings_and_hover_silently() {
        let mut registry = registry_with_two_disks();
        registry.pointer_move(Point::new(50.0, 50.0), &mut |_| {});
        assert_eq!(registry.hovered_region(), Some("core"));
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.hovered_region(), None);
        assert_eq!(registry.generation(), 1);
        let mut events = Vec::new();
        registry.pointer_leave(&mut |event| events.push(event));
        assert!(events.is_empty());
    }

    #[test]
    fn closed_paths_hit_test_as_polygons() {
        let triangle = ShapeNode::path(
            PathData::polygon(&[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ]),
            ShapeStyle::default(),
        );
        let area = HitArea::from_node(&triangle).expect("polygon area");
        assert!(area.contains(Point::new(2.0, 2.0)));
        assert!(!area.contains(Point::new(9.0, 9.0)));

        let open = ShapeNode::path(
            PathData::polyline(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            ShapeStyle::default(),
        );
        assert!(HitArea::from_node(&open).is_none());
    }
}
