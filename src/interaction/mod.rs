mod regions;

pub use regions::{
    HitArea, RegionBinding, RegionHandler, RegionInfo, RegionRegistry, notify_region_entered,
    notify_region_left,
};

use serde::{Deserialize, Serialize};

use crate::core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerMode {
    Idle,
    /// Pointer is pressed and scrubbing the widget's progress.
    Dragging,
}

/// Pointer state tracked by the scene host between events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    mode: PointerMode,
    cursor: Option<Point>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            mode: PointerMode::Idle,
            cursor: None,
        }
    }
}

impl PointerState {
    #[must_use]
    pub fn mode(self) -> PointerMode {
        self.mode
    }

    /// Last known pointer position over the surface.
    #[must_use]
    pub fn cursor(self) -> Option<Point> {
        self.cursor
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.cursor = Some(point);
        self.mode = PointerMode::Dragging;
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = PointerMode::Idle;
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.mode = PointerMode::Idle;
    }
}
