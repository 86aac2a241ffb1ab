use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Viewport;
use crate::error::{DiagramError, DiagramResult};
use crate::playback::PlaybackStatus;
use crate::render::Renderer;

use super::SceneHost;

/// Serializable deterministic summary of a host, used by regression tests
/// and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub widget: String,
    pub viewport: Viewport,
    pub mode: String,
    pub progress: f64,
    pub status: PlaybackStatus,
    pub speed: f64,
    pub highlighted_region: Option<String>,
    pub params: IndexMap<String, f64>,
    pub show_trail: bool,
    /// Node count per layer, back to front.
    pub layer_sizes: IndexMap<String, usize>,
    pub node_count: usize,
    pub suppressed_count: usize,
    pub region_count: usize,
    pub info: Value,
}

impl<R: Renderer> SceneHost<R> {
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            widget: self.widget.name().to_owned(),
            viewport: self.viewport,
            mode: self.state.mode.clone(),
            progress: self.state.progress,
            status: self.clock.status(),
            speed: self.clock.speed(),
            highlighted_region: self.state.highlighted_region.clone(),
            params: self.state.params.clone(),
            show_trail: self.state.show_trail,
            layer_sizes: self
                .frame
                .layers
                .iter()
                .map(|span| (format!("{:?}", span.layer), span.len))
                .collect(),
            node_count: self.frame.len(),
            suppressed_count: self.frame.suppressed,
            region_count: self.regions.len(),
            info: self.widget.derived_info(&self.state),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> DiagramResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| DiagramError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
