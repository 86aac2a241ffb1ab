use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Viewport;
use crate::playback::PlaybackStatus;

/// Push notifications delivered to the hosting page.
///
/// Serialized with a `type` tag so the JSON form matches
/// `{type: "region", region, label, potential}` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UpdateEvent {
    /// Pointer entered a region.
    Region {
        region: String,
        label: String,
        potential: f64,
    },
    /// Pointer left the hovered region.
    Clear,
    /// Discrete mode switched; `payload` is widget-specific.
    ModeChange { mode: String, payload: Value },
    /// Progress moved (tick, scrub or reset); `info` is the widget's derived state.
    Progress { progress: f64, info: Value },
    /// A named parameter changed.
    Params { info: Value },
    /// A preset was applied.
    Preset { preset: String, name: String },
    /// Playback status changed.
    Playback { status: PlaybackStatus },
}

impl UpdateEvent {
    /// The `type` tag of this event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Region { .. } => "region",
            Self::Clear => "clear",
            Self::ModeChange { .. } => "modeChange",
            Self::Progress { .. } => "progress",
            Self::Params { .. } => "params",
            Self::Preset { .. } => "preset",
            Self::Playback { .. } => "playback",
        }
    }
}

/// Host-supplied `onUpdate` callback.
pub type UpdateCallback = Box<dyn FnMut(&UpdateEvent)>;

/// Read-only state snapshot passed to observers alongside every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub widget: String,
    pub viewport: Viewport,
    pub mode: String,
    pub progress: f64,
    pub status: PlaybackStatus,
    pub highlighted_region: Option<String>,
}

/// Extension hook for code that wants the event stream with context.
///
/// Observers can watch events and read host context without mutating
/// host internals.
pub trait SceneObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &UpdateEvent, context: &ObserverContext);
}

#[cfg(test)]
mod tests {
    use super::UpdateEvent;
    use serde_json::json;

    #[test]
    fn region_event_serializes_with_type_tag() {
        let event = UpdateEvent::Region {
            region: "arms".to_owned(),
            label: "Spiral Arms".to_owned(),
            potential: 0.92,
        };
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            value,
            json!({"type": "region", "region": "arms", "label": "Spiral Arms", "potential": 0.92})
        );
        assert_eq!(
            serde_json::to_value(UpdateEvent::Clear).expect("serialize"),
            json!({"type": "clear"})
        );
    }

    #[test]
    fn mode_change_uses_camel_case_tag() {
        let event = UpdateEvent::ModeChange {
            mode: "barred".to_owned(),
            payload: json!({"name": "Barred Spiral"}),
        };
        assert_eq!(event.kind(), "modeChange");
        let value = serde_json::to_value(&event).expect("serialize");
        assert_eq!(value["type"], "modeChange");
    }
}
