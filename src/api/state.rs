use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::ColorPalette;

/// The mutable input driving one rebuild.
///
/// Owned by `SceneHost` and only changed through its setters; producers get a
/// shared borrow for the duration of a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    /// Widget-scaled scalar: unit progress, an angle, or elapsed time.
    pub progress: f64,
    pub mode: String,
    pub highlighted_region: Option<String>,
    pub palette: ColorPalette,
    pub params: IndexMap<String, f64>,
    pub show_trail: bool,
}

impl SceneState {
    #[must_use]
    pub fn new(mode: impl Into<String>, palette: ColorPalette) -> Self {
        Self {
            progress: 0.0,
            mode: mode.into(),
            highlighted_region: None,
            palette,
            params: IndexMap::new(),
            show_trail: true,
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn param_or(&self, key: &str, fallback: f64) -> f64 {
        self.params.get(key).copied().unwrap_or(fallback)
    }

    #[must_use]
    pub fn is_highlighted(&self, region_id: &str) -> bool {
        self.highlighted_region.as_deref() == Some(region_id)
    }
}

/// Partial update merged by `SceneHost::set_state`.
///
/// `highlighted_region` distinguishes "leave as is" (absent) from "clear"
/// (`Some(None)`, JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStatePatch {
    pub progress: Option<f64>,
    pub mode: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub highlighted_region: Option<Option<String>>,
    /// Role -> CSS color, overlaid on the current palette.
    pub colors: IndexMap<String, String>,
    pub params: IndexMap<String, f64>,
    pub show_trail: Option<bool>,
}

impl SceneStatePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub fn progress(mut self, value: f64) -> Self {
        self.progress = Some(value);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn color(mut self, role: impl Into<String>, css: impl Into<String>) -> Self {
        self.colors.insert(role.into(), css.into());
        self
    }
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
