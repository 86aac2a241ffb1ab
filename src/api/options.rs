use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, DiagramResult};
use crate::extensions::{UpdateCallback, UpdateEvent};

/// Construction options accepted by `create_widget`.
///
/// Deserializable from the page's JSON options object; unknown fields are
/// ignored and omitted fields take the defaults below. The `on_update`
/// callback is not part of the JSON form and is attached with
/// [`WidgetOptions::with_on_update`].
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Requested size in pixels; `None` uses the widget's default.
    pub size: Option<f64>,
    /// Role -> CSS color, overlaid on the widget's default palette.
    pub colors: IndexMap<String, String>,
    /// Start playing right after construction.
    pub animate: bool,
    /// Register hover regions and accept pointer input.
    pub interactive: bool,
    /// Initial mode; `None` uses the widget's first mode.
    pub mode: Option<String>,
    pub speed: f64,
    /// Seed for cosmetic jitter; `None` draws one at random per host.
    pub seed: Option<u64>,
    pub show_trail: bool,
    /// Initial values for the widget's named params.
    pub params: IndexMap<String, f64>,
    #[serde(skip)]
    pub on_update: Option<UpdateCallback>,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            size: None,
            colors: IndexMap::new(),
            animate: false,
            interactive: true,
            mode: None,
            speed: 1.0,
            seed: None,
            show_trail: true,
            params: IndexMap::new(),
            on_update: None,
        }
    }
}

impl std::fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("size", &self.size)
            .field("colors", &self.colors)
            .field("animate", &self.animate)
            .field("interactive", &self.interactive)
            .field("mode", &self.mode)
            .field("speed", &self.speed)
            .field("seed", &self.seed)
            .field("show_trail", &self.show_trail)
            .field("params", &self.params)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

impl WidgetOptions {
    pub fn from_json_str(input: &str) -> DiagramResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DiagramError::InvalidData(format!("failed to parse widget options: {e}")))
    }

    #[must_use]
    pub fn with_on_update(mut self, callback: impl FnMut(&UpdateEvent) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_color(mut self, role: impl Into<String>, css: impl Into<String>) -> Self {
        self.colors.insert(role.into(), css.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn animated(mut self) -> Self {
        self.animate = true;
        self
    }

    #[must_use]
    pub fn static_only(mut self) -> Self {
        self.interactive = false;
        self
    }
}
