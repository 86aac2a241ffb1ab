use serde::{Deserialize, Serialize};

/// Back-to-front layering contract shared by every widget mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SceneLayer {
    Background,
    Structure,
    Markers,
    Labels,
}

impl SceneLayer {
    /// Canonical draw order; later layers render on top.
    pub const ORDER: [SceneLayer; 4] = [
        SceneLayer::Background,
        SceneLayer::Structure,
        SceneLayer::Markers,
        SceneLayer::Labels,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Structure => 1,
            Self::Markers => 2,
            Self::Labels => 3,
        }
    }
}
