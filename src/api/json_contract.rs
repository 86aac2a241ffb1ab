use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, DiagramResult};
use crate::render::Renderer;

use super::{SceneHost, SceneSnapshot};

pub const SCENE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SceneSnapshot,
}

impl SceneSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DiagramResult<String> {
        let payload = SceneSnapshotJsonContractV1 {
            schema_version: SCENE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DiagramError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DiagramResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SceneSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SceneSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DiagramError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DiagramError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> SceneHost<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> DiagramResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
