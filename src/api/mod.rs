//! Public facade: the `SceneHost` and its construction options.
//!
//! `SceneHost` is split across controller files the same way its concerns
//! split: state merging, playback, pointer regions, observers, snapshots.

mod host;
mod host_init;
mod json_contract;
mod observer_dispatch;
mod observer_registry;
mod options;
mod playback_controller;
mod region_controller;
mod snapshot;
mod state;
mod state_controller;
mod validation;

pub use host::SceneHost;
pub use host_init::create_widget;
pub use json_contract::{SCENE_SNAPSHOT_JSON_SCHEMA_V1, SceneSnapshotJsonContractV1};
pub use options::WidgetOptions;
pub use snapshot::SceneSnapshot;
pub use state::{SceneState, SceneStatePatch};
