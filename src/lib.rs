//! diagram-rs: parametric SVG scene renderer.
//!
//! A widget is a thin configuration (a mode-keyed table of shape producers
//! plus domain metadata). The `SceneHost` owns the state, rebuilds the whole
//! shape tree on every change, registers hover regions and drives playback
//! from host-provided animation frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod playback;
pub mod render;
pub mod telemetry;
pub mod widgets;

pub use api::{SceneHost, SceneSnapshot, SceneState, SceneStatePatch, WidgetOptions, create_widget};
pub use error::{DiagramError, DiagramResult};
