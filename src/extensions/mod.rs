//! Outbound notification surface: the `onUpdate` event stream and observer hooks.

pub mod observers;

pub use observers::{ObserverContext, SceneObserver, UpdateCallback, UpdateEvent};
