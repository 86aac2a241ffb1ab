use thiserror::Error;

pub type DiagramResult<T> = Result<T, DiagramError>;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("widget `{widget}` has no mode named `{mode}`")]
    UnknownMode { widget: String, mode: String },

    #[error("playback speed must be finite and >= 0 for this widget, got {0}")]
    InvalidSpeed(f64),

    #[error("container `{id}` was not found on the page")]
    ContainerNotFound { id: String },

    #[error("widget `{widget}` has no preset named `{preset}`")]
    UnknownPreset { widget: String, preset: String },

    #[error("widget `{widget}` has no parameter named `{param}`")]
    UnknownParam { widget: String, param: String },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("scene host has been destroyed")]
    Destroyed,
}
