//! Scene loading errors.

use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {index} references unknown material '{name}'")]
    UnknownMaterial { name: String, index: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown scene preset '{0}'")]
    UnknownPreset(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
