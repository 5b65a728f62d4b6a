//! Host-side error types.

use std::path::PathBuf;

use vanta_script::ScriptError;

/// Errors raised while loading scenes or running scripts.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The scene file could not be read.
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene file is not a valid scene description.
    #[error("invalid scene description: {0}")]
    Json(#[from] serde_json::Error),

    /// A scene entity names a component that does not exist.
    #[error("entity `{entity}`: unknown component `{component}`")]
    UnknownComponent { entity: String, component: String },

    /// An environment override could not be parsed.
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// Tick rates must be finite and positive.
    #[error("invalid tick rate {0}")]
    InvalidTickRate(f64),

    #[error("script runtime is already running")]
    AlreadyRunning,

    #[error("script runtime is not running")]
    NotRunning,

    #[error(transparent)]
    Script(#[from] ScriptError),
}
