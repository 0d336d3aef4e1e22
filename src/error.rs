//! Error handling for the layout engine facade.
//!
//! Wraps the grid model and gesture errors and adds the failures that only
//! exist at this layer: configuration I/O, manifest parsing and store lookups.

use thiserror::Error;

use brickgrid_core::{BreakpointId, LayoutError};
use brickgrid_input::InputError;

/// Main error type for the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Gesture rejected: {0}")]
    Input(#[from] InputError),

    #[error("Unknown brick '{0}'")]
    UnknownBrick(String),

    #[error("Unknown breakpoint '{0}'")]
    UnknownBreakpoint(BreakpointId),

    #[error("Brick id '{0}' already exists")]
    DuplicateBrickId(String),

    #[error("Invalid manifest for brick type '{brick_type}': {source}")]
    Manifest {
        brick_type: String,
        #[source]
        source: LayoutError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// True when the error comes from a caller passing stale or unknown ids,
    /// as opposed to broken configuration.
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownBrick(_) | EngineError::UnknownBreakpoint(_)
        )
    }
}
