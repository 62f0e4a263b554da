//! Error types for mesh configuration and computation.

use std::path::PathBuf;

use mesh_engine::{EngineError, HypothesisId};
use thiserror::Error;

use crate::session::SessionState;

/// Result type alias for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised while configuring, computing or exporting a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A control carries a dimension other than 1, 2 or 3.
    #[error("Invalid control dimension {dimension} (expected 1, 2 or 3)")]
    ControlDimensionError { dimension: u8 },

    /// The engine failed to generate the mesh.
    #[error("Mesh computation failed: {0}")]
    MeshComputeError(#[source] EngineError),

    /// The mesh could not be written.
    #[error("Cannot export mesh to {}: {message}", .path.display())]
    ExportError { path: PathBuf, message: String },

    /// The operation is not allowed in the session's current state.
    #[error("Cannot {operation}: session is {state}")]
    MeshStateError {
        operation: &'static str,
        state: SessionState,
    },

    /// A hypothesis rejected a parameter taken from a control.
    #[error("Hypothesis {id} rejected its parameters: {source}")]
    HypothesisError {
        id: HypothesisId,
        #[source]
        source: EngineError,
    },
}

impl MeshError {
    /// Creates a state error for `operation`.
    pub fn state(operation: &'static str, state: SessionState) -> Self {
        Self::MeshStateError { operation, state }
    }

    /// Creates an export error.
    pub fn export(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ExportError {
            path: path.into(),
            message: message.into(),
        }
    }
}
