//! # Engine Errors
//!
//! Error types for hypothesis configuration, mesh computation and UNV I/O.

use brep_shape::{ShapeId, ShapeKind};
use thiserror::Error;

use crate::hypothesis::HypothesisId;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the meshing engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A hypothesis parameter is out of range.
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A hypothesis does not carry the requested parameter.
    #[error("{hypothesis} has no {parameter} parameter")]
    UnsupportedParameter {
        hypothesis: &'static str,
        parameter: &'static str,
    },

    /// Compute was requested before a shape was bound to the mesh.
    #[error("No shape to mesh")]
    NoShapeToMesh,

    /// Compute was requested on a shape unrelated to the mesh.
    #[error("Shape {shape} is not part of the meshed shape")]
    ShapeNotInMesh { shape: ShapeId },

    /// An assignment refers to an id the catalog does not know.
    #[error("Unknown hypothesis or algorithm id {id}")]
    UnknownId { id: HypothesisId },

    /// No sub-shape of the meshed shape has an applicable algorithm.
    #[error("No algorithm is assigned to any sub-shape")]
    NoAlgorithm,

    /// A sub-shape needed by a higher-dimensional algorithm was never meshed.
    #[error("{kind:?} {shape} is not discretized")]
    NotDiscretized { shape: ShapeId, kind: ShapeKind },

    /// Neighbouring discretizations cannot be joined.
    #[error("Incompatible discretization on {shape}: {message}")]
    IncompatibleDiscretization { shape: ShapeId, message: String },

    /// Edge division would exceed the configured limit.
    #[error("Edge {shape} needs {requested} segments (max: {max})")]
    TooManySegments {
        shape: ShapeId,
        requested: f64,
        max: usize,
    },

    /// An algorithm was handed a shape of the wrong kind.
    #[error("Shape {shape} is a {found:?}, expected a {expected:?}")]
    UnexpectedShape {
        shape: ShapeId,
        found: ShapeKind,
        expected: ShapeKind,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed UNV file.
    #[error("Invalid UNV content at line {line}: {message}")]
    InvalidUnv { line: usize, message: String },
}

impl EngineError {
    /// Creates an incompatible discretization error.
    pub fn incompatible(shape: ShapeId, message: impl Into<String>) -> Self {
        Self::IncompatibleDiscretization {
            shape,
            message: message.into(),
        }
    }

    /// Creates an invalid UNV content error.
    pub fn invalid_unv(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidUnv {
            line,
            message: message.into(),
        }
    }
}
