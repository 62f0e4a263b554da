//! # Shape Errors
//!
//! Error types for shape construction.

use thiserror::Error;

/// Result type alias for shape construction.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors that can occur while building shapes.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// Zero-length, flat or non-finite geometry.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// A compound was built without children.
    #[error("Compound must contain at least one shape")]
    EmptyCompound,
}

impl ShapeError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}
