//! # Config Crate
//!
//! Centralized configuration constants for the B-rep meshing pipeline.
//! Engine defaults, tolerances and safety limits are defined here so the
//! shape model, the meshing engine and the control layer agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EngineConfig, DEFAULT_LOCAL_LENGTH};
//!
//! // A control without an explicit edge size falls back to the engine default
//! let edge_size: Option<f64> = None;
//! let length = edge_size.unwrap_or(DEFAULT_LOCAL_LENGTH);
//! assert_eq!(length, 1.0);
//!
//! let cfg = EngineConfig::default();
//! assert_eq!(cfg.default_length, DEFAULT_LOCAL_LENGTH);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Engine Defaults**: Sizing defaults apply only when a control leaves them unset
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
