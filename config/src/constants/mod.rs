//! Centralized configuration values shared across the meshing pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Geometric tolerance used when comparing points and parameters.
///
/// Two positions closer than this are the same node, and segment counts are
/// rounded with this slack so that `1.0 / 0.25` yields exactly 4 divisions.
///
/// # Examples
/// ```
/// use config::constants::GEOMETRY_TOLERANCE;
/// assert!(GEOMETRY_TOLERANCE < 1.0e-6);
/// ```
pub const GEOMETRY_TOLERANCE: f64 = 1.0e-9;

// =============================================================================
// ENGINE DEFAULTS
// =============================================================================

/// Target element edge length used by sizing hypotheses that were created
/// without an explicit length.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_LOCAL_LENGTH;
///
/// let user_length: Option<f64> = None;
/// assert_eq!(user_length.unwrap_or(DEFAULT_LOCAL_LENGTH), 1.0);
/// ```
pub const DEFAULT_LOCAL_LENGTH: f64 = 1.0;

/// Whether 2D sizing hypotheses allow quadrangles unless told otherwise.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_ALLOW_QUADRANGLES;
/// assert!(!DEFAULT_ALLOW_QUADRANGLES);
/// ```
pub const DEFAULT_ALLOW_QUADRANGLES: bool = false;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of segments a single edge may be divided into.
///
/// Safety limit against runaway discretization from tiny edge sizes.
///
/// # Examples
/// ```
/// use config::constants::MAX_SEGMENTS_PER_EDGE;
///
/// let requested = 250_000_usize;
/// assert!(requested > MAX_SEGMENTS_PER_EDGE);
/// ```
pub const MAX_SEGMENTS_PER_EDGE: usize = 100_000;

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Immutable snapshot of the settings a meshing engine runs with.
///
/// # Examples
/// ```
/// use config::constants::EngineConfig;
/// let config = EngineConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Edge length applied when a sizing hypothesis leaves it unset.
    pub default_length: f64,
    /// Tolerance for point and parameter comparisons.
    pub tolerance: f64,
    /// Upper bound on segments per edge.
    pub max_segments_per_edge: usize,
}

impl EngineConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EngineConfig;
    /// let cfg = EngineConfig::new(0.5, 1.0e-9, 1_000).expect("valid config");
    /// assert_eq!(cfg.default_length, 0.5);
    /// ```
    pub fn new(
        default_length: f64,
        tolerance: f64,
        max_segments_per_edge: usize,
    ) -> Result<Self, ConfigError> {
        if !(default_length.is_finite() && default_length > 0.0) {
            return Err(ConfigError::InvalidLength(default_length));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if max_segments_per_edge == 0 {
            return Err(ConfigError::InvalidSegmentLimit(max_segments_per_edge));
        }
        Ok(Self {
            default_length,
            tolerance,
            max_segments_per_edge,
        })
    }

    /// Returns a copy with a different default length, validated.
    ///
    /// # Examples
    /// ```
    /// use config::constants::EngineConfig;
    /// let cfg = EngineConfig::default().with_default_length(0.25).unwrap();
    /// assert_eq!(cfg.default_length, 0.25);
    /// ```
    pub fn with_default_length(self, default_length: f64) -> Result<Self, ConfigError> {
        Self::new(default_length, self.tolerance, self.max_segments_per_edge)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_LOCAL_LENGTH,
            tolerance: GEOMETRY_TOLERANCE,
            max_segments_per_edge: MAX_SEGMENTS_PER_EDGE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the default length is not a positive finite number.
    InvalidLength(f64),
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the segment limit is zero.
    InvalidSegmentLimit(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLength(value) => {
                write!(f, "default_length must be positive and finite: {value}")
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidSegmentLimit(value) => {
                write!(f, "max_segments_per_edge must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
