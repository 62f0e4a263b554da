//! # Tests for Config Constants
//!
//! Unit tests verifying the sanity of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_tolerance_is_positive() {
    assert!(GEOMETRY_TOLERANCE > 0.0, "GEOMETRY_TOLERANCE must be positive");
}

#[test]
fn test_tolerance_is_small() {
    assert!(
        GEOMETRY_TOLERANCE < 1e-6,
        "GEOMETRY_TOLERANCE should be small for precision"
    );
}

// =============================================================================
// ENGINE DEFAULT TESTS
// =============================================================================

#[test]
fn test_default_length_is_positive() {
    assert!(DEFAULT_LOCAL_LENGTH > 0.0);
}

#[test]
fn test_default_length_far_above_tolerance() {
    assert!(DEFAULT_LOCAL_LENGTH > GEOMETRY_TOLERANCE * 1e3);
}

#[test]
fn test_quadrangles_disabled_by_default() {
    // Surfaces are triangulated unless a control asks for quads
    assert!(!DEFAULT_ALLOW_QUADRANGLES);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_segment_limit_reasonable() {
    assert!(MAX_SEGMENTS_PER_EDGE >= 1_000);
    assert!(MAX_SEGMENTS_PER_EDGE <= 10_000_000);
}
