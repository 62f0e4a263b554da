//! # Controls
//!
//! A [`Control`] requests meshing of one dimension on a region: an optional
//! target element size, an optional deflection and, for surfaces, whether
//! quadrangles are allowed. Controls are immutable and consumed by
//! [`Session::apply`](crate::Session::apply).

use std::fmt;

use brep_shape::Shape;

use crate::error::MeshError;

/// Meshing dimension of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Edge discretization.
    One,
    /// Surface meshing, edges included.
    Two,
    /// Volume meshing, surfaces and edges included.
    Three,
}

impl Dimension {
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = MeshError;

    fn try_from(dimension: u8) -> Result<Self, Self::Error> {
        match dimension {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            _ => Err(MeshError::ControlDimensionError { dimension }),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.value())
    }
}

/// Sizing and algorithm request for one region.
///
/// # Example
///
/// ```rust
/// use brep_mesh::{Control, Shape};
/// use glam::DVec3;
///
/// let edge = Shape::segment(DVec3::ZERO, DVec3::X)?;
/// let control = Control::control_1d(edge, Some(0.1), None);
/// assert_eq!(control.dimension(), 1);
/// assert_eq!(control.edge_size(), Some(0.1));
/// assert!(!control.allow_quads());
/// # Ok::<(), brep_shape::ShapeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Control {
    dimension: u8,
    region: Shape,
    edge_size: Option<f64>,
    deflection: Option<f64>,
    allow_quads: bool,
}

impl Control {
    /// Edge discretization of `region`.
    pub fn control_1d(region: Shape, edge_size: Option<f64>, deflection: Option<f64>) -> Self {
        Self::with_dimension(1, region, edge_size, deflection, false)
    }

    /// Surface meshing of `region`; `allow_quads` selects quadrangles.
    pub fn control_2d(
        region: Shape,
        edge_size: Option<f64>,
        deflection: Option<f64>,
        allow_quads: bool,
    ) -> Self {
        Self::with_dimension(2, region, edge_size, deflection, allow_quads)
    }

    /// Volume meshing of `region`.
    pub fn control_3d(region: Shape, edge_size: Option<f64>, deflection: Option<f64>) -> Self {
        Self::with_dimension(3, region, edge_size, deflection, false)
    }

    /// Builds a control from a raw dimension.
    ///
    /// The dimension is checked when the control is applied; anything but
    /// 1, 2 or 3 is rejected there with
    /// [`MeshError::ControlDimensionError`].
    pub fn with_dimension(
        dimension: u8,
        region: Shape,
        edge_size: Option<f64>,
        deflection: Option<f64>,
        allow_quads: bool,
    ) -> Self {
        Self {
            dimension,
            region,
            edge_size,
            deflection,
            allow_quads,
        }
    }

    #[inline]
    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    #[inline]
    pub fn region(&self) -> &Shape {
        &self.region
    }

    #[inline]
    pub fn edge_size(&self) -> Option<f64> {
        self.edge_size
    }

    /// Reserved; no hypothesis consumes it yet.
    #[inline]
    pub fn deflection(&self) -> Option<f64> {
        self.deflection
    }

    #[inline]
    pub fn allow_quads(&self) -> bool {
        self.allow_quads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn region() -> Shape {
        Shape::segment(DVec3::ZERO, DVec3::Y).unwrap()
    }

    #[test]
    fn test_factories_fix_dimension() {
        assert_eq!(Control::control_1d(region(), None, None).dimension(), 1);
        assert_eq!(Control::control_2d(region(), None, None, false).dimension(), 2);
        assert_eq!(Control::control_3d(region(), None, None).dimension(), 3);
    }

    #[test]
    fn test_allow_quads_only_kept_for_surfaces() {
        assert!(Control::control_2d(region(), None, None, true).allow_quads());
        assert!(!Control::control_1d(region(), None, None).allow_quads());
        assert!(!Control::control_3d(region(), None, None).allow_quads());
        assert!(Control::with_dimension(3, region(), None, None, true).allow_quads());
    }

    #[test]
    fn test_region_is_shared_handle() {
        let edge = region();
        let control = Control::control_1d(edge.clone(), Some(0.5), Some(0.01));
        assert_eq!(control.region(), &edge);
        assert_eq!(control.deflection(), Some(0.01));
    }

    #[test]
    fn test_dimension_conversion() {
        assert_eq!(Dimension::try_from(2).unwrap(), Dimension::Two);
        assert_eq!(Dimension::Three.value(), 3);
        assert_eq!(Dimension::One.to_string(), "1D");
        for raw in [0, 4, 255] {
            match Dimension::try_from(raw) {
                Err(MeshError::ControlDimensionError { dimension }) => assert_eq!(dimension, raw),
                other => panic!("expected dimension error, got {other:?}"),
            }
        }
    }
}
