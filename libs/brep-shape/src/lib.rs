//! # B-rep Shape
//!
//! Boundary-representation handles for the meshing pipeline.
//!
//! ## Architecture
//!
//! ```text
//! brep-shape (Shape) → mesh-engine (discretization) → brep-mesh (controls, sessions)
//! ```
//!
//! A [`Shape`] is a cheap, cloneable reference to an immutable topological
//! entity. Two handles are equal when they refer to the same entity, so a
//! face explored out of a box compares equal to the face stored inside it.
//!
//! ## Usage
//!
//! ```rust
//! use brep_shape::{Shape, ShapeKind};
//! use glam::DVec3;
//!
//! let cube = Shape::make_box(DVec3::ZERO, DVec3::splat(2.0))?;
//! assert_eq!(cube.explore(ShapeKind::Face).len(), 6);
//! assert_eq!(cube.explore(ShapeKind::Edge).len(), 12);
//!
//! let top = cube.explore(ShapeKind::Face)[5].clone();
//! assert!(cube.contains(&top));
//! # Ok::<(), brep_shape::ShapeError>(())
//! ```

mod builders;
pub mod error;
pub mod shape;

pub use error::{ShapeError, ShapeResult};
pub use shape::{FaceGeometry, Geometry, OrientedEdge, Shape, ShapeId, ShapeKind, SolidGeometry};
