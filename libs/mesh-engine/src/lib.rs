//! # Mesh Engine
//!
//! Reference mesh-generation engine for `brep-shape` shapes.
//!
//! ## Architecture
//!
//! ```text
//! Hypotheses + Algorithms (by id) ─┐
//!                                  ├─→ Generator::compute → EngineMesh → UNV
//! EngineMesh assignments ──────────┘
//! ```
//!
//! Configuration objects are owned by the caller and looked up by id
//! through the [`Catalog`] trait. An [`EngineMesh`] only records which id
//! was attached to which sub-shape; [`Generator::compute`] resolves those
//! ids at compute time.
//!
//! ## Algorithms
//!
//! - **Regular1D**: uniform division of straight edges
//! - **Surface2D**: structured grids on parallelogram faces (triangles or quads)
//! - **Volume3D**: surface triangles plus structured tetrahedra in parallelepipeds
//!
//! ## Usage
//!
//! ```rust
//! use brep_shape::Shape;
//! use glam::DVec3;
//! use mesh_engine::{Algorithm, ConfigObject, Generator, Hypothesis, HypothesisId, LocalLength, Regular1D};
//!
//! let edge = Shape::segment(DVec3::ZERO, DVec3::X * 2.0)?;
//! let mut length = LocalLength::new(HypothesisId::new(0));
//! length.set_length(0.5)?;
//! let objects = vec![
//!     ConfigObject::Hypothesis(Hypothesis::from(length)),
//!     ConfigObject::Algorithm(Algorithm::from(Regular1D::new(HypothesisId::new(1)))),
//! ];
//!
//! let mut generator = Generator::new();
//! let mut mesh = generator.create_mesh();
//! mesh.shape_to_mesh(edge.clone());
//! mesh.add_hypothesis(&edge, HypothesisId::new(0));
//! mesh.add_hypothesis(&edge, HypothesisId::new(1));
//! generator.compute(&mut mesh, &edge, objects.as_slice())?;
//!
//! assert_eq!(mesh.nb_edges(), 4);
//! assert_eq!(mesh.nb_nodes(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod algorithms;
pub mod error;
pub mod generator;
pub mod hypothesis;
pub mod mesh;
pub mod unv;

pub use error::{EngineError, EngineResult};
pub use generator::Generator;
pub use hypothesis::{
    Algorithm, Catalog, ConfigObject, ConfigRef, Hypothesis, HypothesisId, LocalLength, Regular1D,
    Surface2D, SurfaceSizing, Volume3D, VolumeSizing,
};
pub use mesh::{
    Assignment, Element, ElementKind, EngineMesh, HypothesisStatus, MeshCounts, MeshData, NodeId,
};
