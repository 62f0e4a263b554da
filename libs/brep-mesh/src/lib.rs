//! # B-rep Mesh
//!
//! Configures and drives mesh generation over a B-rep shape.
//!
//! ## Architecture
//!
//! ```text
//! Control (global) ─┐
//! Control (local)  ─┼─→ Dispatcher → HypothesisOwner ─→ Session::compute → Mesh
//! Control (local)  ─┘        │                              ▲
//!                            └─→ EngineMesh assignments ────┘
//! ```
//!
//! A [`Control`] asks for sizing and an algorithm of one dimension on a
//! region. The dispatcher turns it into one sizing hypothesis and one
//! algorithm, both owned by the session's [`HypothesisOwner`] and attached
//! to the region by id. Controls applied later win where regions overlap.
//!
//! ## Usage
//!
//! ```rust
//! use brep_mesh::{Control, Mesh, Shape, ShapeKind};
//! use glam::DVec3;
//!
//! let solid = Shape::make_box(DVec3::ZERO, DVec3::splat(2.0))?;
//! let top = solid.explore(ShapeKind::Face).pop().ok_or("box without faces")?;
//!
//! let global = Control::control_2d(solid.clone(), None, None, true);
//! let local = Control::control_2d(top, None, None, false);
//! let mesh = Mesh::make_mesh(&solid, &global, &[local])?;
//!
//! assert_eq!(mesh.num_quadrangles(), 20);
//! assert_eq!(mesh.num_triangles(), 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod control;
mod dispatch;
pub mod error;
pub mod mesh;
pub mod owner;
pub mod session;

pub use brep_shape::{Shape, ShapeKind};
pub use config::constants::EngineConfig;
pub use control::{Control, Dimension};
pub use error::{MeshError, MeshResult};
pub use mesh::{Mesh, MeshStatistics};
pub use mesh_engine::{EngineError, HypothesisId};
pub use owner::{HypothesisOwner, HypothesisRecord, RecordKind};
pub use session::{Session, SessionState};
