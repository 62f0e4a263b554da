//! # Mesh Facade
//!
//! [`Mesh`] is a cheap, cloneable handle on a computed [`Session`]. All
//! clones share the same session; queries read counts the engine stored
//! when the mesh was committed.

use std::path::Path;
use std::sync::Arc;

use brep_shape::Shape;
use config::constants::EngineConfig;
use mesh_engine::MeshCounts;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::control::Control;
use crate::error::{MeshError, MeshResult};
use crate::session::{Session, SessionState};

/// Node and element counts of a computed mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshStatistics {
    pub nodes: usize,
    pub edges: usize,
    pub faces: usize,
    pub triangles: usize,
    pub quadrangles: usize,
    pub tetras: usize,
}

impl From<MeshCounts> for MeshStatistics {
    fn from(counts: MeshCounts) -> Self {
        Self {
            nodes: counts.nodes,
            edges: counts.edges,
            faces: counts.faces,
            triangles: counts.triangles,
            quadrangles: counts.quadrangles,
            tetras: counts.tetras,
        }
    }
}

/// Shared handle on a computed mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    session: Arc<Session>,
}

impl Mesh {
    /// Meshes `shape`: the global control first, then `locals` in order.
    ///
    /// The first failing control or a failed computation aborts; no handle
    /// is returned then.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{Control, Mesh, Shape};
    /// use glam::DVec3;
    ///
    /// let solid = Shape::make_box(DVec3::ZERO, DVec3::splat(2.0))?;
    /// let mesh = Mesh::make_mesh(&solid, &Control::control_3d(solid.clone(), None, None), &[])?;
    /// assert_eq!(mesh.num_nodes(), 27);
    /// assert_eq!(mesh.num_tetras(), 48);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn make_mesh(shape: &Shape, global: &Control, locals: &[Control]) -> MeshResult<Self> {
        Self::make_mesh_with_config(shape, global, locals, EngineConfig::default())
    }

    pub fn make_mesh_with_config(
        shape: &Shape,
        global: &Control,
        locals: &[Control],
        config: EngineConfig,
    ) -> MeshResult<Self> {
        let mut session = Session::with_config(shape.clone(), config);
        session.apply(global)?;
        for local in locals {
            session.apply(local)?;
        }
        session.compute()?;
        info!(locals = locals.len(), "mesh ready");
        Self::try_from(session)
    }

    pub fn num_nodes(&self) -> usize {
        self.session.engine_mesh().nb_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.session.engine_mesh().nb_edges()
    }

    pub fn num_faces(&self) -> usize {
        self.session.engine_mesh().nb_faces()
    }

    pub fn num_triangles(&self) -> usize {
        self.session.engine_mesh().nb_triangles()
    }

    pub fn num_quadrangles(&self) -> usize {
        self.session.engine_mesh().nb_quadrangles()
    }

    pub fn num_tetras(&self) -> usize {
        self.session.engine_mesh().nb_tetras()
    }

    pub fn statistics(&self) -> MeshStatistics {
        self.session.engine_mesh().counts().into()
    }

    /// Writes the mesh as a UNV file.
    pub fn export_unv(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        self.session.export_unv(path)
    }

    pub fn shape(&self) -> &Shape {
        self.session.shape()
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl TryFrom<Session> for Mesh {
    type Error = MeshError;

    /// Wraps a session computed by the caller.
    fn try_from(session: Session) -> Result<Self, Self::Error> {
        match session.state() {
            SessionState::Computed => Ok(Self {
                session: Arc::new(session),
            }),
            state => Err(MeshError::state("wrap session", state)),
        }
    }
}
