//! # Mesh Session
//!
//! A session binds one shape to an engine mesh, collects controls and runs
//! a single computation:
//!
//! ```text
//! Empty ──apply──→ Configuring ──compute──→ Computing ──→ Computed
//!   │                                           └───────→ Failed
//!   └──────────────────compute─────────────────┘
//! ```
//!
//! `Computed` and `Failed` are terminal. A failed session is not retried;
//! start a new one instead.

use std::fmt;
use std::path::Path;

use brep_shape::Shape;
use config::constants::EngineConfig;
use mesh_engine::{EngineMesh, Generator};
use tracing::{debug, info, warn};

use crate::control::Control;
use crate::dispatch::dispatch;
use crate::error::{MeshError, MeshResult};
use crate::mesh::MeshStatistics;
use crate::owner::{HypothesisOwner, HypothesisRecord};

/// Lifecycle of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Empty,
    Configuring,
    Computing,
    Computed,
    Failed,
}

impl SessionState {
    /// True for `Computed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Computed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Empty => "empty",
            SessionState::Configuring => "configuring",
            SessionState::Computing => "computing",
            SessionState::Computed => "computed",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Configuration and computation of one mesh.
#[derive(Debug)]
pub struct Session {
    // Dropped first: owned objects go before the mesh that refers to them.
    owner: HypothesisOwner,
    mesh: EngineMesh,
    generator: Generator,
    shape: Shape,
    state: SessionState,
}

impl Session {
    /// Creates a session for `shape` with the default engine configuration.
    pub fn new(shape: Shape) -> Self {
        Self::with_config(shape, EngineConfig::default())
    }

    pub fn with_config(shape: Shape, config: EngineConfig) -> Self {
        let mut generator = Generator::with_config(config);
        let mut mesh = generator.create_mesh();
        mesh.shape_to_mesh(shape.clone());
        debug!(mesh = mesh.id(), shape = %shape.id(), "session created");
        Self {
            owner: HypothesisOwner::new(),
            mesh,
            generator,
            shape,
            state: SessionState::Empty,
        }
    }

    /// Applies a control on top of the ones applied before.
    ///
    /// Objects created for earlier controls stay in place when this one
    /// fails.
    pub fn apply(&mut self, control: &Control) -> MeshResult<()> {
        self.ensure_configurable("apply control")?;
        self.state = SessionState::Configuring;
        dispatch(control, &mut self.owner, &mut self.mesh)
    }

    /// Generates the mesh over the whole shape.
    ///
    /// # Errors
    ///
    /// [`MeshError::MeshComputeError`] when the engine fails, which leaves
    /// the session `Failed`; [`MeshError::MeshStateError`] when the session
    /// already went through a computation.
    pub fn compute(&mut self) -> MeshResult<()> {
        self.ensure_configurable("compute")?;
        self.state = SessionState::Computing;
        info!(
            mesh = self.mesh.id(),
            objects = self.owner.len(),
            "computing mesh"
        );

        match self
            .generator
            .compute(&mut self.mesh, &self.shape, &self.owner)
        {
            Ok(()) => {
                self.state = SessionState::Computed;
                Ok(())
            }
            Err(error) => {
                warn!(mesh = self.mesh.id(), %error, "mesh computation failed");
                self.state = SessionState::Failed;
                Err(MeshError::MeshComputeError(error))
            }
        }
    }

    fn ensure_configurable(&self, operation: &'static str) -> MeshResult<()> {
        match self.state {
            SessionState::Empty | SessionState::Configuring => Ok(()),
            state => Err(MeshError::state(operation, state)),
        }
    }

    fn computed(&self, operation: &'static str) -> MeshResult<&EngineMesh> {
        match self.state {
            SessionState::Computed => Ok(&self.mesh),
            state => Err(MeshError::state(operation, state)),
        }
    }

    pub fn num_nodes(&self) -> MeshResult<usize> {
        Ok(self.computed("count nodes")?.nb_nodes())
    }

    pub fn num_edges(&self) -> MeshResult<usize> {
        Ok(self.computed("count edges")?.nb_edges())
    }

    pub fn num_faces(&self) -> MeshResult<usize> {
        Ok(self.computed("count faces")?.nb_faces())
    }

    pub fn num_triangles(&self) -> MeshResult<usize> {
        Ok(self.computed("count triangles")?.nb_triangles())
    }

    pub fn num_quadrangles(&self) -> MeshResult<usize> {
        Ok(self.computed("count quadrangles")?.nb_quadrangles())
    }

    pub fn num_tetras(&self) -> MeshResult<usize> {
        Ok(self.computed("count tetrahedra")?.nb_tetras())
    }

    /// All counts at once.
    pub fn statistics(&self) -> MeshResult<MeshStatistics> {
        Ok(self.computed("read statistics")?.counts().into())
    }

    /// Writes the computed mesh as a UNV file.
    pub fn export_unv(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        let path = path.as_ref();
        if self.state != SessionState::Computed {
            return Err(MeshError::export(
                path,
                format!("session is {}", self.state),
            ));
        }
        self.mesh
            .export_unv(path)
            .map_err(|error| MeshError::export(path, error.to_string()))?;
        info!(path = %path.display(), "mesh exported");
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Owned objects in creation order.
    pub fn hypotheses(&self) -> Vec<HypothesisRecord> {
        self.owner.records()
    }

    pub fn owner(&self) -> &HypothesisOwner {
        &self.owner
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn engine_mesh(&self) -> &EngineMesh {
        &self.mesh
    }
}
