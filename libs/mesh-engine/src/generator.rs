//! # Generator
//!
//! Creates engine meshes and computes them from their assignments.
//!
//! ## Resolution
//!
//! For every sub-shape of dimension `d`, the applicable algorithm is the
//! most recently assigned algorithm of dimension `>= d` whose target
//! contains the sub-shape. Its sizing is the most recent hypothesis of the
//! same dimension assigned to the same target; without one, engine defaults
//! apply. Global settings therefore come first and local ones refine them.

use std::collections::HashMap;

use brep_shape::{Geometry, Shape, ShapeId, ShapeKind};
use config::constants::{EngineConfig, DEFAULT_ALLOW_QUADRANGLES};
use tracing::{debug, info, trace};

use crate::algorithms::{regular_1d, surface_2d, volume_3d, MeshBuilder};
use crate::error::{EngineError, EngineResult};
use crate::hypothesis::{Algorithm, Catalog, ConfigRef, Hypothesis};
use crate::mesh::{Assignment, EngineMesh, MeshData};

/// Mesh generator.
///
/// # Example
///
/// ```rust
/// use mesh_engine::Generator;
///
/// let mut generator = Generator::new();
/// let first = generator.create_mesh();
/// let second = generator.create_mesh();
/// assert_ne!(first.id(), second.id());
/// ```
#[derive(Debug)]
pub struct Generator {
    config: EngineConfig,
    next_mesh_id: u32,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator with the default engine configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            next_mesh_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates an empty mesh owned by the caller.
    pub fn create_mesh(&mut self) -> EngineMesh {
        let mesh = EngineMesh::new(self.next_mesh_id);
        self.next_mesh_id += 1;
        mesh
    }

    /// Meshes `shape` using the assignments recorded on `mesh`.
    ///
    /// All or nothing: on error `mesh` keeps its previous contents.
    pub fn compute<C>(&self, mesh: &mut EngineMesh, shape: &Shape, catalog: &C) -> EngineResult<()>
    where
        C: Catalog + ?Sized,
    {
        let main = mesh.shape().ok_or(EngineError::NoShapeToMesh)?;
        if !main.contains(shape) {
            return Err(EngineError::ShapeNotInMesh { shape: shape.id() });
        }
        debug!(
            mesh = mesh.id(),
            shape = %shape.id(),
            assignments = mesh.assignments().len(),
            "computing mesh"
        );

        let data = self.build(mesh.assignments(), shape, catalog)?;
        mesh.commit(data);

        let counts = mesh.counts();
        info!(
            mesh = mesh.id(),
            nodes = counts.nodes,
            edges = counts.edges,
            faces = counts.faces,
            tetras = counts.tetras,
            "mesh computed"
        );
        Ok(())
    }

    fn build<C>(&self, assignments: &[Assignment], shape: &Shape, catalog: &C) -> EngineResult<MeshData>
    where
        C: Catalog + ?Sized,
    {
        let plan = Plan::resolve(assignments, catalog)?;
        let mut builder = MeshBuilder::new(&self.config);
        let mut meshed = 0_usize;

        let edges = shape.explore(ShapeKind::Edge);
        let mut counts = HashMap::new();
        for edge in &edges {
            if let Some(rule) = plan.rule_for(edge, 1) {
                let segments = regular_1d::segment_count(&self.config, edge, rule.length(&self.config))?;
                counts.insert(edge.id(), segments);
            }
        }
        let faces: Vec<Shape> = shape
            .explore(ShapeKind::Face)
            .into_iter()
            .filter(|face| plan.rule_for(face, 2).is_some())
            .collect();
        balance_opposite_edges(&faces, &mut counts);

        for edge in &edges {
            if let Some(&segments) = counts.get(&edge.id()) {
                regular_1d::discretize(&mut builder, edge, segments)?;
                meshed += 1;
            }
        }
        for face in &faces {
            if let Some(rule) = plan.rule_for(face, 2) {
                surface_2d::mesh_face(&mut builder, face, rule.allow_quadrangles())?;
                meshed += 1;
            }
        }
        for solid in shape.explore(ShapeKind::Solid) {
            if plan.rule_for(&solid, 3).is_some() {
                volume_3d::mesh_solid(&mut builder, &solid)?;
                meshed += 1;
            }
        }

        if meshed == 0 {
            return Err(EngineError::NoAlgorithm);
        }
        Ok(builder.finish())
    }
}

/// Raises segment counts so that opposite edges of every meshed face agree.
///
/// Counts spread along chains of opposite edges until each chain carries
/// its finest count, so a local refinement reaches across neighbouring
/// faces only in the direction it constrains.
fn balance_opposite_edges(faces: &[Shape], counts: &mut HashMap<ShapeId, usize>) {
    let pairs: Vec<(ShapeId, ShapeId)> = faces
        .iter()
        .filter_map(|face| match face.geometry() {
            Geometry::Face(geometry) => Some(geometry),
            _ => None,
        })
        .flat_map(|geometry| {
            let id = |k: usize| geometry.wire[k].edge.id();
            [(id(0), id(2)), (id(1), id(3))]
        })
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (a, b) in &pairs {
            let (Some(&na), Some(&nb)) = (counts.get(a), counts.get(b)) else {
                continue;
            };
            if na != nb {
                let finest = na.max(nb);
                counts.insert(*a, finest);
                counts.insert(*b, finest);
                changed = true;
            }
        }
    }
    trace!(pairs = pairs.len(), "edge counts balanced");
}

/// Assignments with their ids resolved.
struct Plan<'a> {
    entries: Vec<(&'a Shape, ConfigRef<'a>)>,
}

/// Algorithm and sizing applying to one sub-shape.
struct Rule<'a> {
    algorithm: &'a Algorithm,
    sizing: Option<&'a Hypothesis>,
}

impl<'a> Plan<'a> {
    fn resolve<C>(assignments: &'a [Assignment], catalog: &'a C) -> EngineResult<Self>
    where
        C: Catalog + ?Sized,
    {
        let entries = assignments
            .iter()
            .map(|a| {
                catalog
                    .lookup(a.id)
                    .map(|object| (&a.target, object))
                    .ok_or(EngineError::UnknownId { id: a.id })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { entries })
    }

    fn rule_for(&self, sub_shape: &Shape, dimension: u8) -> Option<Rule<'a>> {
        let (target, algorithm) = self.entries.iter().rev().find_map(|(target, object)| match object {
            ConfigRef::Algorithm(algorithm)
                if algorithm.dimension() >= dimension && target.contains(sub_shape) =>
            {
                Some((*target, *algorithm))
            }
            _ => None,
        })?;
        let sizing = self.entries.iter().rev().find_map(|(assigned, object)| match object {
            ConfigRef::Hypothesis(h) if h.dimension() == algorithm.dimension() && *assigned == target => {
                Some(*h)
            }
            _ => None,
        });
        Some(Rule { algorithm, sizing })
    }
}

impl Rule<'_> {
    fn length(&self, config: &EngineConfig) -> f64 {
        self.sizing
            .and_then(Hypothesis::local_length)
            .unwrap_or(config.default_length)
    }

    /// Volume algorithms always triangulate the faces they mesh.
    fn allow_quadrangles(&self) -> bool {
        match self.algorithm {
            Algorithm::Surface2D(_) => self
                .sizing
                .map(Hypothesis::allow_quadrangles)
                .unwrap_or(DEFAULT_ALLOW_QUADRANGLES),
            _ => false,
        }
    }
}
