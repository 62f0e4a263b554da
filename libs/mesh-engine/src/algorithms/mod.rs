//! # Discretization Algorithms
//!
//! Shared scratch state for one compute pass. Nodes created for a vertex or
//! an edge are reused by every face and solid bounded by it, so the result
//! is conforming.

pub(crate) mod regular_1d;
pub(crate) mod surface_2d;
pub(crate) mod volume_3d;

use std::collections::HashMap;

use brep_shape::{FaceGeometry, OrientedEdge, Shape, ShapeId, ShapeKind};
use config::constants::EngineConfig;
use glam::DVec3;

use crate::error::{EngineError, EngineResult};
use crate::mesh::{MeshData, NodeId};

/// Allowed drift, in grid cells, when snapping a point onto a face grid.
const GRID_SNAP: f64 = 1e-6;

/// Structured node grid of a meshed face.
#[derive(Debug, Clone)]
pub(crate) struct FaceGrid {
    geometry: FaceGeometry,
    nu: usize,
    nv: usize,
    /// Row-major, `j * (nu + 1) + i`.
    nodes: Vec<NodeId>,
    quadrangles: bool,
}

impl FaceGrid {
    pub(crate) fn new(geometry: FaceGeometry, nu: usize, nv: usize, nodes: Vec<NodeId>, quadrangles: bool) -> Self {
        Self {
            geometry,
            nu,
            nv,
            nodes,
            quadrangles,
        }
    }

    pub(crate) fn has_quadrangles(&self) -> bool {
        self.quadrangles
    }

    /// Node of this grid located at `point`, if any.
    pub(crate) fn node_at(&self, point: DVec3, tolerance: f64) -> Option<NodeId> {
        let (s, t) = self.geometry.parameters_of(point, tolerance)?;
        let i = snap(s * self.nu as f64, self.nu)?;
        let j = snap(t * self.nv as f64, self.nv)?;
        self.nodes.get(j * (self.nu + 1) + i).copied()
    }
}

fn snap(value: f64, max: usize) -> Option<usize> {
    let rounded = value.round();
    if (value - rounded).abs() > GRID_SNAP || rounded < 0.0 || rounded > max as f64 {
        return None;
    }
    Some(rounded as usize)
}

/// Scratch mesh built during one compute pass.
pub(crate) struct MeshBuilder<'c> {
    config: &'c EngineConfig,
    data: MeshData,
    vertex_nodes: HashMap<ShapeId, NodeId>,
    edge_nodes: HashMap<ShapeId, Vec<NodeId>>,
    face_grids: HashMap<ShapeId, FaceGrid>,
}

impl<'c> MeshBuilder<'c> {
    pub(crate) fn new(config: &'c EngineConfig) -> Self {
        Self {
            config,
            data: MeshData::new(),
            vertex_nodes: HashMap::new(),
            edge_nodes: HashMap::new(),
            face_grids: HashMap::new(),
        }
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        self.config
    }

    pub(crate) fn data_mut(&mut self) -> &mut MeshData {
        &mut self.data
    }

    /// Node sitting on `vertex`, created on first use.
    pub(crate) fn vertex_node(&mut self, vertex: &Shape) -> EngineResult<NodeId> {
        if let Some(node) = self.vertex_nodes.get(&vertex.id()) {
            return Ok(*node);
        }
        let point = vertex.point().ok_or_else(|| unexpected(vertex, ShapeKind::Vertex))?;
        let node = self.data.add_node(point);
        self.vertex_nodes.insert(vertex.id(), node);
        Ok(node)
    }

    pub(crate) fn edge_nodes(&self, edge: ShapeId) -> Option<&[NodeId]> {
        self.edge_nodes.get(&edge).map(Vec::as_slice)
    }

    pub(crate) fn set_edge_nodes(&mut self, edge: ShapeId, nodes: Vec<NodeId>) {
        self.edge_nodes.insert(edge, nodes);
    }

    /// Edge nodes in the direction the wire walks the edge.
    pub(crate) fn wire_nodes(&self, oriented: &OrientedEdge) -> EngineResult<Vec<NodeId>> {
        let nodes = self
            .edge_nodes(oriented.edge.id())
            .ok_or(EngineError::NotDiscretized {
                shape: oriented.edge.id(),
                kind: ShapeKind::Edge,
            })?;
        let mut nodes = nodes.to_vec();
        if !oriented.forward {
            nodes.reverse();
        }
        Ok(nodes)
    }

    pub(crate) fn face_grid(&self, face: ShapeId) -> Option<&FaceGrid> {
        self.face_grids.get(&face)
    }

    pub(crate) fn finish(self) -> MeshData {
        self.data
    }
}

pub(crate) fn unexpected(shape: &Shape, expected: ShapeKind) -> EngineError {
    EngineError::UnexpectedShape {
        shape: shape.id(),
        found: shape.kind(),
        expected,
    }
}
