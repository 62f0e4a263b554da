//! # Engine Mesh
//!
//! Mesh data (nodes and elements), per-kind counts and the engine-side mesh
//! object that records hypothesis assignments.

use std::path::Path;

use brep_shape::Shape;
use glam::DVec3;
use tracing::debug;

use crate::error::EngineResult;
use crate::hypothesis::HypothesisId;
use crate::unv;

/// Index of a node in [`MeshData::nodes`].
pub type NodeId = u32;

/// Supported element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Segment,
    Triangle,
    Quadrangle,
    Tetrahedron,
}

impl ElementKind {
    /// Number of nodes of a linear element of this kind.
    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Segment => 2,
            ElementKind::Triangle => 3,
            ElementKind::Quadrangle => 4,
            ElementKind::Tetrahedron => 4,
        }
    }
}

/// A mesh element referring to nodes by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub nodes: Vec<NodeId>,
}

/// Element counts by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshCounts {
    pub nodes: usize,
    /// 1D elements.
    pub edges: usize,
    /// 2D elements of any shape.
    pub faces: usize,
    pub triangles: usize,
    pub quadrangles: usize,
    pub tetras: usize,
}

/// Nodes and elements of a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    nodes: Vec<DVec3>,
    elements: Vec<Element>,
}

impl MeshData {
    /// Creates empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index.
    pub fn add_node(&mut self, position: DVec3) -> NodeId {
        let index = self.nodes.len() as NodeId;
        self.nodes.push(position);
        index
    }

    /// Adds an element.
    pub fn add_element(&mut self, kind: ElementKind, nodes: Vec<NodeId>) {
        self.elements.push(Element { kind, nodes });
    }

    #[inline]
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements of `kind`.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    /// Tallies nodes and elements.
    pub fn counts(&self) -> MeshCounts {
        let mut counts = MeshCounts {
            nodes: self.nodes.len(),
            ..MeshCounts::default()
        };
        for element in &self.elements {
            match element.kind {
                ElementKind::Segment => counts.edges += 1,
                ElementKind::Triangle => counts.triangles += 1,
                ElementKind::Quadrangle => counts.quadrangles += 1,
                ElementKind::Tetrahedron => counts.tetras += 1,
            }
        }
        counts.faces = counts.triangles + counts.quadrangles;
        counts
    }
}

/// A configuration object attached to a sub-shape.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: Shape,
    pub id: HypothesisId,
}

/// Outcome of [`EngineMesh::add_hypothesis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypothesisStatus {
    Ok,
    /// The target is not part of the meshed shape; the assignment is ignored.
    BadSubShape,
    /// No shape was bound with [`EngineMesh::shape_to_mesh`].
    NoShapeToMesh,
}

/// Engine-side mesh: the bound shape, its assignments and, once computed,
/// the generated nodes and elements.
#[derive(Debug)]
pub struct EngineMesh {
    id: u32,
    shape: Option<Shape>,
    assignments: Vec<Assignment>,
    data: MeshData,
    counts: MeshCounts,
    computed: bool,
}

impl EngineMesh {
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id,
            shape: None,
            assignments: Vec::new(),
            data: MeshData::new(),
            counts: MeshCounts::default(),
            computed: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Binds the shape to mesh, dropping earlier assignments and results.
    pub fn shape_to_mesh(&mut self, shape: Shape) {
        self.shape = Some(shape);
        self.assignments.clear();
        self.data = MeshData::new();
        self.counts = MeshCounts::default();
        self.computed = false;
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    /// Attaches the configuration object `id` to `target`.
    ///
    /// Later assignments take precedence over earlier ones wherever their
    /// targets overlap.
    pub fn add_hypothesis(&mut self, target: &Shape, id: HypothesisId) -> HypothesisStatus {
        let Some(shape) = &self.shape else {
            return HypothesisStatus::NoShapeToMesh;
        };
        if !shape.contains(target) {
            return HypothesisStatus::BadSubShape;
        }
        debug!(mesh = self.id, %id, target = %target.id(), "hypothesis assigned");
        self.assignments.push(Assignment {
            target: target.clone(),
            id,
        });
        HypothesisStatus::Ok
    }

    /// Assignments in the order they were made.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub(crate) fn commit(&mut self, data: MeshData) {
        self.counts = data.counts();
        self.data = data;
        self.computed = true;
    }

    /// True once a compute has succeeded.
    pub fn is_computed(&self) -> bool {
        self.computed
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn counts(&self) -> MeshCounts {
        self.counts
    }

    pub fn nb_nodes(&self) -> usize {
        self.counts.nodes
    }

    pub fn nb_edges(&self) -> usize {
        self.counts.edges
    }

    pub fn nb_faces(&self) -> usize {
        self.counts.faces
    }

    pub fn nb_triangles(&self) -> usize {
        self.counts.triangles
    }

    pub fn nb_quadrangles(&self) -> usize {
        self.counts.quadrangles
    }

    pub fn nb_tetras(&self) -> usize {
        self.counts.tetras
    }

    /// Writes the mesh as a UNV file.
    pub fn export_unv(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        unv::write(&self.data, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_kind() {
        let mut data = MeshData::new();
        for _ in 0..5 {
            data.add_node(DVec3::ZERO);
        }
        data.add_element(ElementKind::Segment, vec![0, 1]);
        data.add_element(ElementKind::Triangle, vec![0, 1, 2]);
        data.add_element(ElementKind::Quadrangle, vec![0, 1, 2, 3]);
        data.add_element(ElementKind::Tetrahedron, vec![0, 1, 2, 4]);

        let counts = data.counts();
        assert_eq!(counts.nodes, 5);
        assert_eq!(counts.edges, 1);
        assert_eq!(counts.faces, 2);
        assert_eq!(counts.triangles, 1);
        assert_eq!(counts.quadrangles, 1);
        assert_eq!(counts.tetras, 1);
    }

    #[test]
    fn test_add_hypothesis_requires_shape() {
        let mut mesh = EngineMesh::new(0);
        let edge = Shape::segment(DVec3::ZERO, DVec3::X).unwrap();
        assert_eq!(
            mesh.add_hypothesis(&edge, HypothesisId::new(0)),
            HypothesisStatus::NoShapeToMesh
        );
    }

    #[test]
    fn test_add_hypothesis_rejects_foreign_shape() {
        let mut mesh = EngineMesh::new(0);
        mesh.shape_to_mesh(Shape::segment(DVec3::ZERO, DVec3::X).unwrap());
        let other = Shape::segment(DVec3::ZERO, DVec3::X).unwrap();
        assert_eq!(
            mesh.add_hypothesis(&other, HypothesisId::new(0)),
            HypothesisStatus::BadSubShape
        );
        assert!(mesh.assignments().is_empty());
    }

    #[test]
    fn test_add_hypothesis_keeps_order() {
        let face = Shape::rectangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        let edge = face.children()[0].clone();
        let mut mesh = EngineMesh::new(0);
        mesh.shape_to_mesh(face.clone());
        assert_eq!(mesh.add_hypothesis(&face, HypothesisId::new(0)), HypothesisStatus::Ok);
        assert_eq!(mesh.add_hypothesis(&edge, HypothesisId::new(1)), HypothesisStatus::Ok);
        let ids: Vec<u32> = mesh.assignments().iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
