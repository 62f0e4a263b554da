//! # Shape Handles
//!
//! Reference-counted topological entities with identity semantics.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::DVec3;

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a topological entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Topological kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Vertex,
    Edge,
    Face,
    Solid,
    Compound,
}

impl ShapeKind {
    /// Topological dimension, `None` for compounds which mix dimensions.
    pub fn dimension(self) -> Option<u8> {
        match self {
            ShapeKind::Vertex => Some(0),
            ShapeKind::Edge => Some(1),
            ShapeKind::Face => Some(2),
            ShapeKind::Solid => Some(3),
            ShapeKind::Compound => None,
        }
    }
}

/// An edge as used by a face wire.
///
/// `forward` is true when walking the wire goes from the edge's start
/// vertex to its end vertex.
#[derive(Debug, Clone)]
pub struct OrientedEdge {
    pub edge: Shape,
    pub forward: bool,
}

/// Planar parallelogram face spanned by `u` and `v` from `origin`.
///
/// The wire runs `origin → origin+u → origin+u+v → origin+v → origin`.
#[derive(Debug, Clone)]
pub struct FaceGeometry {
    pub origin: DVec3,
    pub u: DVec3,
    pub v: DVec3,
    pub wire: [OrientedEdge; 4],
}

impl FaceGeometry {
    /// Point at parameters `(s, t)` in the unit square.
    #[inline]
    pub fn point_at(&self, s: f64, t: f64) -> DVec3 {
        self.origin + self.u * s + self.v * t
    }

    /// Inverse of [`FaceGeometry::point_at`]: parameters of `point` if it lies
    /// on the face plane within `tolerance`.
    pub fn parameters_of(&self, point: DVec3, tolerance: f64) -> Option<(f64, f64)> {
        let w = point - self.origin;
        let uu = self.u.dot(self.u);
        let uv = self.u.dot(self.v);
        let vv = self.v.dot(self.v);
        let det = uu * vv - uv * uv;
        if det.abs() < tolerance {
            return None;
        }
        let wu = w.dot(self.u);
        let wv = w.dot(self.v);
        let s = (wu * vv - wv * uv) / det;
        let t = (wv * uu - wu * uv) / det;
        if self.point_at(s, t).distance(point) > tolerance {
            return None;
        }
        Some((s, t))
    }
}

/// Parallelepiped solid spanned by three axes from `origin`.
#[derive(Debug, Clone)]
pub struct SolidGeometry {
    pub origin: DVec3,
    pub axes: [DVec3; 3],
    /// Boundary faces ordered `-a, +a, -b, +b, -c, +c`.
    pub faces: Vec<Shape>,
}

impl SolidGeometry {
    /// Point at parameters in the unit cube.
    #[inline]
    pub fn point_at(&self, params: [f64; 3]) -> DVec3 {
        self.origin + self.axes[0] * params[0] + self.axes[1] * params[1] + self.axes[2] * params[2]
    }
}

/// Geometry carried by each kind of shape.
#[derive(Debug)]
pub enum Geometry {
    Vertex { point: DVec3 },
    Edge { start: Shape, end: Shape },
    Face(FaceGeometry),
    Solid(SolidGeometry),
    Compound { children: Vec<Shape> },
}

#[derive(Debug)]
struct ShapeData {
    id: ShapeId,
    geometry: Geometry,
}

/// Handle to an immutable boundary-representation entity.
///
/// Cloning copies the handle, not the entity. Equality and hashing follow
/// identity: two handles are equal iff they refer to the same entity.
#[derive(Clone)]
pub struct Shape {
    data: Arc<ShapeData>,
}

impl Shape {
    pub(crate) fn from_geometry(geometry: Geometry) -> Self {
        Self {
            data: Arc::new(ShapeData {
                id: ShapeId::next(),
                geometry,
            }),
        }
    }

    /// Returns the identity of this shape.
    #[inline]
    pub fn id(&self) -> ShapeId {
        self.data.id
    }

    /// Returns the topological kind.
    pub fn kind(&self) -> ShapeKind {
        match &self.data.geometry {
            Geometry::Vertex { .. } => ShapeKind::Vertex,
            Geometry::Edge { .. } => ShapeKind::Edge,
            Geometry::Face(_) => ShapeKind::Face,
            Geometry::Solid(_) => ShapeKind::Solid,
            Geometry::Compound { .. } => ShapeKind::Compound,
        }
    }

    /// Returns the underlying geometry.
    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.data.geometry
    }

    /// Position of a vertex.
    pub fn point(&self) -> Option<DVec3> {
        match &self.data.geometry {
            Geometry::Vertex { point } => Some(*point),
            _ => None,
        }
    }

    /// Start and end vertices of an edge.
    pub fn vertices(&self) -> Option<(&Shape, &Shape)> {
        match &self.data.geometry {
            Geometry::Edge { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// Length of an edge.
    pub fn length(&self) -> Option<f64> {
        let (start, end) = self.vertices()?;
        Some(start.point()?.distance(end.point()?))
    }

    /// Direct sub-shapes, in construction order.
    pub fn children(&self) -> Vec<Shape> {
        match &self.data.geometry {
            Geometry::Vertex { .. } => Vec::new(),
            Geometry::Edge { start, end } => vec![start.clone(), end.clone()],
            Geometry::Face(face) => face.wire.iter().map(|w| w.edge.clone()).collect(),
            Geometry::Solid(solid) => solid.faces.clone(),
            Geometry::Compound { children } => children.clone(),
        }
    }

    /// Unique sub-shapes of `kind` (including `self`), depth-first.
    pub fn explore(&self, kind: ShapeKind) -> Vec<Shape> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        self.collect(kind, &mut seen, &mut found);
        found
    }

    fn collect(&self, kind: ShapeKind, seen: &mut HashSet<ShapeId>, found: &mut Vec<Shape>) {
        if !seen.insert(self.id()) {
            return;
        }
        if self.kind() == kind {
            found.push(self.clone());
        }
        for child in self.children() {
            child.collect(kind, seen, found);
        }
    }

    /// True if `other` is this shape or one of its sub-shapes.
    pub fn contains(&self, other: &Shape) -> bool {
        if self == other {
            return true;
        }
        // A shape never contains something of equal or higher dimension.
        if let (Some(mine), Some(theirs)) = (self.kind().dimension(), other.kind().dimension()) {
            if mine <= theirs {
                return false;
            }
        }
        self.children().iter().any(|child| child.contains(other))
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .finish()
    }
}
