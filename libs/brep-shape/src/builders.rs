//! # Shape Builders
//!
//! Constructors for vertices, segments, rectangles, boxes and compounds.

use config::constants::GEOMETRY_TOLERANCE;
use glam::DVec3;

use crate::error::{ShapeError, ShapeResult};
use crate::shape::{FaceGeometry, Geometry, OrientedEdge, Shape, SolidGeometry};

impl Shape {
    /// Creates a vertex at `point`.
    pub fn vertex(point: DVec3) -> Shape {
        Shape::from_geometry(Geometry::Vertex { point })
    }

    /// Creates a straight edge between two new vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_shape::Shape;
    /// use glam::DVec3;
    ///
    /// let edge = Shape::segment(DVec3::ZERO, DVec3::X * 2.0).unwrap();
    /// assert_eq!(edge.length(), Some(2.0));
    /// ```
    pub fn segment(start: DVec3, end: DVec3) -> ShapeResult<Shape> {
        Shape::edge_between(&Shape::vertex(start), &Shape::vertex(end))
    }

    /// Creates a straight edge joining two existing vertices.
    pub fn edge_between(start: &Shape, end: &Shape) -> ShapeResult<Shape> {
        let (Some(a), Some(b)) = (start.point(), end.point()) else {
            return Err(ShapeError::degenerate("edge endpoints must be vertices"));
        };
        if !(a.is_finite() && b.is_finite()) || a.distance(b) <= GEOMETRY_TOLERANCE {
            return Err(ShapeError::degenerate(format!(
                "edge from {a:?} to {b:?} has no length"
            )));
        }
        Ok(Shape::from_geometry(Geometry::Edge {
            start: start.clone(),
            end: end.clone(),
        }))
    }

    /// Creates a planar parallelogram face spanned by `u` and `v`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_shape::{Shape, ShapeKind};
    /// use glam::DVec3;
    ///
    /// let face = Shape::rectangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
    /// assert_eq!(face.kind(), ShapeKind::Face);
    /// assert_eq!(face.explore(ShapeKind::Vertex).len(), 4);
    /// ```
    pub fn rectangle(origin: DVec3, u: DVec3, v: DVec3) -> ShapeResult<Shape> {
        if u.cross(v).length() <= GEOMETRY_TOLERANCE {
            return Err(ShapeError::degenerate(format!(
                "face sides {u:?} and {v:?} do not span a plane"
            )));
        }
        let corners = [origin, origin + u, origin + u + v, origin + v];
        let vertices: Vec<Shape> = corners.iter().map(|c| Shape::vertex(*c)).collect();
        let side = |i: usize| -> ShapeResult<OrientedEdge> {
            Ok(OrientedEdge {
                edge: Shape::edge_between(&vertices[i], &vertices[(i + 1) % 4])?,
                forward: true,
            })
        };
        let wire = [side(0)?, side(1)?, side(2)?, side(3)?];
        Ok(Shape::from_geometry(Geometry::Face(FaceGeometry {
            origin,
            u,
            v,
            wire,
        })))
    }

    /// Creates an axis-aligned box with its minimum corner at `origin`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_shape::{Shape, ShapeKind};
    /// use glam::DVec3;
    ///
    /// let cube = Shape::make_box(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)).unwrap();
    /// assert_eq!(cube.kind(), ShapeKind::Solid);
    /// assert!(Shape::make_box(DVec3::ZERO, DVec3::new(0.0, 1.0, 1.0)).is_err());
    /// ```
    pub fn make_box(origin: DVec3, size: DVec3) -> ShapeResult<Shape> {
        if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(ShapeError::degenerate(format!(
                "box size must be positive: {size:?}"
            )));
        }
        Shape::parallelepiped(
            origin,
            [
                DVec3::new(size.x, 0.0, 0.0),
                DVec3::new(0.0, size.y, 0.0),
                DVec3::new(0.0, 0.0, size.z),
            ],
        )
    }

    /// Creates a parallelepiped solid spanned by three axes.
    ///
    /// Vertices, edges and faces are shared: the solid has exactly 8
    /// vertices, 12 edges and 6 faces. Every face wire starts at the face's
    /// lowest corner and runs along the lower-indexed axis first.
    pub fn parallelepiped(origin: DVec3, axes: [DVec3; 3]) -> ShapeResult<Shape> {
        let volume = axes[0].cross(axes[1]).dot(axes[2]);
        if !volume.is_finite() || volume.abs() <= GEOMETRY_TOLERANCE {
            return Err(ShapeError::degenerate(format!(
                "solid axes {axes:?} enclose no volume"
            )));
        }

        let corner = |bits: [usize; 3]| -> DVec3 {
            origin
                + axes[0] * bits[0] as f64
                + axes[1] * bits[1] as f64
                + axes[2] * bits[2] as f64
        };

        // Corner index = x + 2y + 4z
        let vertices: Vec<Shape> = (0..8)
            .map(|i| Shape::vertex(corner(bits_of(i))))
            .collect();

        // edges[axis][compact index of the two other bits]
        let mut edges: Vec<Vec<Shape>> = Vec::with_capacity(3);
        for axis in 0..3 {
            let (p, q) = other_axes(axis);
            let mut along = Vec::with_capacity(4);
            for compact in 0..4 {
                let mut bits = [0; 3];
                bits[p] = compact & 1;
                bits[q] = compact >> 1;
                let start = index_of(bits);
                along.push(Shape::edge_between(
                    &vertices[start],
                    &vertices[start + (1 << axis)],
                )?);
            }
            edges.push(along);
        }

        let mut faces = Vec::with_capacity(6);
        for axis in 0..3 {
            let (p, q) = other_axes(axis);
            for side in 0..2 {
                let mut bits = [0; 3];
                bits[axis] = side;
                let along_p = |bits: [usize; 3]| edges[p][compact_of(p, bits)].clone();
                let along_q = |bits: [usize; 3]| edges[q][compact_of(q, bits)].clone();
                let mut shifted_p = bits;
                shifted_p[p] = 1;
                let mut shifted_q = bits;
                shifted_q[q] = 1;
                let wire = [
                    OrientedEdge { edge: along_p(bits), forward: true },
                    OrientedEdge { edge: along_q(shifted_p), forward: true },
                    OrientedEdge { edge: along_p(shifted_q), forward: false },
                    OrientedEdge { edge: along_q(bits), forward: false },
                ];
                faces.push(Shape::from_geometry(Geometry::Face(FaceGeometry {
                    origin: corner(bits),
                    u: axes[p],
                    v: axes[q],
                    wire,
                })));
            }
        }

        Ok(Shape::from_geometry(Geometry::Solid(SolidGeometry {
            origin,
            axes,
            faces,
        })))
    }

    /// Groups shapes into a compound.
    pub fn compound(children: Vec<Shape>) -> ShapeResult<Shape> {
        if children.is_empty() {
            return Err(ShapeError::EmptyCompound);
        }
        Ok(Shape::from_geometry(Geometry::Compound { children }))
    }
}

fn bits_of(index: usize) -> [usize; 3] {
    [index & 1, (index >> 1) & 1, (index >> 2) & 1]
}

fn index_of(bits: [usize; 3]) -> usize {
    bits[0] + 2 * bits[1] + 4 * bits[2]
}

fn other_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn compact_of(axis: usize, bits: [usize; 3]) -> usize {
    let (p, q) = other_axes(axis);
    bits[p] + 2 * bits[q]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;
    use approx::assert_relative_eq;

    fn face_geometry(face: &Shape) -> &FaceGeometry {
        match face.geometry() {
            Geometry::Face(g) => g,
            _ => panic!("expected a face"),
        }
    }

    /// Start of an oriented edge in wire order.
    fn wire_start(w: &OrientedEdge) -> DVec3 {
        let (start, end) = w.edge.vertices().unwrap();
        if w.forward { start.point().unwrap() } else { end.point().unwrap() }
    }

    #[test]
    fn test_segment_rejects_zero_length() {
        assert!(Shape::segment(DVec3::ONE, DVec3::ONE).is_err());
    }

    #[test]
    fn test_rectangle_rejects_parallel_sides() {
        let err = Shape::rectangle(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).unwrap_err();
        assert!(matches!(err, ShapeError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_rectangle_wire_is_closed() {
        let face = Shape::rectangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        let g = face_geometry(&face);
        let expected = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        for (w, corner) in g.wire.iter().zip(expected) {
            assert_eq!(wire_start(w), corner);
        }
    }

    #[test]
    fn test_box_face_wires_follow_parameterization() {
        let cube = Shape::make_box(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0)).unwrap();
        for face in cube.explore(ShapeKind::Face) {
            let g = face_geometry(&face);
            let corners = [
                g.point_at(0.0, 0.0),
                g.point_at(1.0, 0.0),
                g.point_at(1.0, 1.0),
                g.point_at(0.0, 1.0),
            ];
            for (w, corner) in g.wire.iter().zip(corners) {
                assert_relative_eq!(wire_start(w).distance(corner), 0.0);
            }
        }
    }

    #[test]
    fn test_box_top_face_is_last() {
        let cube = Shape::make_box(DVec3::ZERO, DVec3::ONE).unwrap();
        let top = cube.explore(ShapeKind::Face).pop().unwrap();
        let g = face_geometry(&top);
        assert_eq!(g.origin, DVec3::Z);
    }

    #[test]
    fn test_box_faces_share_edges() {
        let cube = Shape::make_box(DVec3::ZERO, DVec3::ONE).unwrap();
        let faces = cube.explore(ShapeKind::Face);
        let total_wire_edges: usize = faces.iter().map(|f| f.children().len()).sum();
        assert_eq!(total_wire_edges, 24);
        assert_eq!(cube.explore(ShapeKind::Edge).len(), 12);
    }

    #[test]
    fn test_flat_parallelepiped_is_rejected() {
        let result = Shape::parallelepiped(DVec3::ZERO, [DVec3::X, DVec3::Y, DVec3::X + DVec3::Y]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_compound_is_rejected() {
        assert_eq!(Shape::compound(Vec::new()).unwrap_err(), ShapeError::EmptyCompound);
    }
}
