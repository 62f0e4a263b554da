//! Structured tetrahedral volume meshing.
//!
//! Each grid cell is split into the six tetrahedra of the Kuhn subdivision.
//! All of them share the cell diagonal from its lowest to its highest
//! corner, so the traces on the cell's faces are exactly the triangles
//! `surface_2d` produces for faces parameterized along the solid's axes.

use brep_shape::{Geometry, Shape, ShapeKind};
use tracing::trace;

use super::{unexpected, FaceGrid, MeshBuilder};
use crate::error::{EngineError, EngineResult};
use crate::mesh::ElementKind;

const AXIS_ORDERS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Fills `solid` with tetrahedra matching its already triangulated faces.
pub(crate) fn mesh_solid(builder: &mut MeshBuilder<'_>, solid: &Shape) -> EngineResult<()> {
    let Geometry::Solid(geometry) = solid.geometry() else {
        return Err(unexpected(solid, ShapeKind::Solid));
    };
    let tolerance = builder.config().tolerance;

    // Segment count along each axis, taken from the edges parallel to it.
    let mut counts: [Option<usize>; 3] = [None; 3];
    for edge in solid.explore(ShapeKind::Edge) {
        let (start, end) = edge.vertices().ok_or_else(|| unexpected(&edge, ShapeKind::Edge))?;
        let (Some(a), Some(b)) = (start.point(), end.point()) else {
            return Err(unexpected(start, ShapeKind::Vertex));
        };
        let direction = b - a;
        let axis = (0..3)
            .find(|&k| {
                let cos = direction.dot(geometry.axes[k])
                    / (direction.length() * geometry.axes[k].length());
                cos.abs() >= 1.0 - tolerance
            })
            .ok_or_else(|| EngineError::incompatible(edge.id(), "edge is not parallel to a solid axis"))?;
        let segments = builder
            .edge_nodes(edge.id())
            .ok_or(EngineError::NotDiscretized {
                shape: edge.id(),
                kind: ShapeKind::Edge,
            })?
            .len()
            - 1;
        match counts[axis] {
            None => counts[axis] = Some(segments),
            Some(existing) if existing != segments => {
                return Err(EngineError::incompatible(
                    solid.id(),
                    format!("edges along axis {axis} carry {existing} and {segments} segments"),
                ));
            }
            Some(_) => {}
        }
    }
    let [Some(nx), Some(ny), Some(nz)] = counts else {
        return Err(EngineError::incompatible(solid.id(), "solid axis without edges"));
    };

    let mut boundary: Vec<FaceGrid> = Vec::with_capacity(geometry.faces.len());
    for face in &geometry.faces {
        let grid = builder.face_grid(face.id()).ok_or(EngineError::NotDiscretized {
            shape: face.id(),
            kind: ShapeKind::Face,
        })?;
        if grid.has_quadrangles() {
            return Err(EngineError::incompatible(
                face.id(),
                "volume meshing requires a triangulated boundary",
            ));
        }
        boundary.push(grid.clone());
    }
    trace!(solid = %solid.id(), nx, ny, nz, "meshing solid");

    let index = |i: usize, j: usize, k: usize| (k * (ny + 1) + j) * (nx + 1) + i;
    let mut nodes = vec![0; (nx + 1) * (ny + 1) * (nz + 1)];
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                let point = geometry.point_at([
                    i as f64 / nx as f64,
                    j as f64 / ny as f64,
                    k as f64 / nz as f64,
                ]);
                let on_boundary = i == 0 || j == 0 || k == 0 || i == nx || j == ny || k == nz;
                nodes[index(i, j, k)] = if on_boundary {
                    boundary
                        .iter()
                        .find_map(|grid| grid.node_at(point, tolerance))
                        .ok_or_else(|| {
                            EngineError::incompatible(
                                solid.id(),
                                format!("no surface node at {point:?}"),
                            )
                        })?
                } else {
                    builder.data_mut().add_node(point)
                };
            }
        }
    }

    let data = builder.data_mut();
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let corner = |d: [usize; 3]| nodes[index(i + d[0], j + d[1], k + d[2])];
                for order in AXIS_ORDERS {
                    let mut d = [0; 3];
                    let mut tetra = Vec::with_capacity(4);
                    tetra.push(corner(d));
                    for axis in order {
                        d[axis] = 1;
                        tetra.push(corner(d));
                    }
                    data.add_element(ElementKind::Tetrahedron, tetra);
                }
            }
        }
    }
    Ok(())
}
