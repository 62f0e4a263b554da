//! Structured face meshing.
//!
//! Opposite wire edges must carry the same number of segments; the face is
//! then filled with a `nu × nv` grid of quadrangles, or two triangles per
//! cell split along the `(i, j) → (i+1, j+1)` diagonal.

use brep_shape::{Geometry, Shape, ShapeKind};
use tracing::trace;

use super::{unexpected, FaceGrid, MeshBuilder};
use crate::error::{EngineError, EngineResult};
use crate::mesh::ElementKind;

/// Meshes `face` from the nodes already placed on its edges.
pub(crate) fn mesh_face(builder: &mut MeshBuilder<'_>, face: &Shape, quadrangles: bool) -> EngineResult<()> {
    let Geometry::Face(geometry) = face.geometry() else {
        return Err(unexpected(face, ShapeKind::Face));
    };

    let sides = geometry
        .wire
        .iter()
        .map(|oriented| builder.wire_nodes(oriented))
        .collect::<EngineResult<Vec<_>>>()?;

    let nu = sides[0].len() - 1;
    let nv = sides[1].len() - 1;
    if sides[2].len() - 1 != nu || sides[3].len() - 1 != nv {
        return Err(EngineError::incompatible(
            face.id(),
            format!(
                "opposite edges carry {}/{} and {}/{} segments",
                nu,
                sides[2].len() - 1,
                nv,
                sides[3].len() - 1
            ),
        ));
    }
    trace!(face = %face.id(), nu, nv, quadrangles, "meshing face");

    let at = |i: usize, j: usize| j * (nu + 1) + i;
    let mut nodes = vec![0; (nu + 1) * (nv + 1)];
    for (k, node) in sides[0].iter().enumerate() {
        nodes[at(k, 0)] = *node;
    }
    for (k, node) in sides[1].iter().enumerate() {
        nodes[at(nu, k)] = *node;
    }
    for (k, node) in sides[2].iter().enumerate() {
        nodes[at(nu - k, nv)] = *node;
    }
    for (k, node) in sides[3].iter().enumerate() {
        nodes[at(0, nv - k)] = *node;
    }
    for j in 1..nv {
        for i in 1..nu {
            let point = geometry.point_at(i as f64 / nu as f64, j as f64 / nv as f64);
            nodes[at(i, j)] = builder.data_mut().add_node(point);
        }
    }

    let data = builder.data_mut();
    for j in 0..nv {
        for i in 0..nu {
            let n00 = nodes[at(i, j)];
            let n10 = nodes[at(i + 1, j)];
            let n11 = nodes[at(i + 1, j + 1)];
            let n01 = nodes[at(i, j + 1)];
            if quadrangles {
                data.add_element(ElementKind::Quadrangle, vec![n00, n10, n11, n01]);
            } else {
                data.add_element(ElementKind::Triangle, vec![n00, n10, n11]);
                data.add_element(ElementKind::Triangle, vec![n00, n11, n01]);
            }
        }
    }

    builder.face_grids.insert(
        face.id(),
        FaceGrid::new(geometry.clone(), nu, nv, nodes, quadrangles),
    );
    Ok(())
}
