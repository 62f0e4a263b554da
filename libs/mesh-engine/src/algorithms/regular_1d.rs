//! Uniform edge division.

use brep_shape::{Shape, ShapeKind};
use config::constants::EngineConfig;
use tracing::trace;

use super::{unexpected, MeshBuilder};
use crate::error::{EngineError, EngineResult};
use crate::mesh::ElementKind;

/// Number of equal segments no longer than `length` needed along `edge`.
pub(crate) fn segment_count(config: &EngineConfig, edge: &Shape, length: f64) -> EngineResult<usize> {
    let edge_length = edge.length().ok_or_else(|| unexpected(edge, ShapeKind::Edge))?;
    let requested = (edge_length / length - config.tolerance).ceil().max(1.0);
    if !requested.is_finite() || requested > config.max_segments_per_edge as f64 {
        return Err(EngineError::TooManySegments {
            shape: edge.id(),
            requested,
            max: config.max_segments_per_edge,
        });
    }
    Ok(requested as usize)
}

/// Divides `edge` into `segments` equal segments.
pub(crate) fn discretize(builder: &mut MeshBuilder<'_>, edge: &Shape, segments: usize) -> EngineResult<()> {
    let (start, end) = edge.vertices().ok_or_else(|| unexpected(edge, ShapeKind::Edge))?;
    let a = start.point().ok_or_else(|| unexpected(start, ShapeKind::Vertex))?;
    let b = end.point().ok_or_else(|| unexpected(end, ShapeKind::Vertex))?;
    trace!(edge = %edge.id(), segments, "dividing edge");

    let first = builder.vertex_node(start)?;
    let last = builder.vertex_node(end)?;

    let mut nodes = Vec::with_capacity(segments + 1);
    nodes.push(first);
    for k in 1..segments {
        let t = k as f64 / segments as f64;
        nodes.push(builder.data_mut().add_node(a.lerp(b, t)));
    }
    nodes.push(last);

    for pair in nodes.windows(2) {
        builder.data_mut().add_element(ElementKind::Segment, pair.to_vec());
    }
    builder.set_edge_nodes(edge.id(), nodes);
    Ok(())
}
