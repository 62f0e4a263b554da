//! Translation of controls into owned engine objects.
//!
//! Every control yields exactly one sizing hypothesis and one algorithm of
//! its dimension, registered in that order against the control's region.

use brep_shape::Shape;
use mesh_engine::{
    EngineMesh, Hypothesis, HypothesisId, HypothesisStatus, LocalLength, Regular1D, Surface2D,
    SurfaceSizing, Volume3D, VolumeSizing,
};
use tracing::{debug, trace, warn};

use crate::control::{Control, Dimension};
use crate::error::{MeshError, MeshResult};
use crate::owner::HypothesisOwner;

/// Creates the objects `control` asks for and attaches them to its region.
pub(crate) fn dispatch(
    control: &Control,
    owner: &mut HypothesisOwner,
    mesh: &mut EngineMesh,
) -> MeshResult<()> {
    let dimension = Dimension::try_from(control.dimension())?;
    debug!(
        %dimension,
        region = %control.region().id(),
        edge_size = ?control.edge_size(),
        allow_quads = control.allow_quads(),
        "dispatching control"
    );
    if let Some(deflection) = control.deflection() {
        trace!(deflection, "deflection is not used by any hypothesis");
    }

    let (hypothesis, algorithm) = match dimension {
        Dimension::One => define_1d(control, owner)?,
        Dimension::Two => define_2d(control, owner)?,
        Dimension::Three => define_3d(control, owner)?,
    };
    register(mesh, control.region(), hypothesis);
    register(mesh, control.region(), algorithm);
    Ok(())
}

fn define_1d(control: &Control, owner: &mut HypothesisOwner) -> MeshResult<(HypothesisId, HypothesisId)> {
    let hypothesis = owner.own_hypothesis(|id| LocalLength::new(id).into());
    set_edge_size(hypothesis, control.edge_size())?;
    let hypothesis = hypothesis.id();
    let algorithm = owner.own_algorithm(|id| Regular1D::new(id).into()).id();
    Ok((hypothesis, algorithm))
}

fn define_2d(control: &Control, owner: &mut HypothesisOwner) -> MeshResult<(HypothesisId, HypothesisId)> {
    let hypothesis = owner.own_hypothesis(|id| SurfaceSizing::new(id).into());
    set_edge_size(hypothesis, control.edge_size())?;
    hypothesis
        .set_allow_quadrangles(control.allow_quads())
        .map_err(|source| MeshError::HypothesisError {
            id: hypothesis.id(),
            source,
        })?;
    let hypothesis = hypothesis.id();
    let algorithm = owner.own_algorithm(|id| Surface2D::new(id).into()).id();
    Ok((hypothesis, algorithm))
}

fn define_3d(control: &Control, owner: &mut HypothesisOwner) -> MeshResult<(HypothesisId, HypothesisId)> {
    let hypothesis = owner.own_hypothesis(|id| VolumeSizing::new(id).into());
    set_edge_size(hypothesis, control.edge_size())?;
    let hypothesis = hypothesis.id();
    let algorithm = owner.own_algorithm(|id| Volume3D::new(id).into()).id();
    Ok((hypothesis, algorithm))
}

/// Without an edge size the engine default length applies.
fn set_edge_size(hypothesis: &mut Hypothesis, edge_size: Option<f64>) -> MeshResult<()> {
    let Some(size) = edge_size else {
        return Ok(());
    };
    hypothesis
        .set_local_length(size)
        .map_err(|source| MeshError::HypothesisError {
            id: hypothesis.id(),
            source,
        })
}

fn register(mesh: &mut EngineMesh, region: &Shape, id: HypothesisId) {
    match mesh.add_hypothesis(region, id) {
        HypothesisStatus::Ok => {}
        status => warn!(%id, region = %region.id(), ?status, "assignment ignored by the engine"),
    }
}
