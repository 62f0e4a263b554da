use approx::assert_relative_eq;
use brep_mesh::{
    Control, EngineConfig, EngineError, HypothesisId, Mesh, MeshError, RecordKind, Session,
    SessionState, Shape, ShapeKind,
};
use glam::DVec3;

fn cube() -> Shape {
    Shape::make_box(DVec3::ZERO, DVec3::splat(2.0)).unwrap()
}

#[test]
fn region_only_controls_use_engine_defaults() {
    let shape = cube();
    let cases = [
        (Control::control_1d(shape.clone(), None, None), 20, 24, 0, 0),
        (Control::control_2d(shape.clone(), None, None, false), 26, 24, 48, 0),
        (Control::control_3d(shape.clone(), None, None), 27, 24, 48, 48),
    ];
    for (control, nodes, edges, faces, tetras) in cases {
        let mesh = Mesh::make_mesh(&shape, &control, &[]).unwrap();
        assert_eq!(mesh.num_nodes(), nodes, "{}D nodes", control.dimension());
        assert_eq!(mesh.num_edges(), edges);
        assert_eq!(mesh.num_faces(), faces);
        assert_eq!(mesh.num_tetras(), tetras);
    }
}

#[test]
fn edge_size_refines_the_mesh() {
    let shape = cube();
    let mesh = Mesh::make_mesh(&shape, &Control::control_1d(shape.clone(), Some(0.5), None), &[])
        .unwrap();
    assert_eq!(mesh.num_edges(), 48);
    assert_eq!(mesh.num_nodes(), 8 + 12 * 3);
}

#[test]
fn invalid_dimension_yields_no_mesh() {
    let shape = cube();
    for dimension in [0, 4] {
        let global = Control::control_2d(shape.clone(), None, None, false);
        let local = Control::with_dimension(dimension, shape.clone(), None, None, false);
        match Mesh::make_mesh(&shape, &global, &[local]) {
            Err(MeshError::ControlDimensionError { dimension: found }) => assert_eq!(found, dimension),
            other => panic!("expected dimension error, got {other:?}"),
        }
    }
}

#[test]
fn local_surface_control_wins_on_its_face() {
    let shape = cube();
    let top = shape.explore(ShapeKind::Face).pop().unwrap();
    let global = Control::control_2d(shape.clone(), None, None, true);
    let local = Control::control_2d(top, None, None, false);

    let mesh = Mesh::make_mesh(&shape, &global, &[local]).unwrap();
    assert_eq!(mesh.num_quadrangles(), 20);
    assert_eq!(mesh.num_triangles(), 8);
    assert_eq!(mesh.num_faces(), 28);
}

#[test]
fn later_controls_override_earlier_ones() {
    let shape = cube();
    let global = Control::control_2d(shape.clone(), None, None, false);
    let local = Control::control_2d(shape.clone(), None, None, true);

    let mesh = Mesh::make_mesh(&shape, &global, &[local]).unwrap();
    assert_eq!(mesh.num_triangles(), 0);
    assert_eq!(mesh.num_quadrangles(), 24);
}

#[test]
fn ids_increase_across_mixed_dimensions() {
    let shape = cube();
    let edge = shape.explore(ShapeKind::Edge).remove(0);
    let face = shape.explore(ShapeKind::Face).remove(0);
    let global = Control::control_3d(shape.clone(), None, None);
    let locals = [
        Control::control_1d(edge, None, None),
        Control::control_2d(face, None, None, false),
    ];

    let mesh = Mesh::make_mesh(&shape, &global, &locals).unwrap();
    let records = mesh.session().hypotheses();
    let ids: Vec<u32> = records.iter().map(|r| r.id.value()).collect();
    assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
    let dimensions: Vec<u8> = records.iter().map(|r| r.dimension).collect();
    assert_eq!(dimensions, [3, 3, 1, 1, 2, 2]);
    assert!(records
        .iter()
        .skip(1)
        .step_by(2)
        .all(|r| r.kind == RecordKind::Algorithm));
}

#[test]
fn local_edge_size_refines_its_face_and_only_what_must_follow() {
    let shape = cube();
    let top = shape.explore(ShapeKind::Face).pop().unwrap();
    let global = Control::control_2d(shape.clone(), None, None, false);
    let coarse = Mesh::make_mesh(&shape, &global, &[]).unwrap();
    assert_eq!(coarse.num_triangles(), 48);

    let local = Control::control_2d(top, Some(0.5), None, false);
    let mesh = Mesh::make_mesh(&shape, &global, &[local]).unwrap();

    // Top and bottom: 4 x 4 cells. Sides: 4 x 2 cells, vertical edges keep 2 segments.
    assert_eq!(mesh.num_triangles(), 2 * 32 + 4 * 16);
    assert_eq!(mesh.num_edges(), 8 * 4 + 4 * 2);
    assert_eq!(mesh.num_nodes(), 5 * 5 * 3 - 3 * 3);
}

#[test]
fn local_surface_refinement_inside_a_volume_mesh() {
    let shape = cube();
    let top = shape.explore(ShapeKind::Face).pop().unwrap();
    let global = Control::control_3d(shape.clone(), None, None);
    let local = Control::control_2d(top, Some(0.5), None, false);

    let mesh = Mesh::make_mesh(&shape, &global, &[local]).unwrap();
    assert_eq!(mesh.num_nodes(), 5 * 5 * 3);
    assert_eq!(mesh.num_tetras(), 4 * 4 * 2 * 6);
    assert_eq!(mesh.num_edges(), 8 * 4 + 4 * 2);
}

#[test]
fn quadrangle_surface_inside_a_volume_fails_compute() {
    let shape = cube();
    let top = shape.explore(ShapeKind::Face).pop().unwrap();
    let global = Control::control_3d(shape.clone(), None, None);
    let local = Control::control_2d(top, None, None, true);

    let err = Mesh::make_mesh(&shape, &global, &[local]).unwrap_err();
    assert!(matches!(
        err,
        MeshError::MeshComputeError(EngineError::IncompatibleDiscretization { .. })
    ));
}

#[test]
fn failed_session_refuses_a_second_compute() {
    let shape = cube();
    let edge = shape.explore(ShapeKind::Edge).remove(0);
    let mut session = Session::new(shape.clone());
    session.apply(&Control::control_2d(shape, None, None, false)).unwrap();
    session.apply(&Control::control_1d(edge, Some(1e-9), None)).unwrap();

    assert!(matches!(session.compute(), Err(MeshError::MeshComputeError(_))));
    assert_eq!(session.state(), SessionState::Failed);
    assert!(matches!(
        session.compute(),
        Err(MeshError::MeshStateError { state: SessionState::Failed, .. })
    ));
    assert!(matches!(session.num_nodes(), Err(MeshError::MeshStateError { .. })));
    assert!(Mesh::try_from(session).is_err());
}

#[test]
fn invalid_edge_size_is_reported_with_its_hypothesis() {
    let shape = cube();
    let mut session = Session::new(shape.clone());
    let err = session
        .apply(&Control::control_3d(shape, Some(-2.0), None))
        .unwrap_err();

    match err {
        MeshError::HypothesisError { id, source } => {
            assert_eq!(id, HypothesisId::new(0));
            assert!(matches!(source, EngineError::InvalidParameter { .. }));
        }
        other => panic!("expected hypothesis error, got {other:?}"),
    }
    assert_eq!(session.hypotheses().len(), 1);
    assert_eq!(session.hypotheses()[0].kind, RecordKind::SizingHypothesis);
}

#[test]
fn region_outside_the_shape_has_no_effect() {
    let shape = cube();
    let elsewhere = Shape::make_box(DVec3::splat(10.0), DVec3::ONE).unwrap();
    let global = Control::control_1d(shape.clone(), None, None);
    let local = Control::control_1d(elsewhere, Some(0.1), None);

    let mesh = Mesh::make_mesh(&shape, &global, &[local]).unwrap();
    assert_eq!(mesh.num_edges(), 24);
    assert_eq!(mesh.session().hypotheses().len(), 4);
}

#[test]
fn engine_config_sets_the_default_length() {
    let shape = cube();
    let config = EngineConfig::default().with_default_length(0.5).unwrap();
    let mesh = Mesh::make_mesh_with_config(
        &shape,
        &Control::control_1d(shape.clone(), None, None),
        &[],
        config,
    )
    .unwrap();
    assert_eq!(mesh.num_edges(), 48);
    assert_relative_eq!(mesh.session().generator().config().default_length, 0.5);
}

#[test]
fn cloned_handles_share_one_session() {
    let shape = cube();
    let mesh = Mesh::make_mesh(&shape, &Control::control_3d(shape.clone(), None, None), &[]).unwrap();
    let other = mesh.clone();

    assert!(std::sync::Arc::ptr_eq(mesh.session(), other.session()));
    assert_eq!(other.statistics(), mesh.statistics());

    let handle = std::thread::spawn(move || other.num_tetras());
    assert_eq!(handle.join().unwrap(), 48);
}
