use brep_shape::Shape;
use glam::DVec3;
use mesh_engine::{
    unv, Algorithm, ConfigObject, ElementKind, EngineError, Generator, Hypothesis, HypothesisId,
    Surface2D, SurfaceSizing,
};

fn meshed_square(quadrangles: bool) -> mesh_engine::EngineMesh {
    let face = Shape::rectangle(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
    let mut sizing = SurfaceSizing::new(HypothesisId::new(0));
    sizing.set_local_length(0.5).unwrap();
    sizing.set_allow_quadrangles(quadrangles);
    let objects = vec![
        ConfigObject::Hypothesis(Hypothesis::from(sizing)),
        ConfigObject::Algorithm(Algorithm::from(Surface2D::new(HypothesisId::new(1)))),
    ];

    let mut generator = Generator::new();
    let mut mesh = generator.create_mesh();
    mesh.shape_to_mesh(face.clone());
    mesh.add_hypothesis(&face, HypothesisId::new(0));
    mesh.add_hypothesis(&face, HypothesisId::new(1));
    generator.compute(&mut mesh, &face, objects.as_slice()).unwrap();
    mesh
}

#[test]
fn exported_file_reads_back() {
    let mesh = meshed_square(true);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.unv");
    mesh.export_unv(&path).unwrap();

    let data = unv::read(&path).unwrap();
    assert_eq!(&data, mesh.data());
    assert_eq!(data.count(ElementKind::Quadrangle), 4);
    assert_eq!(data.count(ElementKind::Segment), 8);
}

#[test]
fn exported_file_has_both_datasets() {
    let mesh = meshed_square(false);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("square.unv");
    mesh.export_unv(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "    -1");
    assert_eq!(lines[1], "  2411");
    assert!(lines.contains(&"  2412"));
    assert!(text.contains("D+00"));
    assert_eq!(lines.iter().filter(|line| **line == "    -1").count(), 4);
}

#[test]
fn export_into_missing_directory_fails() {
    let mesh = meshed_square(false);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("square.unv");
    assert!(matches!(mesh.export_unv(&path), Err(EngineError::Io(_))));
}
