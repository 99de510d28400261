use super::*;

fn unit_triangle() -> Mesh {
  Mesh::new(
    vec![Vec3::ZERO, Vec3::X, Vec3::Y],
    vec![0, 1, 2],
    vec![Vec3::Z; 3],
  )
  .unwrap()
}

#[test]
fn test_new_rejects_partial_triangle() {
  let err = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![0, 1], Vec::new()).unwrap_err();
  assert!(matches!(err, GeometryError::InvalidMesh(_)));
}

#[test]
fn test_new_rejects_out_of_range_index() {
  let err = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 3], Vec::new()).unwrap_err();
  assert!(matches!(err, GeometryError::InvalidMesh(_)));
}

#[test]
fn test_accessors_expose_validated_buffers() {
  let mesh = unit_triangle();
  assert_eq!(mesh.vertices(), &[Vec3::ZERO, Vec3::X, Vec3::Y]);
  assert_eq!(mesh.indices(), &[0, 1, 2]);
  assert_eq!(mesh.normals(), &[Vec3::Z; 3]);
  assert_eq!(mesh.triangle(0), [Vec3::ZERO, Vec3::X, Vec3::Y]);

  // A rejected buffer never becomes a mesh to query
  assert!(Mesh::new(vec![Vec3::ZERO], vec![0, 0, 7], Vec::new()).is_err());
  assert!(Mesh::default().faces().is_empty());
}

#[test]
fn test_new_rejects_normal_count_mismatch() {
  let err = Mesh::new(
    vec![Vec3::ZERO, Vec3::X, Vec3::Y],
    vec![0, 1, 2],
    vec![Vec3::Z],
  )
  .unwrap_err();
  assert!(matches!(err, GeometryError::InvalidMesh(_)));
}

#[test]
fn test_faces_flatten_index_buffer() {
  let mesh = Mesh::new(
    vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
    vec![0, 1, 2, 0, 2, 3],
    Vec::new(),
  )
  .unwrap();

  let faces = mesh.faces();
  assert_eq!(faces.len(), 2);
  assert_eq!(faces[0], [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
  assert_eq!(faces[1], [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_transform_moves_vertices_not_normals() {
  let mesh = unit_triangle();
  let moved = mesh.transformed(&Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));

  assert_eq!(moved.vertices[1], Vec3::new(1.0, 0.0, 5.0));
  assert_eq!(moved.normals[0], Vec3::Z);
  // Source mesh untouched
  assert_eq!(mesh.vertices[1], Vec3::X);
}

#[test]
fn test_transform_rotates_normals() {
  let mut mesh = unit_triangle();
  mesh.transform(&Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2));

  for normal in &mesh.normals {
    assert!((*normal - Vec3::NEG_Y).length() < 1e-5, "got {:?}", normal);
  }
}

#[test]
fn test_transform_non_uniform_scale_keeps_unit_normals() {
  let mut mesh = unit_triangle();
  mesh.transform(&Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)));

  for normal in &mesh.normals {
    assert!((normal.length() - 1.0).abs() < 1e-5);
    assert!((*normal - Vec3::Z).length() < 1e-5);
  }
}

#[test]
fn test_empty_mesh() {
  let mesh = Mesh::default();
  assert!(mesh.is_empty());
  assert!(mesh.bounding_box().is_none());
  assert!(mesh.faces().is_empty());
}
