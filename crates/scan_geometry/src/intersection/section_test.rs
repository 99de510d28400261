use super::*;
use crate::mesh::primitives::create_cuboid;

fn z_plane() -> Plane {
  Plane::new(Vec3::Z, Vec3::ZERO).unwrap()
}

fn single_triangle(a: Vec3, b: Vec3, c: Vec3) -> Mesh {
  Mesh::new(vec![a, b, c], vec![0, 1, 2], vec![]).unwrap()
}

#[test]
fn test_triangle_straddling_plane_gives_one_segment() {
  let mesh = single_triangle(
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
  );

  let points = mesh_plane_intersection(&mesh, &z_plane());

  assert_eq!(points.len(), 2);
  assert_eq!(points[0].z, 0.0);
  assert_eq!(points[1].z, 0.0);
  assert_eq!(points[0], Vec3::new(0.5, 0.0, 0.0));
  assert_eq!(points[1], Vec3::new(0.0, 0.5, 0.0));
}

#[test]
fn test_mesh_on_one_side_is_empty() {
  let mesh = create_cuboid(1.0, 1.0, 1.0).transformed(&glam::Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
  assert!(mesh_plane_intersection(&mesh, &z_plane()).is_empty());
}

#[test]
fn test_edge_on_plane_is_emitted_directly() {
  let mesh = single_triangle(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 1.0, 2.0));
  let points = mesh_plane_intersection(&mesh, &z_plane());
  assert_eq!(points, vec![Vec3::ZERO, Vec3::X]);
}

#[test]
fn test_vertex_on_plane_starts_segment() {
  let mesh = single_triangle(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
  let points = mesh_plane_intersection(&mesh, &z_plane());
  assert_eq!(points, vec![Vec3::ZERO, Vec3::X]);
}

#[test]
fn test_vertex_touching_plane_without_crossing_is_empty() {
  let mesh = single_triangle(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0));
  assert!(mesh_plane_intersection(&mesh, &z_plane()).is_empty());
}

#[test]
fn test_face_in_plane_is_skipped() {
  let mesh = single_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
  assert!(mesh_plane_intersection(&mesh, &z_plane()).is_empty());
}

#[test]
fn test_cuboid_section_is_closed_square() {
  let mesh = create_cuboid(2.0, 2.0, 2.0);
  let points = mesh_plane_intersection(&mesh, &z_plane());

  // Two triangles on each of the four side faces
  assert_eq!(points.len(), 16);
  for p in &points {
    assert!(p.z.abs() < 1e-6);
    assert!((p.x.abs().max(p.y.abs()) - 1.0).abs() < 1e-5, "Point {:?} is off the box", p);
  }
}

#[test]
fn test_segment_same_side_is_none() {
  let plane = z_plane();
  assert_eq!(segment_plane_intersection(Vec3::new(0.0, 0.0, 1.0), Vec3::new(3.0, 1.0, 2.0), &plane), None);
  assert_eq!(segment_plane_intersection(Vec3::new(0.0, 0.0, -1.0), Vec3::new(3.0, 1.0, -2.0), &plane), None);
}

#[test]
fn test_segment_parallel_to_plane_is_none() {
  let plane = z_plane();
  assert_eq!(segment_plane_intersection(Vec3::ZERO, Vec3::X, &plane), None);
  assert_eq!(segment_plane_intersection(Vec3::Z, Vec3::new(1.0, 0.0, 1.0), &plane), None);
}

#[test]
fn test_segment_crossing_lies_on_plane() {
  let plane = Plane::new(Vec3::new(1.0, 2.0, -0.5), Vec3::new(0.3, -1.0, 2.0)).unwrap();
  let a = Vec3::new(-4.0, -6.0, 1.0);
  let b = Vec3::new(5.0, 4.0, 0.0);
  assert!(plane.signed_distance(a) < 0.0 && plane.signed_distance(b) > 0.0);

  let point = segment_plane_intersection(a, b, &plane).unwrap();
  assert!(plane.signed_distance(point).abs() < 1e-4);
}
