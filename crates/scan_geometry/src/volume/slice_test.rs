use super::*;

fn gradient_volume() -> VolumeData {
  // Intensity rises 10 per voxel along X
  let grid = VoxelGrid::from_fn([5, 3, 3], |x, _, _| (x * 10) as u8).unwrap();
  VolumeData::new(grid, Vec3::ONE, Vec3::ZERO).unwrap()
}

fn z_plane(z: f32) -> Plane {
  Plane::new(Vec3::Z, Vec3::new(0.0, 0.0, z)).unwrap()
}

#[test]
fn test_view_from_plane_z_is_identity() {
  assert!(view_from_plane(Vec3::Z).abs_diff_eq(Mat3::IDENTITY, 1e-6));
}

#[test]
fn test_view_from_plane_is_orthonormal() {
  for normal in [
    Vec3::X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::new(1.0, 2.0, 3.0).normalize(),
    Vec3::new(-0.3, 0.1, -0.9).normalize(),
  ] {
    let view = view_from_plane(normal);
    assert!((view.x_axis.length() - 1.0).abs() < 1e-5);
    assert!((view.y_axis.length() - 1.0).abs() < 1e-5);
    assert!(view.x_axis.dot(view.y_axis).abs() < 1e-5);
    assert!((view.determinant() - 1.0).abs() < 1e-5);
    assert!((view.z_axis - normal).length() < 1e-6, "Normal {:?} not kept", normal);
  }
}

#[test]
fn test_plane_missing_volume_gives_none() {
  let volume = gradient_volume();
  let slice = volume_plane_intersection(&volume, &z_plane(10.0), 16).unwrap();
  assert!(slice.is_none());
}

#[test]
fn test_axial_slice_samples_gradient() {
  let volume = gradient_volume();
  let slice = volume_plane_intersection(&volume, &z_plane(0.0), 5).unwrap().unwrap();

  assert_eq!((slice.width, slice.height), (5, 5));
  assert_eq!(slice.image.len(), 25);
  for (got, want) in slice.rect.iter().zip([-2.5, -1.5, 5.0, 3.0]) {
    assert!((got - want).abs() < 1e-5, "rect {:?}", slice.rect);
  }

  let middle_row: Vec<u8> = (0..5).map(|x| slice.pixel(x, 2)).collect();
  assert_eq!(middle_row, vec![0, 10, 20, 30, 40]);
}

#[test]
fn test_slice_follows_volume_placement() {
  let mut volume = gradient_volume();
  volume.translate(Vec3::new(10.0, 0.0, 0.0));

  let slice = volume_plane_intersection(&volume, &z_plane(0.0), 5).unwrap().unwrap();

  assert!((slice.rect[0] - 7.5).abs() < 1e-4);
  assert!((slice.rect[2] - 5.0).abs() < 1e-4);
  let middle_row: Vec<u8> = (0..5).map(|x| slice.pixel(x, 2)).collect();
  assert_eq!(middle_row, vec![0, 10, 20, 30, 40]);
}

#[test]
fn test_sagittal_slice_is_constant() {
  let volume = gradient_volume();
  let plane = Plane::new(Vec3::X, Vec3::ZERO).unwrap();

  let slice = volume_plane_intersection(&volume, &plane, 9).unwrap().unwrap();

  // x = 0 is the middle voxel column (index 2)
  for y in 1..8 {
    for x in 1..8 {
      assert_eq!(slice.pixel(x, y), 20);
    }
  }
}

#[test]
fn test_zero_resolution_is_single_pixel() {
  let volume = gradient_volume();
  let slice = volume_plane_intersection(&volume, &z_plane(0.0), 0).unwrap().unwrap();
  assert_eq!(slice.image.len(), 1);
}

#[test]
fn test_trilinear_outside_grid_is_zero() {
  let grid = VoxelGrid::from_fn([2, 2, 2], |_, _, _| 200).unwrap();
  assert_eq!(sample_trilinear(&grid, Vec3::splat(0.5)), 200.0);
  assert_eq!(sample_trilinear(&grid, Vec3::new(-0.1, 0.5, 0.5)), 0.0);
  assert_eq!(sample_trilinear(&grid, Vec3::new(0.5, 1.1, 0.5)), 0.0);
  assert_eq!(sample_trilinear(&grid, Vec3::splat(f32::NAN)), 0.0);
  // Upper edge is inside
  assert_eq!(sample_trilinear(&grid, Vec3::ONE), 200.0);
}

#[test]
fn test_default_resolution_slice() {
  let volume = gradient_volume();
  let slice = volume.slice(&z_plane(0.0)).unwrap().unwrap();
  assert_eq!((slice.width, slice.height), (1024, 1024));
  assert!(volume.slice(&z_plane(-10.0)).unwrap().is_none());
}
