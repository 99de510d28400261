//! Planar slices through a placed volume, for cross-section views.
//!
//! The slice rectangle is the extent of the volume box's cross-section in the
//! plane's own 2-D frame (see [`view_from_plane`]). Pixels are sampled from the
//! full-resolution grid with trilinear interpolation.
//!
//! ```text
//!  frame (x, y, z=n·p) ──view──▶ world ──transform⁻¹──▶ local ──÷voxel──▶ voxel
//!
//!  voxel index = (local / voxel_size + shape / 2) * (shape - 1) / shape
//! ```

use glam::{Mat3, Mat4, Vec3};
use rayon::prelude::*;

use super::{VolumeData, VoxelGrid};
use crate::error::{try_zeroed, GeometryError, Result};
use crate::intersection::mesh_plane_intersection;
use crate::transfer::linspace;
use crate::types::Plane;

/// Greyscale image of a volume cut by a plane.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeSlice {
  /// Row-major 8-bit pixels, `height` rows of `width`.
  pub image: Vec<u8>,
  pub width: usize,
  pub height: usize,

  /// `[x, y, width, height]` of the image in the plane frame.
  pub rect: [f32; 4],
}

impl VolumeSlice {
  /// Pixel at column `x`, row `y`.
  #[inline]
  pub fn pixel(&self, x: usize, y: usize) -> u8 {
    self.image[y * self.width + x]
  }
}

/// Orthonormal basis of a plane: columns are the two in-plane axes and the
/// normal.
///
/// The first axis is horizontal with respect to world +Y (or +Z when the
/// normal is vertical), so a plane with normal +Z maps to the identity.
pub fn view_from_plane(normal: Vec3) -> Mat3 {
  let normal = normal.normalize_or_zero();
  let up = if normal.dot(Vec3::Y).abs() > 1.0 - f32::EPSILON {
    Vec3::Z
  } else {
    Vec3::Y
  };
  let x_axis = up.cross(normal).normalize_or_zero();
  let y_axis = normal.cross(x_axis);
  Mat3::from_cols(x_axis, y_axis, normal)
}

/// Trilinear sample at fractional voxel coordinates; 0 outside the grid.
fn sample_trilinear(grid: &VoxelGrid, coord: Vec3) -> f32 {
  let shape = grid.shape();
  let mut base = [0usize; 3];
  let mut next = [0usize; 3];
  let mut frac = [0.0f32; 3];

  for axis in 0..3 {
    let c = coord[axis];
    let last = (shape[axis] - 1) as f32;
    if !(c >= 0.0 && c <= last) {
      return 0.0;
    }
    let i = (c.floor() as usize).min(shape[axis] - 1);
    base[axis] = i;
    next[axis] = (i + 1).min(shape[axis] - 1);
    frac[axis] = c - i as f32;
  }

  let value = |x: usize, y: usize, z: usize| grid.get(x, y, z) as f32;
  let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

  let [x0, y0, z0] = base;
  let [x1, y1, z1] = next;
  let [fx, fy, fz] = frac;

  let c00 = lerp(value(x0, y0, z0), value(x0, y0, z1), fz);
  let c01 = lerp(value(x0, y1, z0), value(x0, y1, z1), fz);
  let c10 = lerp(value(x1, y0, z0), value(x1, y0, z1), fz);
  let c11 = lerp(value(x1, y1, z0), value(x1, y1, z1), fz);

  lerp(lerp(c00, c01, fy), lerp(c10, c11, fy), fx)
}

/// Slice `volume` by `plane` at `resolution × resolution` pixels.
///
/// Returns `Ok(None)` when the plane misses the volume box. A resolution of 0
/// is treated as 1.
///
/// # Errors
/// `OutOfMemory` if the image buffer cannot be allocated.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "volume::slice"))]
pub fn volume_plane_intersection(
  volume: &VolumeData,
  plane: &Plane,
  resolution: usize,
) -> Result<Option<VolumeSlice>> {
  let segments = mesh_plane_intersection(&volume.as_mesh(), plane);
  if segments.is_empty() {
    return Ok(None);
  }

  let view = view_from_plane(plane.normal);
  let to_frame = view.transpose();
  let (min, max) = segments.iter().map(|&p| to_frame * p).fold(
    (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
    |(min, max), p| (min.min(p), max.max(p)),
  );

  let to_grid = (Mat4::from_mat3(to_frame)
    * volume.transform_matrix()
    * Mat4::from_scale(volume.voxel_size()))
  .inverse();

  let grid = volume.data();
  let [nx, ny, nz] = grid.shape();
  let shape = Vec3::new(nx as f32, ny as f32, nz as f32);
  let center = shape * 0.5;
  let scale = (shape - Vec3::ONE) / shape;

  let resolution = resolution.max(1);
  let len = resolution
    .checked_mul(resolution)
    .ok_or(GeometryError::OutOfMemory { bytes: u64::MAX })?;
  let mut image: Vec<u8> = try_zeroed(len)?;

  let xs: Vec<f32> = linspace(min.x, max.x, resolution).collect();
  let ys: Vec<f32> = linspace(min.y, max.y, resolution).collect();

  image
    .par_chunks_mut(resolution)
    .zip(ys.par_iter())
    .for_each(|(row, &y)| {
      for (pixel, &x) in row.iter_mut().zip(&xs) {
        let local = to_grid.transform_point3(Vec3::new(x, y, max.z));
        let coord = (local + center) * scale;
        *pixel = sample_trilinear(grid, coord).round().clamp(0.0, 255.0) as u8;
      }
    });

  Ok(Some(VolumeSlice {
    image,
    width: resolution,
    height: resolution,
    rect: [min.x, min.y, max.x - min.x, max.y - min.y],
  }))
}

#[cfg(test)]
#[path = "slice_test.rs"]
mod slice_test;
