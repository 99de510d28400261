//! Nearest-neighbour down-sampling of voxel grids for rendering.

use rayon::prelude::*;

use super::VoxelGrid;
use crate::error::{try_zeroed, GeometryError, Result};

/// Shape whose largest dimension is `max_dim`, preserving aspect ratio.
///
/// `scale = max_dim / max(shape)` is applied to every axis; each dimension is
/// rounded half-to-even and kept at least 1.
pub fn binned_shape(shape: [usize; 3], max_dim: usize) -> [usize; 3] {
  let largest = shape.iter().copied().max().unwrap_or(1).max(1);
  let scale = max_dim as f64 / largest as f64;
  shape.map(|dim| ((dim as f64 * scale).round_ties_even() as usize).max(1))
}

/// Source voxel sampled by each output voxel along one axis.
///
/// Output and input end points are aligned (output `0` reads input `0`,
/// output `n - 1` reads input `m - 1`) and the nearest input sample is
/// taken, without interpolation.
fn nearest_sources(input: usize, output: usize) -> Vec<usize> {
  if output <= 1 {
    return vec![0; output];
  }
  let step = (input - 1) as f64 / (output - 1) as f64;
  (0..output)
    .map(|o| ((o as f64 * step + 0.5).floor() as usize).min(input - 1))
    .collect()
}

/// Down-sample `grid` so its largest dimension equals `max_dim`.
///
/// # Errors
/// `OutOfMemory` if the output buffer cannot be allocated.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "volume::bin"))]
pub fn bin(grid: &VoxelGrid, max_dim: usize) -> Result<VoxelGrid> {
  let shape = grid.shape();
  let new_shape = binned_shape(shape, max_dim);

  let len = new_shape
    .iter()
    .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    .ok_or(GeometryError::OutOfMemory { bytes: u64::MAX })?;
  let mut data: Vec<u8> = try_zeroed(len)?;

  let xs = nearest_sources(shape[0], new_shape[0]);
  let ys = nearest_sources(shape[1], new_shape[1]);
  let zs = nearest_sources(shape[2], new_shape[2]);

  let slab = new_shape[1] * new_shape[2];
  data
    .par_chunks_mut(slab)
    .zip(xs.par_iter())
    .for_each(|(out, &sx)| {
      for (oy, &sy) in ys.iter().enumerate() {
        let row = &mut out[oy * new_shape[2]..(oy + 1) * new_shape[2]];
        for (value, &sz) in row.iter_mut().zip(&zs) {
          *value = grid.get(sx, sy, sz);
        }
      }
    });

  #[cfg(feature = "tracing")]
  tracing::debug!(?shape, ?new_shape, "binned volume render target");

  VoxelGrid::new(new_shape, data)
}

#[cfg(test)]
#[path = "bin_test.rs"]
mod bin_test;
