//! Dense 8-bit voxel grid with shared storage.

use std::sync::Arc;

use crate::constants::grid_index;
use crate::error::{GeometryError, Result};

/// 3-D grid of 8-bit intensities.
///
/// Storage is reference counted: cloning a grid shares the samples instead of
/// copying them, which is how a volume that needs no down-sampling hands its
/// data to the renderer.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
  shape: [usize; 3],
  data: Arc<[u8]>,
}

impl VoxelGrid {
  /// Wrap `data` laid out X-major / Z-minor (see [`grid_index`]).
  ///
  /// # Errors
  /// `ShapeMismatch` if a dimension is zero or `data.len()` differs from the
  /// product of `shape`.
  pub fn new(shape: [usize; 3], data: Vec<u8>) -> Result<Self> {
    let expected = shape
      .iter()
      .try_fold(1usize, |acc, &d| acc.checked_mul(d));
    if shape.contains(&0) || expected != Some(data.len()) {
      return Err(GeometryError::ShapeMismatch {
        shape,
        len: data.len(),
      });
    }
    Ok(Self {
      shape,
      data: data.into(),
    })
  }

  /// Grid filled by `f(x, y, z)`.
  pub fn from_fn(shape: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> u8) -> Result<Self> {
    let mut data = Vec::with_capacity(shape.iter().product());
    for x in 0..shape[0] {
      for y in 0..shape[1] {
        for z in 0..shape[2] {
          data.push(f(x, y, z));
        }
      }
    }
    Self::new(shape, data)
  }

  #[inline]
  pub fn shape(&self) -> [usize; 3] {
    self.shape
  }

  #[inline]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// Number of bytes held by the samples.
  #[inline]
  pub fn byte_size(&self) -> u64 {
    self.data.len() as u64
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.data.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  #[inline]
  pub fn get(&self, x: usize, y: usize, z: usize) -> u8 {
    self.data[grid_index(self.shape, x, y, z)]
  }

  /// True if both grids read the same backing buffer.
  pub fn shares_storage_with(&self, other: &VoxelGrid) -> bool {
    Arc::ptr_eq(&self.data, &other.data)
  }
}
