//! Volumetric datasets: histogram, default transfer function, placement and
//! the render target handed to the renderer.
//!
//! # Render Target
//!
//! ```text
//! data.byte_size() <= max_bytes      data.byte_size() > max_bytes
//! ┌──────────────┐                   ┌──────────────┐
//! │ data         │                   │ data         │ full resolution
//! └──────┬───────┘                   └──────┬───────┘
//!        │ shared storage                   │ bin(max_dim)
//!        ▼                                  ▼
//! ┌──────────────┐                   ┌────────┐
//! │ render_target│                   │ render │ largest axis == max_dim
//! └──────────────┘                   └────────┘
//! ```

mod bin;
mod grid;
mod histogram;
pub mod slice;

pub use bin::{bin, binned_shape};
pub use grid::VoxelGrid;
pub use histogram::Histogram;
pub use slice::{view_from_plane, volume_plane_intersection, VolumeSlice};

use glam::{Mat3, Mat4, Vec3};

use crate::constants::{DEFAULT_MAX_BYTES, DEFAULT_MAX_DIM, DEFAULT_SLICE_RESOLUTION};
use crate::error::Result;
use crate::mesh::primitives::create_cuboid;
use crate::mesh::Mesh;
use crate::transfer::{Curve, CurveKind};
use crate::types::{Aabb, Plane};

/// Memory budget for volume render targets.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeConfig {
  /// Byte size above which the render target is down-sampled.
  pub max_bytes: u64,

  /// Largest render target dimension after down-sampling.
  pub max_dim: usize,
}

impl Default for VolumeConfig {
  fn default() -> Self {
    Self {
      max_bytes: DEFAULT_MAX_BYTES,
      max_dim: DEFAULT_MAX_DIM,
    }
  }
}

impl VolumeConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
    self.max_bytes = max_bytes;
    self
  }

  pub fn with_max_dim(mut self, max_dim: usize) -> Self {
    self.max_dim = max_dim;
    self
  }
}

/// A loaded volume and everything derived from it for display.
///
/// Placement (`rotate`, `translate`, `transform`) mutates in place and never
/// touches the voxel data; callers sharing a volume across threads must
/// serialize those calls.
#[derive(Clone, Debug)]
pub struct VolumeData {
  data: VoxelGrid,
  voxel_size: Vec3,
  histogram: Histogram,
  curve: Curve,
  transform: Mat4,
  bounding_box: Aabb,
  render_target: VoxelGrid,
}

impl VolumeData {
  /// Create a volume centred at `centre` with the default memory budget.
  pub fn new(data: VoxelGrid, voxel_size: Vec3, centre: Vec3) -> Result<Self> {
    Self::with_config(data, voxel_size, centre, &VolumeConfig::default())
  }

  /// Create a volume centred at `centre`.
  ///
  /// # Errors
  /// `OutOfMemory` if the data exceeds `config.max_bytes` and the
  /// down-sampled render target cannot be allocated.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "volume::create"))]
  pub fn with_config(
    data: VoxelGrid,
    voxel_size: Vec3,
    centre: Vec3,
    config: &VolumeConfig,
  ) -> Result<Self> {
    // Phase 1: Histogram and default curve
    let (histogram, curve) = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("histogram_and_curve").entered();
      let histogram = Histogram::compute(&data);
      let (low, high) = histogram.range();
      let curve = Curve::new(vec![low, high], vec![0.0, 1.0], (low, high), CurveKind::Cubic)?;
      (histogram, curve)
    };

    // Phase 2: Render target within the memory budget
    let render_target = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("render_target").entered();
      if data.byte_size() > config.max_bytes {
        bin(&data, config.max_dim)?
      } else {
        data.clone()
      }
    };

    let transform = Mat4::from_translation(centre);
    let mut volume = Self {
      data,
      voxel_size,
      histogram,
      curve,
      transform,
      bounding_box: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ZERO),
      render_target,
    };
    volume.bounding_box = volume.local_bounds().transform(&volume.transform);
    Ok(volume)
  }

  /// Box of half-extents `extent / 2` around the origin.
  fn local_bounds(&self) -> Aabb {
    Aabb::from_center_half_extents(Vec3::ZERO, self.extent() * 0.5)
  }

  /// Grid dimensions in voxels.
  pub fn shape(&self) -> [usize; 3] {
    self.data.shape()
  }

  /// Physical size of the volume (`voxel_size * shape`).
  pub fn extent(&self) -> Vec3 {
    let [x, y, z] = self.shape();
    self.voxel_size * Vec3::new(x as f32, y as f32, z as f32)
  }

  pub fn voxel_size(&self) -> Vec3 {
    self.voxel_size
  }

  /// Full-resolution voxel data.
  pub fn data(&self) -> &VoxelGrid {
    &self.data
  }

  /// Grid uploaded for display; shares storage with `data` unless binned.
  pub fn render_target(&self) -> &VoxelGrid {
    &self.render_target
  }

  /// True if the render target was down-sampled.
  pub fn is_binned(&self) -> bool {
    !self.render_target.shares_storage_with(&self.data)
  }

  pub fn histogram(&self) -> &Histogram {
    &self.histogram
  }

  pub fn curve(&self) -> &Curve {
    &self.curve
  }

  /// Replace the transfer function curve (e.g. after a user edit).
  pub fn set_curve(&mut self, curve: Curve) {
    self.curve = curve;
  }

  /// Flattened 256×4 RGBA lookup table of the current curve.
  pub fn transfer_function(&self) -> &[f32] {
    self.curve.transfer_function()
  }

  pub fn transform_matrix(&self) -> Mat4 {
    self.transform
  }

  /// World-space bounds of the volume.
  pub fn bounding_box(&self) -> Aabb {
    self.bounding_box
  }

  /// Rotate about the world origin by a 3×3 rotation.
  pub fn rotate(&mut self, rotation: &Mat3) {
    self.transform(&Mat4::from_mat3(*rotation));
  }

  pub fn translate(&mut self, offset: Vec3) {
    self.transform(&Mat4::from_translation(offset));
  }

  /// Apply `matrix` on the left of the current placement.
  pub fn transform(&mut self, matrix: &Mat4) {
    self.transform = *matrix * self.transform;
    self.bounding_box = self.local_bounds().transform(&self.transform);
  }

  /// Placed box covering the volume, used as its scene geometry.
  pub fn as_mesh(&self) -> Mesh {
    let model = Mat4::from_scale(self.extent() * 0.5);
    create_cuboid(2.0, 2.0, 2.0).transformed(&(self.transform * model))
  }

  /// Cross-section image at [`DEFAULT_SLICE_RESOLUTION`] pixels per axis.
  pub fn slice(&self, plane: &Plane) -> Result<Option<VolumeSlice>> {
    volume_plane_intersection(self, plane, DEFAULT_SLICE_RESOLUTION)
  }
}
