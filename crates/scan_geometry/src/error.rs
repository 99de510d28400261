//! Error type for volume and mesh operations.

use thiserror::Error;

/// Errors surfaced by the geometry engine.
///
/// Degenerate geometry (zero-area triangles, edges or faces lying in a plane)
/// is not an error; those cases fall back numerically.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
  #[error("invalid curve definition: {inputs} inputs, {outputs} outputs ({reason})")]
  InvalidCurveDefinition {
    inputs: usize,
    outputs: usize,
    reason: &'static str,
  },
  #[error("unable to allocate {bytes} bytes")]
  OutOfMemory { bytes: u64 },
  #[error("voxel buffer of length {len} does not match shape {shape:?}")]
  ShapeMismatch { shape: [usize; 3], len: usize },
  #[error("invalid mesh: {0}")]
  InvalidMesh(String),
  #[error("plane normal is degenerate")]
  InvalidPlane,
  #[error("mesh has no triangles to query")]
  EmptyMesh,
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Reserve a zero-filled buffer, mapping allocation failure to `OutOfMemory`.
pub(crate) fn try_zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
  let bytes = (len as u64).saturating_mul(std::mem::size_of::<T>() as u64);
  let mut buffer = Vec::new();
  buffer
    .try_reserve_exact(len)
    .map_err(|_| GeometryError::OutOfMemory { bytes })?;
  buffer.resize(len, T::default());
  Ok(buffer)
}
