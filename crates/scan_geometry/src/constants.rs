//! Numeric constants shared by the volume and mesh algorithms.
//!
//! The tolerances here change what users see in picking and cross-section
//! views, so they are fixed values rather than runtime configuration.
//!
//! # Voxel Grid Layout
//!
//! ```text
//! Volume memory layout (row-major, Z innermost):
//!
//! Address:  0       1     ...  nz-1      nz     ...
//! Content: [0,0,0][0,0,1]...[0,0,nz-1][0,1,0]...
//!          └────────── Z ──────────┘
//!
//! index = (x * ny + y) * nz + z
//! ```

/// Number of RGBA entries in a rasterized transfer function.
pub const TRANSFER_FUNCTION_SIZE: usize = 256;

/// Number of bins in a volume intensity histogram.
pub const HISTOGRAM_BINS: usize = 256;

/// Intensity range covered by the histogram (both ends inclusive).
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 255.0);

/// Byte size above which a volume is down-sampled for rendering.
pub const DEFAULT_MAX_BYTES: u64 = 2_000_000_000;

/// Largest render target dimension after down-sampling.
pub const DEFAULT_MAX_DIM: usize = 1024;

/// Edge-on-plane threshold for segment/plane and segment/triangle tests.
///
/// An edge whose direction has `|dot(normal, b - a)| < PLANE_EPSILON` is
/// treated as lying in the plane and yields no crossing point.
pub const PLANE_EPSILON: f32 = 1e-6;

/// Edge-normal sign sum at or above which a point projects inside a triangle.
///
/// Signs are compared exactly (no epsilon); a point on an edge line
/// contributes 0 to the sum.
pub const INSIDE_SIGN_SUM: f32 = 2.0;

/// Distances along a ray closer than this are reported once.
pub const DISTANCE_TOLERANCE: f32 = 1e-5;

/// Extra length added to the mesh radius when tracing beam paths.
pub const PATH_LENGTH_PADDING: f32 = 100.0;

/// Default pixel count per axis of a volume slice.
pub const DEFAULT_SLICE_RESOLUTION: usize = 1024;

/// Convert 3D grid coordinates to a linear index.
///
/// Layout: X is the major axis, Z is the minor axis (stride 1).
#[inline(always)]
pub const fn grid_index(shape: [usize; 3], x: usize, y: usize, z: usize) -> usize {
  (x * shape[1] + y) * shape[2] + z
}

/// Convert a linear index back to 3D grid coordinates.
#[inline(always)]
pub const fn grid_coord(shape: [usize; 3], index: usize) -> (usize, usize, usize) {
  let z = index % shape[2];
  let y = (index / shape[2]) % shape[1];
  let x = index / (shape[1] * shape[2]);
  (x, y, z)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
