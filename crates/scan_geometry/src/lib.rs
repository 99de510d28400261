//! scan_geometry - Volume and triangle-mesh geometry for scan planning
//!
//! This crate holds the numerical core behind sample alignment and
//! instrument simulation: preparing volumetric scans for display and
//! answering geometric queries against triangle meshes of the sample.
//!
//! # Features
//!
//! - **Volumes**: intensity histogram, default transfer function curve,
//!   memory-bounded down-sampling of the render target, placement and planar
//!   slicing
//! - **Transfer functions**: cubic (not-a-knot) or linear curves rasterized
//!   into a 256-entry RGBA lookup table
//! - **Picking**: closest triangle to a point, segment/triangle hits
//! - **Cross-sections**: mesh/plane intersection as point-pair segments
//! - **Beam paths**: path length through a sample for each detector
//! - **Background work**: cancellable async queries and a batched query stage
//!
//! # Example
//!
//! ```ignore
//! use scan_geometry::{mesh_plane_intersection, Plane, VolumeData, VoxelGrid};
//! use glam::Vec3;
//!
//! let grid = VoxelGrid::new([64, 64, 64], data)?;
//! let volume = VolumeData::new(grid, Vec3::splat(0.5), Vec3::ZERO)?;
//! upload(volume.render_target(), volume.transfer_function());
//!
//! let plane = Plane::new(Vec3::Z, Vec3::ZERO)?;
//! let segments = mesh_plane_intersection(&volume.as_mesh(), &plane);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{grid_coord, grid_index, PLANE_EPSILON, TRANSFER_FUNCTION_SIZE};
pub use error::{GeometryError, Result};
pub use types::{face_from_vertices, face_vertices, Aabb, Face, Plane};

// Triangle meshes
pub mod mesh;
pub use mesh::primitives::create_cuboid;
pub use mesh::Mesh;

// Transfer function curves
pub mod transfer;
pub use transfer::{Curve, CurveKind};

// Volume data and slicing
pub mod volume;
pub use volume::{
  view_from_plane, volume_plane_intersection, Histogram, VolumeConfig, VolumeData, VolumeSlice,
  VoxelGrid,
};

// Mesh queries
pub mod intersection;
pub use intersection::{
  closest_triangle_to_point, mesh_plane_intersection, path_length_calculation, point_selection,
  segment_plane_intersection, segment_triangle_intersection, ClosestTriangle, ClosestTriangleQuery,
};

// Background execution
pub mod async_query;
pub use async_query::{AsyncQuery, CancelToken};

// Batched query stage
pub mod query_queue;
pub use query_queue::{QueryCompletion, QueryRequest, QueryResult, QueryStage};
