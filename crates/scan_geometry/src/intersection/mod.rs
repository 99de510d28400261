//! Triangle mesh queries used for picking, cross-sections and beam paths.

pub mod closest;
pub mod raycast;
pub mod section;

pub use closest::{closest_triangle_to_point, ClosestTriangle, ClosestTriangleQuery};
pub use raycast::{path_length_calculation, point_selection, segment_triangle_intersection};
pub use section::{mesh_plane_intersection, segment_plane_intersection};
