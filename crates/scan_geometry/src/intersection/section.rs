//! Cross-section of a triangle mesh by a plane.
//!
//! The output is a flat list of points where each pair `(2k, 2k + 1)` is one
//! segment of the section polyline, in face order. Faces lying entirely in
//! the plane and edges parallel to it (within [`PLANE_EPSILON`]) contribute
//! nothing.

use glam::Vec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::constants::PLANE_EPSILON;
use crate::mesh::Mesh;
use crate::types::Plane;

/// Segment points produced by one face (0 or 2).
type FaceSegment = SmallVec<[Vec3; 2]>;

/// Edges tested when no vertex lies on the plane.
const FACE_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (0, 2)];

/// Point where segment `a -> b` crosses `plane`, if it does.
///
/// Returns `None` when the segment is parallel to the plane (including lying
/// in it) or when the crossing falls outside the segment.
pub fn segment_plane_intersection(a: Vec3, b: Vec3, plane: &Plane) -> Option<Vec3> {
  let ab = b - a;
  let n = -plane.normal.dot(a - plane.point);
  let d = plane.normal.dot(ab);
  if -PLANE_EPSILON < d && d < PLANE_EPSILON {
    return None;
  }

  let t = n / d;
  (0.0..=1.0).contains(&t).then(|| a + ab * t)
}

/// Section segment of a single triangle given its vertex distances.
fn face_section(vertices: [Vec3; 3], distances: [f32; 3], plane: &Plane) -> FaceSegment {
  let mut points = FaceSegment::new();

  if distances.iter().all(|&d| d > 0.0) || distances.iter().all(|&d| d < 0.0) {
    return points;
  }

  let (on_plane, off_plane): (SmallVec<[usize; 3]>, SmallVec<[usize; 3]>) =
    (0..3).partition(|&i| distances[i] == 0.0);

  let edges: SmallVec<[(usize, usize); 3]> = match off_plane.len() {
    // Whole face in the plane
    0 => return points,
    // Edge in the plane
    1 => {
      points.extend(on_plane.iter().map(|&i| vertices[i]));
      return points;
    }
    // One vertex in the plane: it starts the segment
    2 => {
      points.extend(on_plane.iter().map(|&i| vertices[i]));
      smallvec::smallvec![(off_plane[0], off_plane[1])]
    }
    _ => FACE_EDGES.into_iter().collect(),
  };

  for (i, j) in edges {
    if let Some(point) = segment_plane_intersection(vertices[i], vertices[j], plane) {
      points.push(point);
    }
    if points.len() == 2 {
      return points;
    }
  }

  FaceSegment::new()
}

/// Segments where `plane` cuts `mesh`, as consecutive point pairs.
///
/// An empty result means the plane misses the mesh.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "intersection::mesh_plane"))]
pub fn mesh_plane_intersection(mesh: &Mesh, plane: &Plane) -> Vec<Vec3> {
  (0..mesh.triangle_count())
    .into_par_iter()
    .flat_map_iter(|face| {
      let vertices = mesh.triangle(face);
      let distances = vertices.map(|v| plane.signed_distance(v));
      face_section(vertices, distances, plane)
    })
    .collect()
}

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;
