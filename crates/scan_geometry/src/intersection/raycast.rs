//! Segment casts against triangle soups: point picking and beam path lengths.

use glam::Vec3;
use rayon::prelude::*;

use crate::constants::{DISTANCE_TOLERANCE, PATH_LENGTH_PADDING, PLANE_EPSILON};
use crate::mesh::Mesh;
use crate::types::{face_vertices, Face};

/// Distance along `direction` at which the ray hits `face` (Möller–Trumbore).
///
/// Faces nearly parallel to the ray (`|det| <= PLANE_EPSILON`) never hit.
#[inline]
fn ray_face_distance(origin: Vec3, direction: Vec3, face: &Face) -> Option<f32> {
  let [p0, p1, p2] = face_vertices(face);
  let e1 = p1 - p0;
  let e2 = p2 - p0;

  let q = direction.cross(e2);
  let det = q.dot(e1);
  if !(det < -PLANE_EPSILON || det > PLANE_EPSILON) {
    return None;
  }

  let f = det.recip();
  let s = origin - p0;
  let u = f * q.dot(s);
  if !(u >= 0.0) {
    return None;
  }

  let r = s.cross(e1);
  let v = f * r.dot(direction);
  if !(v >= 0.0 && u + v <= 1.0) {
    return None;
  }

  Some(f * r.dot(e2))
}

/// Sorted distances in `[0, length]` where the segment from `origin` along
/// the unit `direction` crosses `faces`.
///
/// Distances closer than `tolerance` to the previous kept one are dropped, so
/// a hit on an edge shared by two faces is reported once.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "intersection::segment_triangle"))]
pub fn segment_triangle_intersection(
  origin: Vec3,
  direction: Vec3,
  length: f32,
  faces: &[Face],
  tolerance: f32,
) -> Vec<f32> {
  let mut distances: Vec<f32> = faces
    .par_iter()
    .filter_map(|face| ray_face_distance(origin, direction, face))
    .filter(|&t| (0.0..=length).contains(&t))
    .collect();

  distances.sort_unstable_by(f32::total_cmp);
  distances.dedup_by(|next, kept| (*next - *kept).abs() < tolerance);
  distances
}

/// Points where the segment `start -> end` crosses `faces`, nearest first.
pub fn point_selection(start: Vec3, end: Vec3, faces: &[Face]) -> Vec<Vec3> {
  let direction = end - start;
  let length = direction.length();
  if length < PLANE_EPSILON {
    return Vec::new();
  }
  let direction = direction / length;

  segment_triangle_intersection(start, direction, length, faces, DISTANCE_TOLERANCE)
    .into_iter()
    .map(|t| start + direction * t)
    .collect()
}

/// Length spent inside the sample along a ray that starts inside it.
///
/// Hits alternate exit/entry, so the inside stretches are every other gap of
/// `[0, d1, .., dn, length]`. An even hit count means the ray did not start
/// inside and yields `None`.
fn inside_length(distances: &[f32], length: f32) -> Option<f32> {
  if distances.len() % 2 == 0 {
    return None;
  }

  let mut total = 0.0;
  let mut previous = 0.0;
  for (i, &d) in distances.iter().chain(std::iter::once(&length)).enumerate() {
    if i % 2 == 0 {
      total += d - previous;
    }
    previous = d;
  }
  Some(total)
}

/// Beam path length through `mesh` for each diffracted beam direction.
///
/// The incoming beam travels along `beam_axis` to the gauge volume; each
/// outgoing beam leaves it along one of `diff_axes`. Every leg is traced for
/// the mesh radius plus [`PATH_LENGTH_PADDING`]. A detector gets 0 when its
/// leg has an even number of crossings (gauge volume outside the sample or
/// an unpaired face), and every detector gets 0 when the incoming leg does.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "intersection::path_length"))]
pub fn path_length_calculation(
  mesh: &Mesh,
  gauge_volume: Vec3,
  beam_axis: Vec3,
  diff_axes: &[Vec3],
) -> Vec<f32> {
  let radius = mesh.bounding_box().map_or(0.0, |bounds| bounds.radius());
  let length = radius + PATH_LENGTH_PADDING;
  let faces = mesh.faces();
  let trace = |axis: Vec3| {
    let distances =
      segment_triangle_intersection(gauge_volume, axis, length, &faces, DISTANCE_TOLERANCE);
    inside_length(&distances, length)
  };

  let Some(beam_to_gauge) = trace(-beam_axis) else {
    #[cfg(feature = "tracing")]
    tracing::debug!("gauge volume is outside the sample");
    return vec![0.0; diff_axes.len()];
  };

  diff_axes
    .iter()
    .map(|&axis| trace(axis).map_or(0.0, |gauge_to_detector| beam_to_gauge + gauge_to_detector))
    .collect()
}

#[cfg(test)]
#[path = "raycast_test.rs"]
mod raycast_test;
