//! Closest triangle to a point, for picking and snapping.
//!
//! Per triangle the query precomputes edge vectors, the face normal, the three
//! edge-normal cross products and reciprocal squared lengths once; each query
//! point is then tested against every candidate with a closed-form
//! point/triangle distance (unsigned, squared).
//!
//! ```text
//!              v3
//!              /\
//!        v13  /  \  v32
//!            /    \
//!         v1 ────── v2
//!              v21
//!
//! sign(c21·p1) + sign(c32·p2) + sign(c13·p3) >= 2  =>  projection inside:
//!     d² = (nor·p1)² / (nor·nor)
//! otherwise:
//!     d² = min over edges of |e * clamp(e·p / e·e, 0, 1) - p|²
//! ```
//!
//! Degenerate triangles are not guarded: a zero-length edge makes its
//! reciprocal infinite and the distance NaN, which is never selected as the
//! minimum unless every candidate is non-finite.

use glam::{Vec3, Vec3A};
use rayon::prelude::*;

use crate::constants::INSIDE_SIGN_SUM;
use crate::error::{GeometryError, Result};
use crate::types::{face_vertices, Face};

/// Index and squared distance of the triangle nearest to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestTriangle {
  pub index: usize,
  pub distance_squared: f32,
}

/// Per-triangle terms shared by every query point.
#[derive(Clone, Copy, Debug)]
struct PreparedTriangle {
  v1: Vec3A,
  v2: Vec3A,
  v3: Vec3A,
  v21: Vec3A,
  v32: Vec3A,
  v13: Vec3A,
  nor: Vec3A,
  c21: Vec3A,
  c32: Vec3A,
  c13: Vec3A,
  inv_v21: f32,
  inv_v32: f32,
  inv_v13: f32,
  inv_nor: f32,
}

impl PreparedTriangle {
  fn new(face: &Face) -> Self {
    let [v1, v2, v3] = face_vertices(face).map(Vec3A::from);
    let v21 = v2 - v1;
    let v32 = v3 - v2;
    let v13 = v1 - v3;
    let nor = v21.cross(v13);

    Self {
      v1,
      v2,
      v3,
      v21,
      v32,
      v13,
      nor,
      c21: v21.cross(nor),
      c32: v32.cross(nor),
      c13: v13.cross(nor),
      inv_v21: v21.length_squared().recip(),
      inv_v32: v32.length_squared().recip(),
      inv_v13: v13.length_squared().recip(),
      inv_nor: nor.length_squared().recip(),
    }
  }

  #[inline]
  fn distance_squared(&self, point: Vec3A) -> f32 {
    let p1 = point - self.v1;
    let p2 = point - self.v2;
    let p3 = point - self.v3;

    let signs = sign(self.c21.dot(p1)) + sign(self.c32.dot(p2)) + sign(self.c13.dot(p3));

    if signs < INSIDE_SIGN_SUM {
      let d21 = edge_distance_squared(self.v21, p1, self.inv_v21);
      let d32 = edge_distance_squared(self.v32, p2, self.inv_v32);
      let d13 = edge_distance_squared(self.v13, p3, self.inv_v13);
      nan_min(d21, nan_min(d32, d13))
    } else {
      let height = self.nor.dot(p1);
      height * height * self.inv_nor
    }
  }
}

/// Sign as -1, 0 or 1; NaN stays NaN.
#[inline(always)]
fn sign(value: f32) -> f32 {
  if value > 0.0 {
    1.0
  } else if value < 0.0 {
    -1.0
  } else {
    value * 0.0
  }
}

/// `min` that propagates NaN instead of ignoring it.
#[inline(always)]
fn nan_min(a: f32, b: f32) -> f32 {
  if a.is_nan() || b.is_nan() {
    f32::NAN
  } else {
    a.min(b)
  }
}

/// Squared distance from the point at `p` (relative to the edge start) to
/// the edge `edge`, with the projection clamped to the segment.
#[inline(always)]
fn edge_distance_squared(edge: Vec3A, p: Vec3A, inv_len_sq: f32) -> f32 {
  let t = (edge.dot(p) * inv_len_sq).clamp(0.0, 1.0);
  (edge * t - p).length_squared()
}

/// Closest-triangle query over a fixed triangle soup.
#[derive(Clone, Debug)]
pub struct ClosestTriangleQuery {
  faces: Vec<Face>,
  triangles: Vec<PreparedTriangle>,
}

impl ClosestTriangleQuery {
  pub fn new(faces: &[Face]) -> Self {
    Self {
      faces: faces.to_vec(),
      triangles: faces.iter().map(PreparedTriangle::new).collect(),
    }
  }

  /// Number of candidate triangles.
  pub fn len(&self) -> usize {
    self.triangles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  pub fn face(&self, index: usize) -> &Face {
    &self.faces[index]
  }

  /// Squared distance from `point` to triangle `index`.
  pub fn distance_squared(&self, index: usize, point: Vec3) -> f32 {
    self.triangles[index].distance_squared(point.into())
  }

  /// Nearest triangle to `point`; ties resolve to the lowest index.
  ///
  /// Returns `None` only when there are no candidates. If no candidate has a
  /// finite distance the first triangle is returned.
  pub fn closest(&self, point: Vec3) -> Option<ClosestTriangle> {
    let point = Vec3A::from(point);
    let mut best: Option<ClosestTriangle> = None;
    let mut best_distance = f32::INFINITY;

    for (index, triangle) in self.triangles.iter().enumerate() {
      let distance_squared = triangle.distance_squared(point);
      if distance_squared < best_distance {
        best_distance = distance_squared;
        best = Some(ClosestTriangle {
          index,
          distance_squared,
        });
      }
    }

    best.or_else(|| {
      self.triangles.first().map(|triangle| ClosestTriangle {
        index: 0,
        distance_squared: triangle.distance_squared(point),
      })
    })
  }

  /// [`closest`](Self::closest) for every point, in parallel across points.
  ///
  /// Each point scans the candidates in index order, so results do not
  /// depend on the thread count.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "intersection::closest_batch"))]
  pub fn closest_batch(&self, points: &[Vec3]) -> Vec<Option<ClosestTriangle>> {
    points.par_iter().map(|&p| self.closest(p)).collect()
  }

  /// Closest face (9 floats) for every point.
  ///
  /// # Errors
  /// `EmptyMesh` if there are query points but no candidate triangles.
  pub fn closest_faces(&self, points: &[Vec3]) -> Result<Vec<Face>> {
    if self.is_empty() && !points.is_empty() {
      return Err(GeometryError::EmptyMesh);
    }
    Ok(
      self
        .closest_batch(points)
        .into_iter()
        .flatten()
        .map(|hit| self.faces[hit.index])
        .collect(),
    )
  }
}

/// Closest face in `faces` to each of `points`.
pub fn closest_triangle_to_point(faces: &[Face], points: &[Vec3]) -> Result<Vec<Face>> {
  ClosestTriangleQuery::new(faces).closest_faces(points)
}

#[cfg(test)]
#[path = "closest_test.rs"]
mod closest_test;
