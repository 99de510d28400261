//! Core geometric value types: bounding boxes, planes and flat faces.

use glam::{Mat4, Vec3};

use crate::error::{GeometryError, Result};

/// Triangle stored as 9 floats: three consecutive `[x, y, z]` vertices.
pub type Face = [f32; 9];

/// Split a flat face into its three vertices.
#[inline]
pub fn face_vertices(face: &Face) -> [Vec3; 3] {
  [
    Vec3::new(face[0], face[1], face[2]),
    Vec3::new(face[3], face[4], face[5]),
    Vec3::new(face[6], face[7], face[8]),
  ]
}

/// Pack three vertices into a flat face.
#[inline]
pub fn face_from_vertices(v1: Vec3, v2: Vec3, v3: Vec3) -> Face {
  [v1.x, v1.y, v1.z, v2.x, v2.y, v2.z, v3.x, v3.y, v3.z]
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  pub min: Vec3,
  pub max: Vec3,
}

impl Aabb {
  /// Create AABB from min/max corners.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create AABB from center and half-extents.
  pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Smallest box containing every point, `None` for an empty slice.
  pub fn from_points(points: &[Vec3]) -> Option<Self> {
    let first = *points.first()?;
    let (min, max) = points
      .iter()
      .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    Some(Self { min, max })
  }

  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Half the length of the box diagonal.
  #[inline]
  pub fn radius(&self) -> f32 {
    self.size().length() * 0.5
  }

  /// The 8 corners, binary ZYX ordering (bit 0 = max x).
  pub fn corners(&self) -> [Vec3; 8] {
    std::array::from_fn(|i| {
      Vec3::new(
        if i & 1 == 0 { self.min.x } else { self.max.x },
        if i & 2 == 0 { self.min.y } else { self.max.y },
        if i & 4 == 0 { self.min.z } else { self.max.z },
      )
    })
  }

  pub fn translate(&self, offset: Vec3) -> Self {
    Self {
      min: self.min + offset,
      max: self.max + offset,
    }
  }

  /// Bounds of this box after an affine transform (Arvo's method).
  ///
  /// Equivalent to transforming all 8 corners and re-fitting the box.
  pub fn transform(&self, matrix: &Mat4) -> Self {
    let translation = matrix.w_axis.truncate();
    let mut min = translation;
    let mut max = translation;
    for col in 0..3 {
      let axis = matrix.col(col).truncate();
      let a = axis * self.min[col];
      let b = axis * self.max[col];
      min += a.min(b);
      max += a.max(b);
    }
    Self { min, max }
  }

  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }
}

/// Plane described by a point on it and a unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub point: Vec3,
}

impl Plane {
  /// Create a plane, normalizing `normal`.
  pub fn new(normal: Vec3, point: Vec3) -> Result<Self> {
    let normal = normal.try_normalize().ok_or(GeometryError::InvalidPlane)?;
    Ok(Self { normal, point })
  }

  /// Plane through three points, normal following the right-hand rule.
  pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Result<Self> {
    Self::new((b - a).cross(c - a), a)
  }

  /// Plane from the coefficients of `ax + by + cz + d = 0`.
  pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Result<Self> {
    let normal = Vec3::new(a, b, c);
    let len_sq = normal.length_squared();
    if len_sq == 0.0 || !len_sq.is_finite() {
      return Err(GeometryError::InvalidPlane);
    }
    Self::new(normal, normal * (-d / len_sq))
  }

  #[inline]
  pub fn signed_distance(&self, point: Vec3) -> f32 {
    self.normal.dot(point - self.point)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
