//! Triangle mesh buffers consumed by the intersection queries.
//!
//! Meshes are owned by the sample model; the geometry engine only reads them
//! (apart from explicit [`Mesh::transform`] calls made by the owner).

pub mod primitives;

use glam::{Mat3, Mat4, Vec3};

use crate::error::{GeometryError, Result};
use crate::types::{face_from_vertices, Aabb, Face};

/// Indexed triangle mesh with optional per-vertex normals.
///
/// Buffers are only reachable through [`Mesh::new`], so every index is in
/// range for the vertex buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
  /// Vertex positions.
  vertices: Vec<Vec3>,

  /// Triangle indices (3 indices per triangle).
  indices: Vec<u32>,

  /// Per-vertex unit normals, either empty or parallel to `vertices`.
  normals: Vec<Vec3>,
}

impl Mesh {
  /// Create a mesh, validating the index and normal buffers.
  pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>, normals: Vec<Vec3>) -> Result<Self> {
    if indices.len() % 3 != 0 {
      return Err(GeometryError::InvalidMesh(format!(
        "index count {} is not a multiple of 3",
        indices.len()
      )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
      return Err(GeometryError::InvalidMesh(format!(
        "index {} out of range for {} vertices",
        bad,
        vertices.len()
      )));
    }
    if !normals.is_empty() && normals.len() != vertices.len() {
      return Err(GeometryError::InvalidMesh(format!(
        "{} normals for {} vertices",
        normals.len(),
        vertices.len()
      )));
    }

    Ok(Self {
      vertices,
      indices,
      normals,
    })
  }

  pub fn vertices(&self) -> &[Vec3] {
    &self.vertices
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  pub fn normals(&self) -> &[Vec3] {
    &self.normals
  }

  /// Returns true if the mesh has no triangles.
  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Vertices of triangle `index`.
  #[inline]
  pub fn triangle(&self, index: usize) -> [Vec3; 3] {
    let tri = &self.indices[index * 3..index * 3 + 3];
    [
      self.vertices[tri[0] as usize],
      self.vertices[tri[1] as usize],
      self.vertices[tri[2] as usize],
    ]
  }

  /// Expand the index buffer into flat 9-float faces.
  pub fn faces(&self) -> Vec<Face> {
    (0..self.triangle_count())
      .map(|i| {
        let [a, b, c] = self.triangle(i);
        face_from_vertices(a, b, c)
      })
      .collect()
  }

  /// Bounds of all vertices, `None` for a mesh without vertices.
  pub fn bounding_box(&self) -> Option<Aabb> {
    Aabb::from_points(&self.vertices)
  }

  /// Transform positions and normals in place.
  pub fn transform(&mut self, matrix: &Mat4) {
    for vertex in &mut self.vertices {
      *vertex = matrix.transform_point3(*vertex);
    }

    let normal_matrix = normal_matrix(matrix);
    for normal in &mut self.normals {
      *normal = (normal_matrix * *normal).normalize_or_zero();
    }
  }

  /// Copy of this mesh with `matrix` applied.
  pub fn transformed(&self, matrix: &Mat4) -> Self {
    let mut mesh = self.clone();
    mesh.transform(matrix);
    mesh
  }
}

/// Inverse-transpose of the linear part, or the linear part itself when it is
/// singular.
fn normal_matrix(matrix: &Mat4) -> Mat3 {
  let linear = Mat3::from_mat4(*matrix);
  if linear.determinant().abs() <= f32::EPSILON {
    linear
  } else {
    linear.inverse().transpose()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
