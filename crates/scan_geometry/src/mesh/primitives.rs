//! Procedural meshes used to represent volume bounds in the scene.

use glam::Vec3;

use super::Mesh;

/// Outward normal and the two in-face axes (u, v) of each cuboid side, ordered
/// so that `u x v == normal`.
const CUBOID_SIDES: [(Vec3, Vec3, Vec3); 6] = [
  (Vec3::X, Vec3::Y, Vec3::Z),
  (Vec3::NEG_X, Vec3::Z, Vec3::Y),
  (Vec3::Y, Vec3::Z, Vec3::X),
  (Vec3::NEG_Y, Vec3::X, Vec3::Z),
  (Vec3::Z, Vec3::X, Vec3::Y),
  (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Axis-aligned box centred on the origin.
///
/// `width`, `height` and `depth` are the sizes along X, Y and Z. Each side has
/// its own 4 vertices so normals stay flat: 24 vertices, 12 triangles, counter
/// clockwise when seen from outside.
pub fn create_cuboid(width: f32, height: f32, depth: f32) -> Mesh {
  let half = Vec3::new(width, height, depth) * 0.5;

  let mut vertices = Vec::with_capacity(24);
  let mut normals = Vec::with_capacity(24);
  let mut indices = Vec::with_capacity(36);

  for (normal, u, v) in CUBOID_SIDES {
    let base = vertices.len() as u32;
    let centre = normal * half;
    for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
      vertices.push(centre + u * half * su + v * half * sv);
      normals.push(normal);
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
  }

  Mesh {
    vertices,
    indices,
    normals,
  }
}
