//! Transfer functions for volume rendering.
//!
//! A [`Curve`] maps voxel intensity to opacity and is rasterized into a
//! 256-entry RGBA lookup table that the renderer uploads as a 1-D texture.

mod curve;
pub mod spline;

pub use curve::{Curve, CurveKind};

/// `n` evenly spaced values from `start` to `end`, both ends included exactly.
pub fn linspace(start: f32, end: f32, n: usize) -> impl Iterator<Item = f32> {
  let (start64, end64) = (start as f64, end as f64);
  let step = if n > 1 {
    (end64 - start64) / (n - 1) as f64
  } else {
    0.0
  };
  (0..n).map(move |i| {
    if i + 1 == n && n > 1 {
      end
    } else {
      (start64 + step * i as f64) as f32
    }
  })
}
