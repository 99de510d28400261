//! Intensity histogram of a voxel grid.

use rayon::prelude::*;

use super::VoxelGrid;
use crate::constants::{HISTOGRAM_BINS, INTENSITY_RANGE};
use crate::transfer::linspace;

/// Voxels per rayon work item when counting.
const COUNT_CHUNK: usize = 1 << 16;

/// Counts of voxel intensities over [0, 255] in 256 equal-width bins.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
  /// Voxel count per bin.
  pub counts: Vec<u64>,
  /// Bin edges, `counts.len() + 1` values from 0 to 255.
  pub edges: Vec<f32>,
}

impl Histogram {
  /// Histogram of every voxel in `grid`.
  ///
  /// Bins are `[edges[i], edges[i + 1])` except the last one, which also
  /// holds intensity 255.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "volume::histogram"))]
  pub fn compute(grid: &VoxelGrid) -> Self {
    let raw = grid
      .data()
      .par_chunks(COUNT_CHUNK)
      .fold(
        || [0u64; 256],
        |mut acc, chunk| {
          for &v in chunk {
            acc[v as usize] += 1;
          }
          acc
        },
      )
      .reduce(
        || [0u64; 256],
        |mut a, b| {
          for (x, y) in a.iter_mut().zip(b.iter()) {
            *x += y;
          }
          a
        },
      );

    let mut counts = vec![0u64; HISTOGRAM_BINS];
    for (intensity, &count) in raw.iter().enumerate() {
      counts[bin_of(intensity as u8)] += count;
    }

    let edges = linspace(INTENSITY_RANGE.0, INTENSITY_RANGE.1, HISTOGRAM_BINS + 1).collect();
    Self { counts, edges }
  }

  /// Total number of voxels counted.
  pub fn total(&self) -> u64 {
    self.counts.iter().sum()
  }

  /// Lowest and highest bin edge.
  pub fn range(&self) -> (f32, f32) {
    (self.edges[0], self.edges[self.edges.len() - 1])
  }
}

/// Bin holding `intensity`: `floor(v * bins / 255)`, with 255 in the last bin.
#[inline]
fn bin_of(intensity: u8) -> usize {
  let span = (INTENSITY_RANGE.1 - INTENSITY_RANGE.0) as usize;
  ((intensity as usize * HISTOGRAM_BINS) / span).min(HISTOGRAM_BINS - 1)
}
