//! Query stage for batched picking, sectioning and path length requests.
//!
//! Following the stage pattern: Enqueue → Tick → Completions
//!
//! Requests reference shared geometry through `Arc`, so queuing a query never
//! copies a mesh. All pending requests run in parallel on `tick`.

use std::sync::Arc;

use glam::Vec3;
use rayon::prelude::*;
use web_time::Instant;

use crate::intersection::{
  mesh_plane_intersection, path_length_calculation, ClosestTriangle, ClosestTriangleQuery,
};
use crate::mesh::Mesh;
use crate::types::Plane;

/// Work accepted by a [`QueryStage`].
#[derive(Clone, Debug)]
pub enum QueryRequest {
  /// Nearest triangle to each point.
  ClosestTriangles {
    query: Arc<ClosestTriangleQuery>,
    points: Vec<Vec3>,
  },
  /// Cross-section segments of a mesh.
  PlaneSection { mesh: Arc<Mesh>, plane: Plane },
  /// Beam path length per detector.
  PathLength {
    mesh: Arc<Mesh>,
    gauge_volume: Vec3,
    beam_axis: Vec3,
    diff_axes: Vec<Vec3>,
  },
}

/// Result of a [`QueryRequest`], same variant order.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
  ClosestTriangles(Vec<Option<ClosestTriangle>>),
  PlaneSection(Vec<Vec3>),
  PathLength(Vec<f32>),
}

impl QueryRequest {
  fn run(&self) -> QueryResult {
    match self {
      Self::ClosestTriangles { query, points } => QueryResult::ClosestTriangles(query.closest_batch(points)),
      Self::PlaneSection { mesh, plane } => QueryResult::PlaneSection(mesh_plane_intersection(mesh, plane)),
      Self::PathLength {
        mesh,
        gauge_volume,
        beam_axis,
        diff_axes,
      } => QueryResult::PathLength(path_length_calculation(mesh, *gauge_volume, *beam_axis, diff_axes)),
    }
  }
}

/// Completed query.
#[derive(Debug)]
pub struct QueryCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub result: QueryResult,
  /// Query time in microseconds
  pub elapsed_us: u64,
}

/// Stage that processes queued queries in parallel.
pub struct QueryStage {
  /// Pending requests with their IDs
  pending: Vec<(u64, QueryRequest)>,
  /// Completed results ready to be collected
  completed: Vec<QueryCompletion>,
  next_id: u64,
}

impl Default for QueryStage {
  fn default() -> Self {
    Self::new()
  }
}

impl QueryStage {
  pub fn new() -> Self {
    Self {
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
    }
  }

  /// Enqueue a request, returning the assigned ID.
  pub fn enqueue(&mut self, request: QueryRequest) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push((id, request));
    id
  }

  /// Drop a request that has not run yet.
  ///
  /// Returns `false` if the ID is unknown or already processed.
  pub fn cancel(&mut self, id: u64) -> bool {
    let before = self.pending.len();
    self.pending.retain(|(pending_id, _)| *pending_id != id);
    self.pending.len() != before
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of requests processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "query_stage::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<QueryCompletion> = requests
      .into_par_iter()
      .map(|(id, request)| {
        let start = Instant::now();
        let result = request.run();
        QueryCompletion {
          id,
          result,
          elapsed_us: start.elapsed().as_micros() as u64,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completed queries, in enqueue order.
  pub fn drain_completions(&mut self) -> Vec<QueryCompletion> {
    std::mem::take(&mut self.completed)
  }

  /// Number of pending requests.
  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "query_queue_test.rs"]
mod query_queue_test;
