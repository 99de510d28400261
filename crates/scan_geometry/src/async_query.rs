//! Background queries on the rayon pool.
//!
//! Picking against large meshes can take longer than a frame. An
//! [`AsyncQuery`] runs one job at a time off the calling thread and is polled
//! for the result; cancelling drops the result channel and trips a
//! [`CancelToken`] the job checks between units of work.
//!
//! ```text
//! Caller                            rayon
//! ┌──────────┐ start(job)
//! │ capture  │──────────────────▶ ┌────────────────────┐
//! │ inputs   │                    │ job(&token)        │
//! └──────────┘                    │  checks token      │
//!                                 │  between points    │
//! ┌──────────┐  try_recv          └─────────┬──────────┘
//! │ poll()   │◀─────────────────────────────┘
//! └──────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut picking = AsyncQuery::new();
//! picking.start_closest(query.clone(), vec![cursor_point]);
//!
//! // Each frame
//! if let Some(hits) = picking.poll() {
//!   select(hits[0]);
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, TryRecvError};
use glam::Vec3;
use rayon::prelude::*;

use crate::intersection::{ClosestTriangle, ClosestTriangleQuery};

/// Shared cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

/// Non-blocking single-slot job runner.
pub struct AsyncQuery<T> {
  receiver: Option<Receiver<T>>,
  token: CancelToken,
}

impl<T> Default for AsyncQuery<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> AsyncQuery<T> {
  pub fn new() -> Self {
    Self {
      receiver: None,
      token: CancelToken::new(),
    }
  }

  /// Check if a job is running or its result has not been polled yet.
  pub fn is_busy(&self) -> bool {
    self.receiver.is_some()
  }

  /// Poll for the result (non-blocking).
  ///
  /// Returns `Some(result)` once, when the job has finished. A job that gave
  /// up (returned `None`) frees the slot without a result.
  pub fn poll(&mut self) -> Option<T> {
    let receiver = self.receiver.as_ref()?;

    match receiver.try_recv() {
      Ok(result) => {
        self.receiver = None;
        Some(result)
      }
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => {
        self.receiver = None;
        None
      }
    }
  }

  /// Cancel the running job; its result, if any, is discarded.
  pub fn cancel(&mut self) {
    if self.receiver.take().is_some() {
      self.token.cancel();
      #[cfg(feature = "tracing")]
      tracing::debug!("async query cancelled");
    }
  }
}

impl<T: Send + 'static> AsyncQuery<T> {
  /// Spawn `job` on the rayon pool.
  ///
  /// Returns `true` if started, `false` if a job is already running.
  pub fn start<F>(&mut self, job: F) -> bool
  where
    F: FnOnce(&CancelToken) -> Option<T> + Send + 'static,
  {
    if self.is_busy() {
      return false;
    }

    let (sender, receiver) = channel::bounded(1);
    self.receiver = Some(receiver);
    self.token = CancelToken::new();
    let token = self.token.clone();

    rayon::spawn(move || {
      if let Some(result) = job(&token) {
        // Receiver dropped = cancelled
        let _ = sender.send(result);
      }
    });

    true
  }
}

impl AsyncQuery<Vec<Option<ClosestTriangle>>> {
  /// Start a closest-triangle batch that stops early on cancel.
  pub fn start_closest(&mut self, query: Arc<ClosestTriangleQuery>, points: Vec<Vec3>) -> bool {
    self.start(move |token| closest_batch_cancellable(&query, &points, token))
  }
}

/// [`ClosestTriangleQuery::closest_batch`] that checks `token` before each
/// point and returns `None` once it is tripped.
pub fn closest_batch_cancellable(
  query: &ClosestTriangleQuery,
  points: &[Vec3],
  token: &CancelToken,
) -> Option<Vec<Option<ClosestTriangle>>> {
  points
    .par_iter()
    .map(|&point| (!token.is_cancelled()).then(|| query.closest(point)))
    .collect()
}

#[cfg(test)]
#[path = "async_query_test.rs"]
mod async_query_test;
