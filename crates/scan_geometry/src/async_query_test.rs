use std::sync::atomic::AtomicBool;
use std::time::Duration;

use super::*;
use crate::types::face_from_vertices;

fn wait_for<T>(query: &mut AsyncQuery<T>) -> Option<T> {
  for _ in 0..5000 {
    if let Some(result) = query.poll() {
      return Some(result);
    }
    if !query.is_busy() {
      return None;
    }
    std::thread::sleep(Duration::from_millis(1));
  }
  panic!("async query did not finish");
}

fn layered_query() -> Arc<ClosestTriangleQuery> {
  let faces: Vec<_> = (0..8)
    .map(|i| {
      let z = i as f32 * 2.0;
      face_from_vertices(Vec3::new(0.0, 0.0, z), Vec3::new(1.0, 0.0, z), Vec3::new(0.0, 1.0, z))
    })
    .collect();
  Arc::new(ClosestTriangleQuery::new(&faces))
}

#[test]
fn test_cancel_token() {
  let token = CancelToken::new();
  let shared = token.clone();
  assert!(!shared.is_cancelled());

  token.cancel();
  assert!(shared.is_cancelled());
}

#[test]
fn test_start_and_poll() {
  let mut query = AsyncQuery::new();
  assert!(!query.is_busy());
  assert!(query.poll().is_none());

  assert!(query.start(|_| Some(21 * 2)));
  assert_eq!(wait_for(&mut query), Some(42));
  assert!(!query.is_busy());
}

#[test]
fn test_start_while_busy_is_rejected() {
  let release = Arc::new(AtomicBool::new(false));
  let mut query = AsyncQuery::new();

  let gate = release.clone();
  assert!(query.start(move |_| {
    while !gate.load(Ordering::Relaxed) {
      std::thread::yield_now();
    }
    Some(1)
  }));
  assert!(!query.start(|_| Some(2)));

  release.store(true, Ordering::Relaxed);
  assert_eq!(wait_for(&mut query), Some(1));
}

#[test]
fn test_cancel_trips_token_and_frees_slot() {
  let observed = Arc::new(AtomicBool::new(false));
  let mut query: AsyncQuery<u32> = AsyncQuery::new();

  let seen = observed.clone();
  query.start(move |token| {
    while !token.is_cancelled() {
      std::thread::yield_now();
    }
    seen.store(true, Ordering::Relaxed);
    None
  });

  query.cancel();
  assert!(!query.is_busy());
  assert!(query.poll().is_none());

  for _ in 0..5000 {
    if observed.load(Ordering::Relaxed) {
      break;
    }
    std::thread::sleep(Duration::from_millis(1));
  }
  assert!(observed.load(Ordering::Relaxed));

  // Slot is reusable with a fresh token
  assert!(query.start(|token| (!token.is_cancelled()).then_some(7)));
  assert_eq!(wait_for(&mut query), Some(7));
}

#[test]
fn test_job_giving_up_yields_no_result() {
  let mut query: AsyncQuery<u32> = AsyncQuery::new();
  query.start(|_| None);
  assert_eq!(wait_for(&mut query), None);
  assert!(!query.is_busy());
}

#[test]
fn test_start_closest_matches_sync_batch() {
  let query = layered_query();
  let points: Vec<Vec3> = (0..64).map(|i| Vec3::new(0.2, 0.2, i as f32 * 0.25)).collect();
  let expected = query.closest_batch(&points);

  let mut picking = AsyncQuery::new();
  assert!(picking.start_closest(query, points));
  assert_eq!(wait_for(&mut picking), Some(expected));
}

#[test]
fn test_cancelled_batch_returns_none() {
  let query = layered_query();
  let token = CancelToken::new();
  token.cancel();

  let points = [Vec3::ZERO, Vec3::ONE];
  assert_eq!(closest_batch_cancellable(&query, &points, &token), None);
  assert_eq!(
    closest_batch_cancellable(&query, &points, &CancelToken::new()),
    Some(query.closest_batch(&points))
  );
}
