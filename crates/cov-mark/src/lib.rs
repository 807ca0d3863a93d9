//! Coverage markers, so tests can check a particular path in the code was taken.
//!
//! Markers are per thread, and each test runs on its own thread.

use fast_hash::FxHashMap;
use std::cell::RefCell;

thread_local! {
  static HITS: RefCell<FxHashMap<&'static str, usize>> = RefCell::new(FxHashMap::default());
}

/// Hit the named marker.
///
/// This no-ops when `debug_assertions` is off.
pub fn hit(s: &'static str) {
  if cfg!(debug_assertions) {
    HITS.with(|m| *m.borrow_mut().entry(s).or_default() += 1);
  }
}

/// Returns how many times the marker was hit on this thread.
#[must_use]
pub fn count(s: &'static str) -> usize {
  HITS.with(|m| m.borrow().get(s).copied().unwrap_or_default())
}

/// Checks if the marker was previously hit.
///
/// This no-ops when `debug_assertions` is off.
///
/// # Panics
///
/// If the marker was not previously hit.
pub fn check(s: &'static str) {
  if cfg!(debug_assertions) {
    assert!(count(s) != 0, "{s} not hit");
  }
}

/// Checks the marker was never hit.
///
/// This no-ops when `debug_assertions` is off.
///
/// # Panics
///
/// If the marker was previously hit.
pub fn check_not(s: &'static str) {
  if cfg!(debug_assertions) {
    assert!(count(s) == 0, "{s} hit");
  }
}
