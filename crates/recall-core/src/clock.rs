//! Injected time source.
//!
//! The scheduler never reads the system clock directly; it asks a [`Clock`].
//! Tests supply a [`FixedClock`] so due dates are deterministic.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
  at: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
  pub fn new(at: DateTime<Utc>) -> Self {
    Self { at: Arc::new(Mutex::new(at)) }
  }

  pub fn set(&self, at: DateTime<Utc>) {
    *self.at.lock().unwrap_or_else(PoisonError::into_inner) = at;
  }

  pub fn advance(&self, by: Duration) {
    let mut at = self.at.lock().unwrap_or_else(PoisonError::into_inner);
    *at += by;
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    *self.at.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
  fn now(&self) -> DateTime<Utc> { (**self).now() }
}
