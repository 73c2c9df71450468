//! The review record — scheduling state for one (learner, item) pair.
//!
//! A record is created the first time a learner solves an item and is mutated
//! only by the scheduler, once per submitted review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ease factor assigned to a freshly solved item.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Lowest ease factor a record can reach.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Scheduling state for one practice item of one learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
  pub learner_id:     Uuid,
  pub item_id:        Uuid,
  /// Retention multiplier; never below [`MIN_EASE_FACTOR`].
  pub ease_factor:    f64,
  /// Days until the next review. `0` until the record enters the cycle.
  pub interval_days:  u32,
  /// Completed review cycles, not counting the initial solve.
  pub review_count:   u32,
  /// `None` until the first review is submitted.
  pub next_review_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
  /// The state of an item the learner has just solved for the first time.
  pub fn new(learner_id: Uuid, item_id: Uuid) -> Self {
    Self {
      learner_id,
      item_id,
      ease_factor: INITIAL_EASE_FACTOR,
      interval_days: 0,
      review_count: 0,
      next_review_at: None,
    }
  }

  pub fn is_scheduled(&self) -> bool { self.next_review_at.is_some() }

  /// Whether the record's review time is at or before `now`.
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review_at.is_some_and(|at| at <= now)
  }
}
