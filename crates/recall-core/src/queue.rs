//! Queue partitioner — splits a learner's records into due, upcoming and
//! unscheduled views.
//!
//! Partitioning is a read-side projection over a snapshot the caller already
//! loaded. It performs no I/O and never changes a record, however overdue.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::ReviewRecord;

/// A learner's review records, partitioned at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewQueue {
  /// Scheduled at or before `now`, oldest first.
  pub due:         Vec<ReviewRecord>,
  /// Scheduled after `now`, soonest first.
  pub upcoming:    Vec<ReviewRecord>,
  /// Solved but never reviewed, in snapshot order.
  pub unscheduled: Vec<ReviewRecord>,
}

/// Counts of each partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
  pub due:         usize,
  pub upcoming:    usize,
  pub unscheduled: usize,
}

/// Display caps a caller may apply to a [`ReviewQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueLimits {
  pub due:      usize,
  pub upcoming: usize,
}

impl Default for QueueLimits {
  fn default() -> Self { Self { due: 20, upcoming: 5 } }
}

/// Partition `records` relative to `now`.
pub fn partition<'a, I>(records: I, now: DateTime<Utc>) -> ReviewQueue
where
  I: IntoIterator<Item = &'a ReviewRecord>,
{
  let mut queue = ReviewQueue::default();

  for record in records {
    let bucket = if record.is_due(now) {
      &mut queue.due
    } else if record.is_scheduled() {
      &mut queue.upcoming
    } else {
      &mut queue.unscheduled
    };
    bucket.push(record.clone());
  }

  // Ties break on item id so the order never depends on the snapshot's.
  let by_due_date = |a: &ReviewRecord, b: &ReviewRecord| {
    (a.next_review_at, a.item_id).cmp(&(b.next_review_at, b.item_id))
  };
  queue.due.sort_by(by_due_date);
  queue.upcoming.sort_by(by_due_date);

  queue
}

impl ReviewQueue {
  pub fn summary(&self) -> QueueSummary {
    QueueSummary {
      due:         self.due.len(),
      upcoming:    self.upcoming.len(),
      unscheduled: self.unscheduled.len(),
    }
  }

  /// A copy with `due` and `upcoming` truncated to `limits`. Unscheduled
  /// records are left whole.
  pub fn limit(&self, limits: QueueLimits) -> Self {
    Self {
      due:         self.due.iter().take(limits.due).cloned().collect(),
      upcoming:    self.upcoming.iter().take(limits.upcoming).cloned().collect(),
      unscheduled: self.unscheduled.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};
  use uuid::Uuid;

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
  }

  fn at(next: Option<DateTime<Utc>>) -> ReviewRecord {
    let mut record = ReviewRecord::new(Uuid::nil(), Uuid::new_v4());
    if let Some(next) = next {
      record.interval_days = 1;
      record.review_count = 1;
      record.next_review_at = Some(next);
    }
    record
  }

  fn ids(records: &[ReviewRecord]) -> Vec<Uuid> {
    records.iter().map(|r| r.item_id).collect()
  }

  #[test]
  fn splits_by_due_date() {
    let overdue = at(Some(now() - Duration::days(1)));
    let exactly_now = at(Some(now()));
    let tomorrow = at(Some(now() + Duration::days(1)));
    let never = at(None);

    let snapshot = vec![tomorrow.clone(), never.clone(), exactly_now.clone(), overdue.clone()];
    let queue = partition(&snapshot, now());

    assert_eq!(ids(&queue.due), vec![overdue.item_id, exactly_now.item_id]);
    assert_eq!(ids(&queue.upcoming), vec![tomorrow.item_id]);
    assert_eq!(ids(&queue.unscheduled), vec![never.item_id]);
  }

  #[test]
  fn upcoming_is_soonest_first() {
    let later = at(Some(now() + Duration::days(9)));
    let sooner = at(Some(now() + Duration::hours(2)));
    let queue = partition(&[later.clone(), sooner.clone()], now());
    assert_eq!(ids(&queue.upcoming), vec![sooner.item_id, later.item_id]);
  }

  #[test]
  fn equal_due_dates_order_by_item_id() {
    let when = Some(now() - Duration::hours(1));
    let mut a = at(when);
    let mut b = at(when);
    a.item_id = Uuid::from_u128(1);
    b.item_id = Uuid::from_u128(2);

    let forward = partition(&[a.clone(), b.clone()], now());
    let backward = partition(&[b, a], now());
    assert_eq!(forward, backward);
    assert_eq!(forward.due[0].item_id, Uuid::from_u128(1));
  }

  #[test]
  fn partition_is_idempotent_and_does_not_reschedule() {
    let long_overdue = at(Some(now() - Duration::days(365)));
    let snapshot = vec![long_overdue.clone(), at(None), at(Some(now() + Duration::days(3)))];

    let first = partition(&snapshot, now());
    let second = partition(&snapshot, now());
    assert_eq!(first, second);
    assert_eq!(first.due[0], long_overdue);
    assert_eq!(snapshot[0], long_overdue);
  }

  #[test]
  fn empty_snapshot() {
    let queue = partition(std::iter::empty(), now());
    assert_eq!(queue.summary(), QueueSummary::default());
  }

  #[test]
  fn limit_truncates_due_and_upcoming_only() {
    let snapshot: Vec<_> = (1..=6)
      .map(|d| at(Some(now() - Duration::days(d))))
      .chain((1..=6).map(|d| at(Some(now() + Duration::days(d)))))
      .chain([at(None), at(None)])
      .collect();
    let queue = partition(&snapshot, now());
    let limited = queue.limit(QueueLimits { due: 4, upcoming: 2 });

    assert_eq!(queue.summary(), QueueSummary { due: 6, upcoming: 6, unscheduled: 2 });
    assert_eq!(limited.summary(), QueueSummary { due: 4, upcoming: 2, unscheduled: 2 });
    assert_eq!(limited.due[..], queue.due[..4]);
    assert_eq!(limited.upcoming[..], queue.upcoming[..2]);
  }
}
