//! Interval engine — an adapted SM-2 transition over [`ReviewRecord`].
//!
//! [`advance`] is a pure function of `(record, quality, now)`. It never fails
//! for in-domain input; out-of-domain input (an ease factor below the floor)
//! is a programming error and trips a debug assertion.

use chrono::{DateTime, Days, Utc};
use serde::Serialize;
use strum::IntoEnumIterator as _;

use crate::{
  quality::{MAX_QUALITY, Quality, ReviewAction, classify},
  record::{MIN_EASE_FACTOR, ReviewRecord},
};

/// Interval after the first successful review.
pub const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second successful review.
pub const SECOND_INTERVAL_DAYS: u32 = 3;

/// Interval every failed recall collapses to.
pub const RELEARN_INTERVAL_DAYS: u32 = 1;

/// Flat ease penalty for a failed recall.
pub const FAILURE_EASE_PENALTY: f64 = 0.2;

// ─── Transition ──────────────────────────────────────────────────────────────

/// Compute the state that follows a review of `record` with `quality`,
/// performed at `now`.
pub fn advance(
  record: &ReviewRecord,
  quality: Quality,
  now: DateTime<Utc>,
) -> ReviewRecord {
  let next = step(record, quality, now);

  ReviewRecord {
    learner_id: record.learner_id,
    item_id: record.item_id,
    ease_factor: next.ease_factor,
    interval_days: next.interval_days,
    review_count: record.review_count.saturating_add(1),
    next_review_at: Some(next.next_review_at),
  }
}

/// The scheduling fields one review produces.
struct Step {
  ease_factor:    f64,
  interval_days:  u32,
  next_review_at: DateTime<Utc>,
}

fn step(record: &ReviewRecord, quality: Quality, now: DateTime<Utc>) -> Step {
  debug_assert!(
    record.ease_factor >= MIN_EASE_FACTOR,
    "ease factor {} below floor",
    record.ease_factor
  );

  let (interval_days, ease_factor) = if quality.is_successful_recall() {
    (success_interval(record), success_ease(record.ease_factor, quality))
  } else {
    (
      RELEARN_INTERVAL_DAYS,
      (record.ease_factor - FAILURE_EASE_PENALTY).max(MIN_EASE_FACTOR),
    )
  };

  Step {
    ease_factor,
    interval_days,
    next_review_at: due_after(now, interval_days),
  }
}

fn success_interval(record: &ReviewRecord) -> u32 {
  match record.review_count {
    0 => FIRST_INTERVAL_DAYS,
    1 => SECOND_INTERVAL_DAYS,
    // Float-to-int casts saturate, so an enormous product clamps to u32::MAX.
    _ => (f64::from(record.interval_days) * record.ease_factor)
      .round()
      .max(1.0) as u32,
  }
}

fn success_ease(ease_factor: f64, quality: Quality) -> f64 {
  let miss = f64::from(MAX_QUALITY - quality.value());
  (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

/// `now` plus `days` calendar days, saturating at the latest instant chrono
/// can represent.
fn due_after(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
  now
    .checked_add_days(Days::new(u64::from(days)))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ─── Preview ─────────────────────────────────────────────────────────────────

/// What submitting one particular action would do to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedReview {
  pub action:         ReviewAction,
  pub quality:        Quality,
  pub interval_days:  u32,
  pub next_review_at: DateTime<Utc>,
}

/// Project every possible action against `record` without committing any.
pub fn preview(record: &ReviewRecord, now: DateTime<Utc>) -> Vec<ProjectedReview> {
  ReviewAction::iter()
    .map(|action| {
      let quality = classify(action);
      let next = step(record, quality, now);
      ProjectedReview {
        action,
        quality,
        interval_days: next.interval_days,
        next_review_at: next.next_review_at,
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use uuid::Uuid;

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 18, 30, 0).unwrap()
  }

  fn record(ease_factor: f64, interval_days: u32, review_count: u32) -> ReviewRecord {
    ReviewRecord {
      ease_factor,
      interval_days,
      review_count,
      next_review_at: Some(now()),
      ..ReviewRecord::new(Uuid::new_v4(), Uuid::new_v4())
    }
  }

  fn q(value: u8) -> Quality { Quality::new(value).unwrap() }

  fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

  #[test]
  fn first_success_schedules_one_day() {
    let fresh = ReviewRecord::new(Uuid::new_v4(), Uuid::new_v4());
    let next = advance(&fresh, q(5), now());
    assert_eq!(next.interval_days, 1);
    assert_eq!(next.review_count, 1);
    assert!(approx(next.ease_factor, 2.6));
    assert_eq!(next.next_review_at, Some(now() + chrono::Duration::days(1)));
  }

  #[test]
  fn second_success_schedules_three_days_regardless_of_prior_interval() {
    for prior in [0, 1, 7, 400] {
      let next = advance(&record(2.5, prior, 1), q(5), now());
      assert_eq!(next.interval_days, 3, "prior interval {prior}");
    }
  }

  #[test]
  fn later_successes_multiply_by_current_ease() {
    // 3 * 2.5 = 7.5 rounds half-up to 8.
    let next = advance(&record(2.5, 3, 2), q(5), now());
    assert_eq!(next.interval_days, 8);

    // 10 * 1.3 = 13
    let next = advance(&record(1.3, 10, 5), q(3), now());
    assert_eq!(next.interval_days, 13);
  }

  #[test]
  fn ease_formula_per_quality() {
    assert!(approx(advance(&record(2.5, 3, 2), q(5), now()).ease_factor, 2.6));
    assert!(approx(advance(&record(2.5, 3, 2), q(4), now()).ease_factor, 2.5));
    assert!(approx(advance(&record(2.5, 3, 2), q(3), now()).ease_factor, 2.36));
  }

  #[test]
  fn ease_has_a_floor_but_no_ceiling() {
    let hard = advance(&record(1.35, 3, 2), q(3), now());
    assert!(approx(hard.ease_factor, MIN_EASE_FACTOR));

    let easy = advance(&record(4.0, 3, 2), q(5), now());
    assert!(approx(easy.ease_factor, 4.1));
  }

  #[test]
  fn failure_resets_interval_and_applies_flat_penalty() {
    for (ease, interval, count) in [(2.5, 0, 0), (2.8, 400, 12), (1.4, 30, 3), (1.3, 2, 1)] {
      let next = advance(&record(ease, interval, count), q(2), now());
      assert_eq!(next.interval_days, 1);
      assert!(approx(next.ease_factor, (ease - 0.2).max(MIN_EASE_FACTOR)));
      assert_eq!(next.review_count, count + 1);
    }
  }

  #[test]
  fn failure_uses_penalty_not_formula() {
    // The SM-2 formula at quality 0 would subtract 0.8.
    let next = advance(&record(2.5, 10, 4), q(0), now());
    assert!(approx(next.ease_factor, 2.3));
  }

  #[test]
  fn review_count_keeps_counting_through_failures() {
    let mut r = ReviewRecord::new(Uuid::new_v4(), Uuid::new_v4());
    r = advance(&r, q(2), now());
    assert_eq!((r.review_count, r.interval_days), (1, 1));

    // Count is now 1, so a success takes the second-step interval.
    r = advance(&r, q(5), now());
    assert_eq!((r.review_count, r.interval_days), (2, 3));
  }

  #[test]
  fn calendar_day_arithmetic_keeps_time_of_day() {
    let next = advance(&record(2.5, 3, 2), q(5), now());
    let due = next.next_review_at.unwrap();
    assert_eq!(due, Utc.with_ymd_and_hms(2024, 5, 18, 18, 30, 0).unwrap());
  }

  #[test]
  fn huge_intervals_saturate_instead_of_overflowing() {
    let next = advance(&record(3.0, u32::MAX, 40), q(5), now());
    assert_eq!(next.interval_days, u32::MAX);
    assert!(next.next_review_at.unwrap() > now());
  }

  #[test]
  fn invariants_hold_over_long_action_sequences() {
    let pattern = [5, 3, 2, 5, 5, 2, 2, 3, 5, 0, 5, 4];
    let mut r = ReviewRecord::new(Uuid::new_v4(), Uuid::new_v4());
    let mut t = now();

    for (i, value) in pattern.iter().cycle().take(60).enumerate() {
      let next = advance(&r, q(*value), t);
      assert!(next.ease_factor >= MIN_EASE_FACTOR);
      assert!(next.interval_days >= 1);
      assert_eq!(next.review_count, r.review_count + 1);
      assert!(next.next_review_at.unwrap() > t, "step {i}");
      t = next.next_review_at.unwrap();
      r = next;
    }
  }

  #[test]
  fn advance_is_deterministic() {
    let r = record(2.2, 9, 4);
    assert_eq!(advance(&r, q(3), now()), advance(&r, q(3), now()));
  }

  #[test]
  fn preview_covers_every_action_without_touching_the_record() {
    let r = record(2.5, 3, 2);
    let before = r.clone();
    let projected = preview(&r, now());

    assert_eq!(r, before);
    let intervals: Vec<_> = projected
      .iter()
      .map(|p| (p.action, p.interval_days))
      .collect();
    assert_eq!(
      intervals,
      vec![
        (ReviewAction::Forgot, 1),
        (ReviewAction::Hard, 8),
        (ReviewAction::Easy, 8),
      ]
    );
  }

  #[test]
  fn preview_matches_advance_for_every_action() {
    for r in [record(2.5, 0, 0), record(1.9, 12, 4), record(3.0, u32::MAX, 40)] {
      for projected in preview(&r, now()) {
        let next = advance(&r, projected.quality, now());
        assert_eq!(projected.interval_days, next.interval_days, "{}", projected.action);
        assert_eq!(Some(projected.next_review_at), next.next_review_at, "{}", projected.action);
      }
    }
  }
}
