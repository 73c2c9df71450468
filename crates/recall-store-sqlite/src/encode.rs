//! Encoding and decoding helpers between [`ReviewRecord`] and the plain
//! column values stored in SQLite.
//!
//! Timestamps are stored as Unix microseconds. An `i64` of microseconds spans
//! every instant chrono can represent, so far-future due dates survive a round
//! trip and column order is chronological. UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use recall_core::record::ReviewRecord;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Sub-microsecond precision is truncated.
pub fn encode_dt(dt: DateTime<Utc>) -> i64 { dt.timestamp_micros() }

pub fn decode_dt(micros: i64) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_micros(micros)
    .ok_or_else(|| Error::DateParse(format!("timestamp out of range: {micros}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawRecord::from_row`].
pub const RECORD_COLUMNS: &str =
  "learner_id, item_id, ease_factor, interval_days, review_count, next_review_at";

/// Values read directly from a `review_records` row.
pub struct RawRecord {
  pub learner_id:     String,
  pub item_id:        String,
  pub ease_factor:    f64,
  pub interval_days:  u32,
  pub review_count:   u32,
  pub next_review_at: Option<i64>,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      learner_id:     row.get(0)?,
      item_id:        row.get(1)?,
      ease_factor:    row.get(2)?,
      interval_days:  row.get(3)?,
      review_count:   row.get(4)?,
      next_review_at: row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<ReviewRecord> {
    Ok(ReviewRecord {
      learner_id:     decode_uuid(&self.learner_id)?,
      item_id:        decode_uuid(&self.item_id)?,
      ease_factor:    self.ease_factor,
      interval_days:  self.interval_days,
      review_count:   self.review_count,
      next_review_at: self.next_review_at.map(decode_dt).transpose()?,
    })
  }
}
