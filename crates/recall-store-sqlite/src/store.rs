//! [`SqliteStore`] — the SQLite implementation of [`ReviewStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use recall_core::{
  record::ReviewRecord,
  store::{ReviewStore, SaveOutcome},
};

use crate::{
  Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Recall review store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ReviewStore impl ────────────────────────────────────────────────────────

impl ReviewStore for SqliteStore {
  type Error = crate::Error;

  async fn insert_if_absent(&self, record: &ReviewRecord) -> Result<ReviewRecord> {
    let learner_str  = encode_uuid(record.learner_id);
    let item_str     = encode_uuid(record.item_id);
    let ease_factor  = record.ease_factor;
    let interval     = record.interval_days;
    let review_count = record.review_count;
    let next_micros  = record.next_review_at.map(encode_dt);

    let raw: RawRecord = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = tx.execute(
          "INSERT INTO review_records (
             learner_id, item_id, ease_factor, interval_days, review_count, next_review_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT (learner_id, item_id) DO NOTHING",
          rusqlite::params![
            learner_str,
            item_str,
            ease_factor,
            interval,
            review_count,
            next_micros,
          ],
        )?;
        let raw = tx.query_row(
          &format!(
            "SELECT {RECORD_COLUMNS} FROM review_records
             WHERE learner_id = ?1 AND item_id = ?2"
          ),
          rusqlite::params![learner_str, item_str],
          RawRecord::from_row,
        )?;
        tx.commit()?;

        if inserted == 0 {
          tracing::debug!(learner_id = %learner_str, item_id = %item_str, "record already present");
        }
        Ok(raw)
      })
      .await?;

    raw.into_record()
  }

  async fn load(&self, learner_id: Uuid, item_id: Uuid) -> Result<Option<ReviewRecord>> {
    let learner_str = encode_uuid(learner_id);
    let item_str    = encode_uuid(item_id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {RECORD_COLUMNS} FROM review_records
                 WHERE learner_id = ?1 AND item_id = ?2"
              ),
              rusqlite::params![learner_str, item_str],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn save(
    &self,
    record:                &ReviewRecord,
    expected_review_count: u32,
  ) -> Result<SaveOutcome> {
    let learner_str  = encode_uuid(record.learner_id);
    let item_str     = encode_uuid(record.item_id);
    let ease_factor  = record.ease_factor;
    let interval     = record.interval_days;
    let review_count = record.review_count;
    let next_micros  = record.next_review_at.map(encode_dt);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE review_records
              SET ease_factor    = ?3,
                  interval_days  = ?4,
                  review_count   = ?5,
                  next_review_at = ?6
            WHERE learner_id   = ?1
              AND item_id      = ?2
              AND review_count = ?7",
          rusqlite::params![
            learner_str,
            item_str,
            ease_factor,
            interval,
            review_count,
            next_micros,
            expected_review_count,
          ],
        )?)
      })
      .await?;

    Ok(if updated == 0 { SaveOutcome::Stale } else { SaveOutcome::Saved })
  }

  async fn list_for_learner(&self, learner_id: Uuid) -> Result<Vec<ReviewRecord>> {
    let learner_str = encode_uuid(learner_id);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM review_records WHERE learner_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![learner_str], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}
