//! The `ReviewStore` trait — the repository the scheduler persists through.
//!
//! The trait is implemented by storage backends (e.g. `recall-store-sqlite`).
//! The scheduler and the API depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::record::ReviewRecord;

/// Result of a conditional [`ReviewStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
  /// The record was written.
  Saved,
  /// The stored `review_count` no longer matched; nothing was written.
  Stale,
}

/// Abstraction over a review record backend.
///
/// Records are keyed by `(learner_id, item_id)` and are independent of one
/// another, so every method touches at most one record except
/// [`list_for_learner`](Self::list_for_learner), which is a read.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ReviewStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `record` unless a record for the same pair already exists.
  /// Returns whichever record is stored afterwards.
  fn insert_if_absent<'a>(
    &'a self,
    record: &'a ReviewRecord,
  ) -> impl Future<Output = Result<ReviewRecord, Self::Error>> + Send + 'a;

  /// Retrieve the record for a pair. Returns `None` if the learner has not
  /// solved the item.
  fn load(
    &self,
    learner_id: Uuid,
    item_id: Uuid,
  ) -> impl Future<Output = Result<Option<ReviewRecord>, Self::Error>> + Send + '_;

  /// Overwrite the stored record, but only if its `review_count` still equals
  /// `expected_review_count`. This is the compare-and-swap that serialises
  /// concurrent reviews of the same pair.
  fn save<'a>(
    &'a self,
    record: &'a ReviewRecord,
    expected_review_count: u32,
  ) -> impl Future<Output = Result<SaveOutcome, Self::Error>> + Send + 'a;

  /// All records belonging to a learner, in no particular order.
  fn list_for_learner(
    &self,
    learner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ReviewRecord>, Self::Error>> + Send + '_;
}
