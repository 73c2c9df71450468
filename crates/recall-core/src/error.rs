//! Error types for `recall-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The learner has not solved this item, so no review record exists.
  #[error("no review record for learner {learner_id} and item {item_id}")]
  RecordNotFound { learner_id: Uuid, item_id: Uuid },

  #[error("invalid review action: {0:?}")]
  InvalidAction(String),

  /// Another review of the same record was persisted first.
  #[error("review record for learner {learner_id} and item {item_id} changed concurrently")]
  Conflict { learner_id: Uuid, item_id: Uuid },

  #[error("persistence failure: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a storage backend error.
  pub fn persistence<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(err))
  }

  /// Whether the caller may succeed by simply trying again.
  pub fn is_retryable(&self) -> bool {
    matches!(self, Self::Conflict { .. } | Self::Persistence(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
