//! Handler for `GET /learners/:learner_id/queue`.
//!
//! Returns the learner's due, upcoming and unscheduled records. `due` and
//! `upcoming` are capped (`?due_limit=`, `?upcoming_limit=`, falling back to
//! the configured defaults); `summary` always counts the full queue.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use recall_core::{
  clock::Clock,
  queue::{QueueLimits, QueueSummary, ReviewQueue},
  store::ReviewStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct QueueParams {
  pub due_limit:      Option<usize>,
  pub upcoming_limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QueueResponse {
  pub summary: QueueSummary,
  #[serde(flatten)]
  pub queue:   ReviewQueue,
}

/// `GET /learners/:learner_id/queue[?due_limit=N][&upcoming_limit=N]`
pub async fn handler<S, C>(
  State(state): State<ApiState<S, C>>,
  Path(learner_id): Path<Uuid>,
  Query(params): Query<QueueParams>,
) -> Result<Json<QueueResponse>, ApiError>
where
  S: ReviewStore,
  C: Clock,
{
  let limits = QueueLimits {
    due:      params.due_limit.unwrap_or(state.limits.due),
    upcoming: params.upcoming_limit.unwrap_or(state.limits.upcoming),
  };

  let queue = state.scheduler.queue(learner_id).await?;
  Ok(Json(QueueResponse {
    summary: queue.summary(),
    queue:   queue.limit(limits),
  }))
}
