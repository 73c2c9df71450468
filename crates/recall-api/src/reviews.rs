//! Handlers for per-item endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/learners/:learner_id/items/:item_id/solve` | Creates the record; 201 |
//! | `GET`  | `/learners/:learner_id/items/:item_id` | 404 if never solved |
//! | `POST` | `/learners/:learner_id/items/:item_id/reviews` | Body: `{"action":"easy"}` |
//! | `GET`  | `/learners/:learner_id/items/:item_id/preview` | Interval per action |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use recall_core::{
  clock::Clock,
  interval::ProjectedReview,
  quality::ReviewAction,
  record::ReviewRecord,
  scheduler::ReviewOutcome,
  store::ReviewStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Solve ────────────────────────────────────────────────────────────────────

/// `POST /learners/:learner_id/items/:item_id/solve`
pub async fn solve<S, C>(
  State(state): State<ApiState<S, C>>,
  Path((learner_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ReviewStore,
  C: Clock,
{
  let record = state.scheduler.mark_solved(learner_id, item_id).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /learners/:learner_id/items/:item_id`
pub async fn get_one<S, C>(
  State(state): State<ApiState<S, C>>,
  Path((learner_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ReviewRecord>, ApiError>
where
  S: ReviewStore,
  C: Clock,
{
  Ok(Json(state.scheduler.record(learner_id, item_id).await?))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// JSON body accepted by the review endpoint. The action is kept as text so
/// an unknown value surfaces as an invalid-action error.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  pub action: String,
}

/// `POST /learners/:learner_id/items/:item_id/reviews` — body: `{"action":"hard"}`
///
/// A missing or malformed body is a bad request with the usual JSON error.
pub async fn submit<S, C>(
  State(state): State<ApiState<S, C>>,
  Path((learner_id, item_id)): Path<(Uuid, Uuid)>,
  body: Result<Json<ReviewBody>, JsonRejection>,
) -> Result<Json<ReviewOutcome>, ApiError>
where
  S: ReviewStore,
  C: Clock,
{
  let Json(body) = body?;
  let action = ReviewAction::parse(&body.action)?;
  let outcome = state
    .scheduler
    .submit_review(learner_id, item_id, action)
    .await?;
  Ok(Json(outcome))
}

// ─── Preview ──────────────────────────────────────────────────────────────────

/// `GET /learners/:learner_id/items/:item_id/preview`
pub async fn preview<S, C>(
  State(state): State<ApiState<S, C>>,
  Path((learner_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<ProjectedReview>>, ApiError>
where
  S: ReviewStore,
  C: Clock,
{
  Ok(Json(state.scheduler.preview(learner_id, item_id).await?))
}
