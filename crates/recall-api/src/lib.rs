//! JSON REST API for Recall.
//!
//! Exposes an axum [`Router`] backed by a [`Scheduler`] over any
//! [`ReviewStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", recall_api::api_router(scheduler, QueueLimits::default()))
//! ```

pub mod error;
pub mod queue;
pub mod reviews;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use recall_core::{clock::Clock, queue::QueueLimits, scheduler::Scheduler, store::ReviewStore};

pub use error::ApiError;

/// State shared by all handlers.
pub struct ApiState<S, C> {
  pub scheduler: Arc<Scheduler<S, C>>,
  /// Caps applied to queue listings when the request names none.
  pub limits:    QueueLimits,
}

impl<S, C> Clone for ApiState<S, C> {
  fn clone(&self) -> Self {
    Self { scheduler: Arc::clone(&self.scheduler), limits: self.limits }
  }
}

/// Build a fully-materialised API router for `scheduler`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(scheduler: Arc<Scheduler<S, C>>, limits: QueueLimits) -> Router<()>
where
  S: ReviewStore + 'static,
  C: Clock + 'static,
{
  Router::new()
    // Items
    .route(
      "/learners/{learner_id}/items/{item_id}",
      get(reviews::get_one::<S, C>),
    )
    .route(
      "/learners/{learner_id}/items/{item_id}/solve",
      post(reviews::solve::<S, C>),
    )
    .route(
      "/learners/{learner_id}/items/{item_id}/reviews",
      post(reviews::submit::<S, C>),
    )
    .route(
      "/learners/{learner_id}/items/{item_id}/preview",
      get(reviews::preview::<S, C>),
    )
    // Queue
    .route("/learners/{learner_id}/queue", get(queue::handler::<S, C>))
    .with_state(ApiState { scheduler, limits })
}
