//! Scheduler service — the orchestrator that loads, advances and persists
//! review records.
//!
//! This is the only part of the crate with side effects. Each operation
//! touches at most one record for writes; a failed write leaves the stored
//! record exactly as it was.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  clock::Clock,
  interval::{ProjectedReview, advance, preview},
  quality::{Quality, ReviewAction, classify},
  queue::{ReviewQueue, partition},
  record::ReviewRecord,
  store::{ReviewStore, SaveOutcome},
};

/// What a submitted review did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
  /// The record as persisted.
  pub record:            ReviewRecord,
  pub quality:           Quality,
  /// Days until the item comes back, for "see this again in N days".
  pub new_interval_days: u32,
}

/// Drives review records through the interval engine on behalf of learners.
#[derive(Debug, Clone)]
pub struct Scheduler<S, C> {
  store: S,
  clock: C,
}

impl<S, C> Scheduler<S, C>
where
  S: ReviewStore,
  C: Clock,
{
  pub fn new(store: S, clock: C) -> Self { Self { store, clock } }

  pub fn store(&self) -> &S { &self.store }

  pub fn clock(&self) -> &C { &self.clock }

  /// Enter an item into the learner's record set after it is first solved.
  /// Solving it again returns the existing record unchanged.
  #[tracing::instrument(skip(self))]
  pub async fn mark_solved(
    &self,
    learner_id: Uuid,
    item_id: Uuid,
  ) -> Result<ReviewRecord> {
    let fresh = ReviewRecord::new(learner_id, item_id);
    let stored = self
      .store
      .insert_if_absent(&fresh)
      .await
      .map_err(Error::persistence)?;
    debug!(review_count = stored.review_count, "item marked solved");
    Ok(stored)
  }

  /// Fetch the record for a pair.
  pub async fn record(&self, learner_id: Uuid, item_id: Uuid) -> Result<ReviewRecord> {
    self
      .store
      .load(learner_id, item_id)
      .await
      .map_err(Error::persistence)?
      .ok_or(Error::RecordNotFound { learner_id, item_id })
  }

  /// Apply a learner's feedback to one record and persist the result.
  #[tracing::instrument(skip(self))]
  pub async fn submit_review(
    &self,
    learner_id: Uuid,
    item_id: Uuid,
    action: ReviewAction,
  ) -> Result<ReviewOutcome> {
    let current = self.record(learner_id, item_id).await?;
    let quality = classify(action);
    let next = advance(&current, quality, self.clock.now());

    let outcome = self
      .store
      .save(&next, current.review_count)
      .await
      .map_err(|e| {
        warn!(error = %e, "failed to persist review");
        Error::persistence(e)
      })?;

    if outcome == SaveOutcome::Stale {
      warn!(expected = current.review_count, "review lost a concurrent update");
      return Err(Error::Conflict { learner_id, item_id });
    }

    info!(
      quality = quality.value(),
      interval_days = next.interval_days,
      review_count = next.review_count,
      "review recorded"
    );

    Ok(ReviewOutcome {
      new_interval_days: next.interval_days,
      quality,
      record: next,
    })
  }

  /// Partition all of a learner's records at the current instant.
  #[tracing::instrument(skip(self))]
  pub async fn queue(&self, learner_id: Uuid) -> Result<ReviewQueue> {
    let records = self
      .store
      .list_for_learner(learner_id)
      .await
      .map_err(Error::persistence)?;
    let queue = partition(&records, self.clock.now());
    let summary = queue.summary();
    debug!(
      due = summary.due,
      upcoming = summary.upcoming,
      unscheduled = summary.unscheduled,
      "queue partitioned"
    );
    Ok(queue)
  }

  /// What each possible action would do to a record, without applying any.
  pub async fn preview(
    &self,
    learner_id: Uuid,
    item_id: Uuid,
  ) -> Result<Vec<ProjectedReview>> {
    let current = self.record(learner_id, item_id).await?;
    Ok(preview(&current, self.clock.now()))
  }
}
