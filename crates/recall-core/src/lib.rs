//! Core types and scheduling logic for the Recall review scheduler.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! interval engine and queue partitioner are pure functions; the only side
//! effects live in [`scheduler::Scheduler`], which talks to storage through
//! the [`store::ReviewStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod error;
pub mod interval;
pub mod quality;
pub mod queue;
pub mod record;
pub mod scheduler;
pub mod store;

pub use error::{Error, Result};
