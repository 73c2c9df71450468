//! SQL schema for the Recall SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per (learner, item) the learner has solved.
-- Rows are only ever updated through a compare-and-swap on review_count.
CREATE TABLE IF NOT EXISTS review_records (
    learner_id     TEXT    NOT NULL,
    item_id        TEXT    NOT NULL,
    ease_factor    REAL    NOT NULL CHECK (ease_factor >= 1.3),
    interval_days  INTEGER NOT NULL CHECK (interval_days >= 0),
    review_count   INTEGER NOT NULL CHECK (review_count >= 0),
    next_review_at INTEGER, -- Unix microseconds; NULL until the first review
    PRIMARY KEY (learner_id, item_id),
    CHECK (next_review_at IS NULL OR interval_days >= 1)
);

CREATE INDEX IF NOT EXISTS review_records_due_idx
    ON review_records(learner_id, next_review_at);

PRAGMA user_version = 1;
";
