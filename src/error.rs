//! Error types for scheduling and persistence.

use thiserror::Error;

/// Rejections raised by the scheduler before any state is computed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("invalid quality rating: {0}")]
    InvalidQuality(String),

    #[error("invalid scheduling state: {0}")]
    InvalidState(String),
}

/// Failures of the SQLite store, JSON import/export and the study service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("flashcard {0} not found")]
    NotFound(i64),

    #[error("deck '{0}' does not exist")]
    UnknownDeck(String),

    #[error("flashcard {flashcard_id} was modified concurrently (expected version {expected})")]
    Conflict { flashcard_id: i64, expected: i64 },

    #[error("corrupted record: {0}")]
    Corrupted(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
