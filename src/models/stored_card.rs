//! A flashcard as held by the store, together with its scheduling state.
use super::{Flashcard, SchedulingState};
use super::due::Schedulable;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct StoredCard {
    pub id: i64,
    pub deck_name: String,
    pub flashcard: Flashcard,
    pub created_at: DateTime<Utc>,
    pub scheduling: SchedulingState,
    /// Optimistic-concurrency version, bumped on every saved review.
    pub version: i64,
}

impl Schedulable for StoredCard {
    fn next_review_date(&self) -> DateTime<Utc> {
        self.scheduling.next_review_date()
    }
}
