//! One entry in a flashcard's study history.
use super::Quality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudyRecord {
    pub date: DateTime<Utc>,
    pub quality: Quality,
    pub time_spent_ms: u64,
}
