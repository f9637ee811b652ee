//! Wrapper for stored cards that tracks progress within one study session.
use super::{Quality, StoredCard};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub struct LearningCard {
    pub card: StoredCard,
    pub is_learned: bool,
    pub last_quality: Option<Quality>,
    pub last_graded_at: Option<DateTime<Utc>>,
}

impl LearningCard {
    pub fn new(card: StoredCard) -> Self {
        Self {
            card,
            is_learned: false,
            last_quality: None,
            last_graded_at: None,
        }
    }

    /// Records a grade; only a passing grade counts as learned.
    pub fn record_grade(&mut self, quality: Quality, at: DateTime<Utc>) {
        self.is_learned = quality.is_pass();
        self.last_quality = Some(quality);
        self.last_graded_at = Some(at);
    }
}
