//! Spaced-repetition state carried by every flashcard.
//!
//! Fields are private: a state is either fresh ([`SchedulingState::new`]),
//! rebuilt from storage ([`SchedulingState::restore`]), or produced by the
//! scheduler. `status` is always re-derived, never taken from a caller.

use super::StudyRecord;
use crate::error::SchedulerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Consecutive passes after which a card counts as graduated.
pub const GRADUATION_REPETITIONS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Graduated,
}

impl CardStatus {
    /// Status after an update, from the new repetition count and whether the
    /// card had any history before that update.
    pub fn derive(repetitions: u32, history_was_empty: bool) -> Self {
        match repetitions {
            0 if history_was_empty => CardStatus::New,
            0 => CardStatus::Learning,
            1..=GRADUATION_REPETITIONS => CardStatus::Review,
            _ => CardStatus::Graduated,
        }
    }

    /// Status of a stored state, where `history_len` already includes the
    /// most recent review.
    pub fn for_history(repetitions: u32, history_len: usize) -> Self {
        Self::derive(repetitions, history_len <= 1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::New => "new",
            CardStatus::Learning => "learning",
            CardStatus::Review => "review",
            CardStatus::Graduated => "graduated",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(CardStatus::New),
            "learning" => Ok(CardStatus::Learning),
            "review" => Ok(CardStatus::Review),
            "graduated" => Ok(CardStatus::Graduated),
            other => Err(SchedulerError::InvalidState(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchedulingState {
    ease_factor: f64,
    interval: u32,
    repetitions: u32,
    next_review_date: DateTime<Utc>,
    status: CardStatus,
    study_history: Vec<StudyRecord>,
    last_reviewed: Option<DateTime<Utc>>,
}

impl SchedulingState {
    /// State of a freshly created card: due immediately.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review_date: created_at,
            status: CardStatus::New,
            study_history: Vec::new(),
            last_reviewed: None,
        }
    }

    /// Rebuilds a state loaded from storage, rejecting corrupted values.
    pub fn restore(
        ease_factor: f64,
        interval: u32,
        repetitions: u32,
        next_review_date: DateTime<Utc>,
        study_history: Vec<StudyRecord>,
        last_reviewed: Option<DateTime<Utc>>,
    ) -> Result<Self, SchedulerError> {
        let status = CardStatus::for_history(repetitions, study_history.len());
        let state = Self {
            ease_factor,
            interval,
            repetitions,
            next_review_date,
            status,
            study_history,
            last_reviewed,
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks the invariants every stored or computed state must satisfy.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if !self.ease_factor.is_finite() || self.ease_factor < MIN_EASE_FACTOR {
            return Err(SchedulerError::InvalidState(format!(
                "ease factor {} is below {MIN_EASE_FACTOR}",
                self.ease_factor
            )));
        }
        if self.repetitions > 0 && self.interval == 0 {
            return Err(SchedulerError::InvalidState(format!(
                "interval is 0 with {} repetitions",
                self.repetitions
            )));
        }
        if self.interval == 0 && !self.study_history.is_empty() {
            return Err(SchedulerError::InvalidState(format!(
                "interval is 0 after {} review(s)",
                self.study_history.len()
            )));
        }
        if self.study_history.len() < self.repetitions as usize {
            return Err(SchedulerError::InvalidState(format!(
                "{} repetitions recorded but only {} reviews in history",
                self.repetitions,
                self.study_history.len()
            )));
        }
        Ok(())
    }

    /// Assembles the result of a scheduling update.
    pub(crate) fn updated(
        previous: &SchedulingState,
        ease_factor: f64,
        interval: u32,
        repetitions: u32,
        next_review_date: DateTime<Utc>,
        record: StudyRecord,
    ) -> Self {
        let status = CardStatus::derive(repetitions, previous.study_history.is_empty());
        let last_reviewed = Some(record.date);
        let mut study_history = previous.study_history.clone();
        study_history.push(record);

        Self {
            ease_factor,
            interval,
            repetitions,
            next_review_date,
            status,
            study_history,
            last_reviewed,
        }
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn next_review_date(&self) -> DateTime<Utc> {
        self.next_review_date
    }

    pub fn status(&self) -> CardStatus {
        self.status
    }

    pub fn study_history(&self) -> &[StudyRecord] {
        &self.study_history
    }

    pub fn last_reviewed(&self) -> Option<DateTime<Utc>> {
        self.last_reviewed
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}
