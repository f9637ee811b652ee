//! Study session over a deck's due cards.
//! Handles multi-round review with every grade scheduled and persisted.

use super::quality::IntoQuality;
use super::{CardStatus, LearningCard, StoredCard};
use crate::error::StoreResult;
use crate::service;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// Manages a study session with multiple review rounds.
/// Cards that aren't passed (grade < 3) are repeated in subsequent rounds.
pub struct LearningSession {
    pub deck_name: String,
    pub all_cards: Vec<LearningCard>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_back: bool,
    pub conn: Arc<Mutex<Connection>>,
    pub round_number: usize,
}

impl LearningSession {
    /// Starts a session with every card of `deck_name` due at `now`.
    pub fn start(
        deck_name: &str,
        conn: Arc<Mutex<Connection>>,
        now: DateTime<Utc>,
    ) -> StoreResult<Self> {
        let cards = {
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            service::due_cards(Some(deck_name), now, &guard)?
        };
        Ok(Self::new_from_due_cards(deck_name.to_string(), cards, conn))
    }

    /// Creates a session from cards already known to be due.
    pub fn new_from_due_cards(
        deck_name: String,
        cards: Vec<StoredCard>,
        conn: Arc<Mutex<Connection>>,
    ) -> Self {
        let all_cards: Vec<LearningCard> = cards.into_iter().map(LearningCard::new).collect();
        let indices: Vec<usize> = (0..all_cards.len()).collect();

        Self {
            deck_name,
            all_cards,
            current_round_cards: indices,
            current_index: 0,
            show_back: false,
            conn,
            round_number: 1,
        }
    }

    pub fn current_card(&self) -> Option<&LearningCard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx))
    }

    pub fn toggle_back(&mut self) {
        self.show_back = !self.show_back;
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
            self.show_back = false;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the cards that failed this one.
    /// If none remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| !card.is_learned)
                    .unwrap_or(false)
            })
            .collect();

        if failed.is_empty() {
            return;
        }

        self.current_round_cards = failed;
        self.current_index = 0;
        self.show_back = false;
        self.round_number += 1;
        debug!(
            "Deck '{}' round {}: {} card(s) to retry",
            self.deck_name,
            self.round_number,
            self.current_round_cards.len()
        );
    }

    /// Grades the current card, schedules it and persists the result.
    ///
    /// Errors from validation or the store are returned and the in-memory
    /// card is left as it was.
    pub fn grade_current_card(
        &mut self,
        quality: impl IntoQuality,
        time_spent_ms: u64,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<CardStatus>> {
        let quality = quality.into_quality()?;
        let Some(&idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(None);
        };
        let Some(learning_card) = self.all_cards.get_mut(idx) else {
            return Ok(None);
        };

        let updated = {
            let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
            service::review_flashcard(learning_card.card.id, quality, time_spent_ms, now, &conn)?
        };

        let status = updated.scheduling.status();
        learning_card.card = updated;
        learning_card.record_grade(quality, now);
        Ok(Some(status))
    }

    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| card.is_learned)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// True when the current round is empty or every card in it passed.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
