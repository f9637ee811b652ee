//! Study service: validates a review submission, runs the scheduler and
//! persists the result.

use crate::database::db;
use crate::error::{StoreError, StoreResult};
use crate::models::due::select_due_sorted;
use crate::models::quality::IntoQuality;
use crate::models::sm2::compute_next_review;
use crate::models::StoredCard;
use chrono::{DateTime, Utc};
use log::{info, warn};
use rusqlite::Connection;

/// Records one review of a flashcard and returns the card as stored.
///
/// The rating is validated before anything is read from the store, so an
/// invalid submission leaves no trace.
pub fn review_flashcard(
    flashcard_id: i64,
    quality: impl IntoQuality,
    time_spent_ms: u64,
    now: DateTime<Utc>,
    conn: &Connection,
) -> StoreResult<StoredCard> {
    let quality = quality.into_quality().inspect_err(|e| {
        warn!("Rejected review of flashcard {flashcard_id}: {e}");
    })?;

    let card = db::get_flashcard(flashcard_id, conn)?;
    let next = compute_next_review(&card.scheduling, quality, time_spent_ms, now)?;
    let version = db::save_scheduling(flashcard_id, card.version, &next, conn)?;

    info!(
        "Flashcard {flashcard_id} rated {quality}: {} → next review in {} day(s) ({})",
        next.status(),
        next.interval(),
        next.next_review_date().format("%Y-%m-%d")
    );

    Ok(StoredCard {
        scheduling: next,
        version,
        ..card
    })
}

/// Cards due at `now`, oldest first, optionally limited to one deck.
pub fn due_cards(
    deck_name: Option<&str>,
    now: DateTime<Utc>,
    conn: &Connection,
) -> StoreResult<Vec<StoredCard>> {
    if let Some(deck) = deck_name {
        if !db::deck_exists(deck, conn)? {
            return Err(StoreError::UnknownDeck(deck.to_string()));
        }
    }

    let candidates = db::get_due_candidates(deck_name, now, conn)?;
    Ok(select_due_sorted(&candidates, now)
        .into_iter()
        .cloned()
        .collect())
}
