//! Database operations for the flashcard store
//!
//! Handles SQLite initialization, deck and flashcard CRUD, and persistence of
//! scheduling state with an optimistic version check per flashcard.

use crate::error::{SchedulerError, StoreError, StoreResult};
use crate::models::{
    CardStatus, Deck, DeckSet, Flashcard, Quality, SchedulingState, StoredCard, StudyRecord,
};
use chrono::{DateTime, Days, Utc};
use log::{debug, info, warn};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const CARD_COLUMNS: &str = "f.id, f.deck_name, f.front, f.back, f.category, f.created_at,
     s.easiness_factor, s.interval_days, s.repetitions, s.next_review_date,
     s.status, s.last_reviewed, s.version";

/// Outcome of [`add_flashcard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddedCard {
    pub id: i64,
    /// False when a card with the same front already existed in the deck.
    pub inserted: bool,
}

/// Opens (or creates) the database file and makes sure the schema exists.
pub fn init_database(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    info!("Database ready at {}", path.display());
    Ok(conn)
}

/// Creates tables for decks, flashcards, scheduling state, study history and
/// app state. Sets the simulated current date to now if not yet initialized.
pub fn create_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS decks (
            name TEXT PRIMARY KEY
        );

        CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            deck_name TEXT NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            category TEXT,
            created_at INTEGER NOT NULL,
            FOREIGN KEY (deck_name) REFERENCES decks(name),
            UNIQUE(deck_name, front)
        );

        CREATE TABLE IF NOT EXISTS scheduling (
            flashcard_id INTEGER PRIMARY KEY,
            easiness_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review_date INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'new',
            last_reviewed INTEGER,
            version INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (flashcard_id) REFERENCES flashcards(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_scheduling_next_review
            ON scheduling(next_review_date);

        CREATE TABLE IF NOT EXISTS study_history (
            flashcard_id INTEGER NOT NULL,
            seq INTEGER NOT NULL,
            reviewed_at INTEGER NOT NULL,
            quality INTEGER NOT NULL,
            time_spent_ms INTEGER NOT NULL,
            PRIMARY KEY (flashcard_id, seq),
            FOREIGN KEY (flashcard_id) REFERENCES flashcards(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![Utc::now().timestamp_millis().to_string()],
    )?;

    Ok(())
}

fn to_millis(date: DateTime<Utc>) -> i64 {
    date.timestamp_millis()
}

fn from_millis(millis: i64) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| StoreError::Corrupted(format!("timestamp {millis} is out of range")))
}

/// Retrieves the simulated current date
pub fn get_current_date(conn: &Connection) -> StoreResult<DateTime<Utc>> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    let millis = value
        .parse::<i64>()
        .map_err(|_| StoreError::Corrupted(format!("current date '{value}' is not a timestamp")))?;
    from_millis(millis)
}

/// Advances the simulated current date by one calendar day
pub fn advance_day(conn: &Connection) -> StoreResult<DateTime<Utc>> {
    let current = get_current_date(conn)?;
    let next_day = current
        .checked_add_days(Days::new(1))
        .ok_or_else(|| StoreError::Corrupted(format!("cannot advance past {current}")))?;

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![to_millis(next_day).to_string()],
    )?;

    debug!("Simulated date advanced to {next_day}");
    Ok(next_day)
}

/// Creates a new deck
pub fn new_deck(name: &str, conn: &Connection) -> StoreResult<()> {
    conn.execute("INSERT INTO decks (name) VALUES (?1)", params![name])?;
    info!("Deck '{name}' created");
    Ok(())
}

pub fn deck_exists(name: &str, conn: &Connection) -> StoreResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM decks WHERE name = ?1", params![name], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Adds a flashcard to a deck and initializes its scheduling state
///
/// A card with the same deck and front already present is left untouched;
/// its ID is returned with `inserted == false`.
pub fn add_flashcard(
    deck_name: &str,
    flashcard: &Flashcard,
    created_at: DateTime<Utc>,
    conn: &Connection,
) -> StoreResult<AddedCard> {
    if !deck_exists(deck_name, conn)? {
        return Err(StoreError::UnknownDeck(deck_name.to_string()));
    }

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO flashcards (deck_name, front, back, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            deck_name,
            flashcard.front,
            flashcard.back,
            flashcard.category,
            to_millis(created_at)
        ],
    )? > 0;

    let flashcard_id: i64 = conn.query_row(
        "SELECT id FROM flashcards WHERE deck_name = ?1 AND front = ?2",
        params![deck_name, flashcard.front],
        |row| row.get(0),
    )?;

    let initial = SchedulingState::new(created_at);
    conn.execute(
        "INSERT OR IGNORE INTO scheduling
            (flashcard_id, easiness_factor, interval_days, repetitions, next_review_date, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            flashcard_id,
            initial.ease_factor(),
            initial.interval(),
            initial.repetitions(),
            to_millis(initial.next_review_date()),
            initial.status().as_str()
        ],
    )?;

    if inserted {
        debug!("Flashcard {flashcard_id} stored in deck '{deck_name}'");
    } else {
        debug!("Flashcard {flashcard_id} already exists in deck '{deck_name}'");
    }
    Ok(AddedCard {
        id: flashcard_id,
        inserted,
    })
}

/// Raw card row before history is attached and values are validated.
struct CardRow {
    id: i64,
    deck_name: String,
    flashcard: Flashcard,
    created_at: i64,
    ease_factor: f64,
    interval_days: i64,
    repetitions: i64,
    next_review_date: i64,
    status: String,
    last_reviewed: Option<i64>,
    version: i64,
}

fn read_card_row(row: &Row<'_>) -> rusqlite::Result<CardRow> {
    Ok(CardRow {
        id: row.get(0)?,
        deck_name: row.get(1)?,
        flashcard: Flashcard {
            front: row.get(2)?,
            back: row.get(3)?,
            category: row.get(4)?,
        },
        created_at: row.get(5)?,
        ease_factor: row.get(6)?,
        interval_days: row.get(7)?,
        repetitions: row.get(8)?,
        next_review_date: row.get(9)?,
        status: row.get(10)?,
        last_reviewed: row.get(11)?,
        version: row.get(12)?,
    })
}

fn load_history(flashcard_id: i64, conn: &Connection) -> StoreResult<Vec<StudyRecord>> {
    let mut stmt = conn.prepare(
        "SELECT reviewed_at, quality, time_spent_ms FROM study_history
         WHERE flashcard_id = ?1 ORDER BY seq ASC",
    )?;

    let rows = stmt
        .query_map(params![flashcard_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(reviewed_at, quality, time_spent_ms)| -> StoreResult<StudyRecord> {
            Ok(StudyRecord {
                date: from_millis(reviewed_at)?,
                quality: Quality::try_from(quality)?,
                time_spent_ms: u64::try_from(time_spent_ms).map_err(|_| {
                    StoreError::Corrupted(format!("negative study time {time_spent_ms}"))
                })?,
            })
        })
        .collect()
}

fn non_negative(value: i64, field: &str, flashcard_id: i64) -> StoreResult<u32> {
    u32::try_from(value).map_err(|_| {
        SchedulerError::InvalidState(format!(
            "flashcard {flashcard_id} has {field} {value}"
        ))
        .into()
    })
}

fn into_stored_card(row: CardRow, conn: &Connection) -> StoreResult<StoredCard> {
    let history = load_history(row.id, conn)?;
    let last_reviewed = row.last_reviewed.map(from_millis).transpose()?;
    let scheduling = SchedulingState::restore(
        row.ease_factor,
        non_negative(row.interval_days, "interval", row.id)?,
        non_negative(row.repetitions, "repetitions", row.id)?,
        from_millis(row.next_review_date)?,
        history,
        last_reviewed,
    )?;

    let stored_status: CardStatus = row.status.parse()?;
    if stored_status != scheduling.status() {
        return Err(SchedulerError::InvalidState(format!(
            "flashcard {} is stored as '{stored_status}' but its history makes it '{}'",
            row.id,
            scheduling.status()
        ))
        .into());
    }

    Ok(StoredCard {
        id: row.id,
        deck_name: row.deck_name,
        flashcard: row.flashcard,
        created_at: from_millis(row.created_at)?,
        scheduling,
        version: row.version,
    })
}

fn query_cards(
    sql: &str,
    params: impl rusqlite::Params,
    conn: &Connection,
) -> StoreResult<Vec<StoredCard>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, read_card_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|row| into_stored_card(row, conn))
        .collect()
}

/// Loads a flashcard with its full scheduling state and history
pub fn get_flashcard(flashcard_id: i64, conn: &Connection) -> StoreResult<StoredCard> {
    let row = conn
        .query_row(
            &format!(
                "SELECT {CARD_COLUMNS} FROM flashcards f
                 JOIN scheduling s ON f.id = s.flashcard_id
                 WHERE f.id = ?1"
            ),
            params![flashcard_id],
            read_card_row,
        )
        .optional()?
        .ok_or(StoreError::NotFound(flashcard_id))?;

    into_stored_card(row, conn)
}

/// Deletes a flashcard together with its scheduling state and history
pub fn delete_flashcard(flashcard_id: i64, conn: &Connection) -> StoreResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM study_history WHERE flashcard_id = ?1",
        params![flashcard_id],
    )?;
    tx.execute(
        "DELETE FROM scheduling WHERE flashcard_id = ?1",
        params![flashcard_id],
    )?;
    let deleted = tx.execute("DELETE FROM flashcards WHERE id = ?1", params![flashcard_id])?;
    if deleted == 0 {
        return Err(StoreError::NotFound(flashcard_id));
    }
    tx.commit()?;

    info!("Flashcard {flashcard_id} deleted");
    Ok(())
}

/// Persists a scheduling state computed from the card loaded at
/// `expected_version`
///
/// Appends only the history entries not yet stored and returns the new
/// version. Fails with [`StoreError::Conflict`] if another review was saved
/// in between.
pub fn save_scheduling(
    flashcard_id: i64,
    expected_version: i64,
    state: &SchedulingState,
    conn: &Connection,
) -> StoreResult<i64> {
    state.validate()?;
    let tx = conn.unchecked_transaction()?;

    let updated = tx.execute(
        "UPDATE scheduling
         SET easiness_factor = ?1, interval_days = ?2, repetitions = ?3,
             next_review_date = ?4, status = ?5, last_reviewed = ?6, version = version + 1
         WHERE flashcard_id = ?7 AND version = ?8",
        params![
            state.ease_factor(),
            state.interval(),
            state.repetitions(),
            to_millis(state.next_review_date()),
            state.status().as_str(),
            state.last_reviewed().map(to_millis),
            flashcard_id,
            expected_version
        ],
    )?;

    if updated == 0 {
        let exists = tx
            .query_row(
                "SELECT 1 FROM scheduling WHERE flashcard_id = ?1",
                params![flashcard_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !exists {
            return Err(StoreError::NotFound(flashcard_id));
        }
        warn!("Stale write for flashcard {flashcard_id} at version {expected_version}");
        return Err(StoreError::Conflict {
            flashcard_id,
            expected: expected_version,
        });
    }

    let stored: i64 = tx.query_row(
        "SELECT COUNT(*) FROM study_history WHERE flashcard_id = ?1",
        params![flashcard_id],
        |row| row.get(0),
    )?;
    let stored = usize::try_from(stored)
        .map_err(|_| StoreError::Corrupted(format!("history count {stored}")))?;
    let history = state.study_history();
    if history.len() < stored {
        return Err(StoreError::Corrupted(format!(
            "flashcard {flashcard_id} history would shrink from {stored} to {}",
            history.len()
        )));
    }

    {
        let mut insert = tx.prepare(
            "INSERT INTO study_history (flashcard_id, seq, reviewed_at, quality, time_spent_ms)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (seq, record) in history.iter().enumerate().skip(stored) {
            let time_spent_ms = i64::try_from(record.time_spent_ms).map_err(|_| {
                StoreError::Corrupted(format!("study time {} too large", record.time_spent_ms))
            })?;
            insert.execute(params![
                flashcard_id,
                seq as i64,
                to_millis(record.date),
                record.quality.value(),
                time_spent_ms
            ])?;
        }
    }

    tx.commit()?;
    Ok(expected_version + 1)
}

/// Retrieves flashcards whose next review date is at or before `now`
///
/// Uses the `next_review_date` index; results are ordered oldest first.
pub fn get_due_candidates(
    deck_name: Option<&str>,
    now: DateTime<Utc>,
    conn: &Connection,
) -> StoreResult<Vec<StoredCard>> {
    match deck_name {
        Some(deck) => query_cards(
            &format!(
                "SELECT {CARD_COLUMNS} FROM flashcards f
                 JOIN scheduling s ON f.id = s.flashcard_id
                 WHERE f.deck_name = ?1 AND s.next_review_date <= ?2
                 ORDER BY s.next_review_date ASC, f.id ASC"
            ),
            params![deck, to_millis(now)],
            conn,
        ),
        None => query_cards(
            &format!(
                "SELECT {CARD_COLUMNS} FROM flashcards f
                 JOIN scheduling s ON f.id = s.flashcard_id
                 WHERE s.next_review_date <= ?1
                 ORDER BY s.next_review_date ASC, f.id ASC"
            ),
            params![to_millis(now)],
            conn,
        ),
    }
}

/// Loads every card of a deck with its scheduling state
pub fn load_deck_cards(deck_name: &str, conn: &Connection) -> StoreResult<Vec<StoredCard>> {
    query_cards(
        &format!(
            "SELECT {CARD_COLUMNS} FROM flashcards f
             JOIN scheduling s ON f.id = s.flashcard_id
             WHERE f.deck_name = ?1
             ORDER BY f.id ASC"
        ),
        params![deck_name],
        conn,
    )
}

/// Loads every stored card
pub fn load_all_cards(conn: &Connection) -> StoreResult<Vec<StoredCard>> {
    query_cards(
        &format!(
            "SELECT {CARD_COLUMNS} FROM flashcards f
             JOIN scheduling s ON f.id = s.flashcard_id
             ORDER BY f.id ASC"
        ),
        [],
        conn,
    )
}

/// Retrieves all deck names
pub fn get_all_decks(conn: &Connection) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM decks ORDER BY name")?;
    let decks = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(decks)
}

/// Loads all decks with their flashcard content
///
/// Scheduling state is left out; use [`load_deck_cards`] for that.
pub fn load_all_decks(conn: &Connection) -> StoreResult<DeckSet> {
    let mut decks = Vec::new();

    for name in get_all_decks(conn)? {
        let flashcards = load_deck_cards(&name, conn)?
            .into_iter()
            .map(|card| card.flashcard)
            .collect();
        decks.push(Deck { name, flashcards });
    }

    Ok(DeckSet { decks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sm2::compute_next_review;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 10, 0, 0).unwrap()
    }

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        new_deck("Biology", &conn).unwrap();
        conn
    }

    #[test]
    fn test_add_and_get_flashcard() {
        let conn = setup();
        let card = Flashcard::new("ATP", "energy currency").with_category("cells");
        let id = add_flashcard("Biology", &card, at(1, 5), &conn).unwrap().id;

        let stored = get_flashcard(id, &conn).unwrap();
        assert_eq!(stored.flashcard, card);
        assert_eq!(stored.deck_name, "Biology");
        assert_eq!(stored.version, 0);
        assert_eq!(stored.created_at, at(1, 5));
        assert_eq!(stored.scheduling, SchedulingState::new(at(1, 5)));
    }

    #[test]
    fn test_duplicate_front_returns_existing_id() {
        let conn = setup();
        let first = add_flashcard("Biology", &Flashcard::new("DNA", "a"), at(1, 1), &conn).unwrap();
        let second = add_flashcard("Biology", &Flashcard::new("DNA", "b"), at(1, 2), &conn).unwrap();
        assert!(first.inserted);
        assert!(!second.inserted);
        assert_eq!(first.id, second.id);

        let stored = get_flashcard(first.id, &conn).unwrap();
        assert_eq!(stored.flashcard.back, "a");
        assert_eq!(stored.created_at, at(1, 1));
    }

    #[test]
    fn test_unknown_deck() {
        let conn = setup();
        let result = add_flashcard("Physics", &Flashcard::new("F", "ma"), at(1, 1), &conn);
        assert!(matches!(result, Err(StoreError::UnknownDeck(name)) if name == "Physics"));
    }

    #[test]
    fn test_save_and_reload_scheduling() {
        let conn = setup();
        let id = add_flashcard("Biology", &Flashcard::new("RNA", "ribo"), at(1, 1), &conn).unwrap().id;

        let mut card = get_flashcard(id, &conn).unwrap();
        for (i, q) in [5u8, 4, 1].into_iter().enumerate() {
            let next = compute_next_review(&card.scheduling, q, 750, at(1, 2 + i as u32)).unwrap();
            let version = save_scheduling(id, card.version, &next, &conn).unwrap();
            card = get_flashcard(id, &conn).unwrap();
            assert_eq!(card.version, version);
            assert_eq!(card.scheduling, next);
        }
        assert_eq!(card.scheduling.study_history().len(), 3);
        assert_eq!(card.scheduling.status(), CardStatus::Learning);
    }

    #[test]
    fn test_stale_version_is_rejected() {
        let conn = setup();
        let id = add_flashcard("Biology", &Flashcard::new("Cell", "unit"), at(1, 1), &conn).unwrap().id;
        let card = get_flashcard(id, &conn).unwrap();

        let first = compute_next_review(&card.scheduling, 5, 0, at(1, 2)).unwrap();
        let second = compute_next_review(&card.scheduling, 1, 0, at(1, 2)).unwrap();

        save_scheduling(id, card.version, &first, &conn).unwrap();
        let result = save_scheduling(id, card.version, &second, &conn);
        assert!(matches!(
            result,
            Err(StoreError::Conflict { flashcard_id, expected: 0 }) if flashcard_id == id
        ));

        let reloaded = get_flashcard(id, &conn).unwrap();
        assert_eq!(reloaded.scheduling, first);
    }

    #[test]
    fn test_missing_flashcard() {
        let conn = setup();
        assert!(matches!(get_flashcard(42, &conn), Err(StoreError::NotFound(42))));
        assert!(matches!(delete_flashcard(42, &conn), Err(StoreError::NotFound(42))));
        let state = SchedulingState::new(at(1, 1));
        assert!(matches!(
            save_scheduling(42, 0, &state, &conn),
            Err(StoreError::NotFound(42))
        ));
    }

    #[test]
    fn test_delete_flashcard() {
        let conn = setup();
        let id = add_flashcard("Biology", &Flashcard::new("Gene", "unit"), at(1, 1), &conn).unwrap().id;
        let card = get_flashcard(id, &conn).unwrap();
        let next = compute_next_review(&card.scheduling, 4, 0, at(1, 2)).unwrap();
        save_scheduling(id, card.version, &next, &conn).unwrap();

        delete_flashcard(id, &conn).unwrap();
        assert!(matches!(get_flashcard(id, &conn), Err(StoreError::NotFound(_))));
        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM study_history", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_due_candidates() {
        let conn = setup();
        new_deck("Chemistry", &conn).unwrap();
        let a = add_flashcard("Biology", &Flashcard::new("a", "1"), at(1, 3), &conn).unwrap().id;
        let b = add_flashcard("Biology", &Flashcard::new("b", "2"), at(1, 1), &conn).unwrap().id;
        let c = add_flashcard("Chemistry", &Flashcard::new("c", "3"), at(1, 2), &conn).unwrap().id;
        add_flashcard("Biology", &Flashcard::new("d", "4"), at(2, 1), &conn).unwrap();

        let all: Vec<i64> = get_due_candidates(None, at(1, 10), &conn)
            .unwrap()
            .iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(all, vec![b, c, a]);

        let biology: Vec<i64> = get_due_candidates(Some("Biology"), at(1, 10), &conn)
            .unwrap()
            .iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(biology, vec![b, a]);
    }

    #[test]
    fn test_corrupted_interval_is_rejected() {
        let conn = setup();
        let id = add_flashcard("Biology", &Flashcard::new("x", "y"), at(1, 1), &conn).unwrap().id;
        conn.execute(
            "UPDATE scheduling SET interval_days = -3 WHERE flashcard_id = ?1",
            params![id],
        )
        .unwrap();
        assert!(matches!(
            get_flashcard(id, &conn),
            Err(StoreError::Scheduler(SchedulerError::InvalidState(_)))
        ));

        conn.execute(
            "UPDATE scheduling SET interval_days = 0, easiness_factor = 1.1 WHERE flashcard_id = ?1",
            params![id],
        )
        .unwrap();
        assert!(matches!(
            get_flashcard(id, &conn),
            Err(StoreError::Scheduler(SchedulerError::InvalidState(_)))
        ));
    }

    #[test]
    fn test_stored_status_must_match_history() {
        let conn = setup();
        let id = add_flashcard("Biology", &Flashcard::new("Ion", "charged"), at(1, 1), &conn)
            .unwrap()
            .id;
        let card = get_flashcard(id, &conn).unwrap();
        let next = compute_next_review(&card.scheduling, 4, 0, at(1, 2)).unwrap();
        save_scheduling(id, card.version, &next, &conn).unwrap();
        let status: String = conn
            .query_row(
                "SELECT status FROM scheduling WHERE flashcard_id = ?1",
                params![id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(status, "review");

        conn.execute(
            "UPDATE scheduling SET status = 'graduated' WHERE flashcard_id = ?1",
            params![id],
        )
        .unwrap();
        assert!(matches!(
            get_flashcard(id, &conn),
            Err(StoreError::Scheduler(SchedulerError::InvalidState(_)))
        ));

        conn.execute(
            "UPDATE scheduling SET status = 'mastered' WHERE flashcard_id = ?1",
            params![id],
        )
        .unwrap();
        assert!(matches!(
            get_flashcard(id, &conn),
            Err(StoreError::Scheduler(SchedulerError::InvalidState(_)))
        ));
    }

    #[test]
    fn test_advance_day() {
        let conn = setup();
        let today = get_current_date(&conn).unwrap();
        let tomorrow = advance_day(&conn).unwrap();
        assert_eq!(tomorrow, today.checked_add_days(Days::new(1)).unwrap());
        assert_eq!(get_current_date(&conn).unwrap(), tomorrow);
    }

    #[test]
    fn test_load_all_decks() {
        let conn = setup();
        new_deck("Art", &conn).unwrap();
        add_flashcard("Biology", &Flashcard::new("a", "1"), at(1, 1), &conn).unwrap();
        add_flashcard("Biology", &Flashcard::new("b", "2"), at(1, 1), &conn).unwrap();

        let set = load_all_decks(&conn).unwrap();
        assert_eq!(get_all_decks(&conn).unwrap(), vec!["Art", "Biology"]);
        assert_eq!(set.total_cards(), 2);
        assert!(set.find("Art").unwrap().flashcards.is_empty());
    }
}
