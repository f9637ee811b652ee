//! JSON import/export of deck content.
//! Only fronts, backs and categories travel; scheduling state stays in the store.

use crate::database::db;
use crate::error::StoreResult;
use crate::models::Deck;
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::Connection;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Writes a deck to a pretty-printed JSON file.
pub fn export_deck(deck: &Deck, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(deck)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    info!("Deck '{}' exported to {}", deck.name, path.display());
    Ok(())
}

/// Reads a deck from a JSON file.
pub fn import_deck(path: impl AsRef<Path>) -> StoreResult<Deck> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let deck: Deck = serde_json::from_reader(BufReader::new(file))?;
    info!("Deck '{}' imported from {}", deck.name, path.display());
    Ok(deck)
}

/// Stores an imported deck, creating it if needed. Every new card starts
/// with fresh scheduling state; cards whose front already exists are kept
/// as they are. Returns the number of cards in the deck file.
pub fn store_deck(deck: &Deck, created_at: DateTime<Utc>, conn: &Connection) -> StoreResult<usize> {
    let tx = conn.unchecked_transaction()?;
    if !db::deck_exists(&deck.name, &tx)? {
        db::new_deck(&deck.name, &tx)?;
    }
    for flashcard in &deck.flashcards {
        db::add_flashcard(&deck.name, flashcard, created_at, &tx)?;
    }
    tx.commit()?;
    Ok(deck.flashcards.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::Flashcard;
    use chrono::TimeZone;
    use std::fs;

    fn create_test_deck() -> Deck {
        Deck {
            name: "Capitals".to_string(),
            flashcards: vec![
                Flashcard::new("France", "Paris").with_category("europe"),
                Flashcard::new("Peru", "Lima"),
            ],
        }
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.json");
        let deck = create_test_deck();

        export_deck(&deck, &path).unwrap();
        let imported = import_deck(&path).unwrap();

        assert_eq!(imported.name, deck.name);
        assert_eq!(imported.flashcards, deck.flashcards);
    }

    #[test]
    fn test_import_handwritten_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        fs::write(
            &path,
            r#"{
  "name": "Import Test Deck",
  "flashcards": [
    { "front": "test front", "back": "test back", "category": "misc" }
  ]
}"#,
        )
        .unwrap();

        let deck = import_deck(&path).unwrap();
        assert_eq!(deck.name, "Import Test Deck");
        assert_eq!(deck.flashcards.len(), 1);
        assert_eq!(deck.flashcards[0].category.as_deref(), Some("misc"));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_deck(dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_deck(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_store_deck_creates_fresh_cards() {
        let conn = Connection::open_in_memory().unwrap();
        db::create_schema(&conn).unwrap();
        let created_at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

        assert_eq!(store_deck(&create_test_deck(), created_at, &conn).unwrap(), 2);
        // a second import does not duplicate cards
        store_deck(&create_test_deck(), created_at, &conn).unwrap();

        let cards = db::load_deck_cards("Capitals", &conn).unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|card| card.scheduling.is_due(created_at)));
    }
}
