use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use flashcards_app::config::Config;
use flashcards_app::database::db;
use flashcards_app::export::json::{export_deck, import_deck, store_deck};
use flashcards_app::models::performance::category_performance;
use flashcards_app::models::{Flashcard, Quality};
use flashcards_app::{StoreError, service};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "flashcards", about = "Spaced-repetition flashcard study")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a deck
    AddDeck { name: String },
    /// Add a card to a deck
    Add {
        deck: String,
        front: String,
        back: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// List cards due for review
    Due {
        #[arg(long)]
        deck: Option<String>,
    },
    /// Record a review with a 0-5 quality rating
    Review {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        quality: Quality,
        #[arg(long, default_value_t = 0)]
        time_ms: u64,
    },
    /// Show a card's scheduling state and history
    History { id: i64 },
    /// Per-category performance
    Stats,
    /// Advance the simulated date by one day
    NextDay,
    /// Export a deck to JSON
    Export { deck: String, path: PathBuf },
    /// Import a deck from JSON
    Import { path: PathBuf },
    /// Delete a card and its history
    Delete { id: i64 },
}

fn now(config: &Config, conn: &Connection) -> Result<DateTime<Utc>, StoreError> {
    if config.simulated_clock {
        db::get_current_date(conn)
    } else {
        Ok(Utc::now())
    }
}

fn run(command: Command, config: &Config, conn: &Connection) -> Result<(), StoreError> {
    match command {
        Command::AddDeck { name } => db::new_deck(&name, conn)?,
        Command::Add {
            deck,
            front,
            back,
            category,
        } => {
            let mut flashcard = Flashcard::new(front, back);
            flashcard.category = category;
            let added = db::add_flashcard(&deck, &flashcard, now(config, conn)?, conn)?;
            if added.inserted {
                println!("Added card {} to '{deck}'", added.id);
            } else {
                println!(
                    "Card {} with front '{}' already exists in '{deck}'; left unchanged",
                    added.id, flashcard.front
                );
            }
        }
        Command::Due { deck } => {
            let cards = service::due_cards(deck.as_deref(), now(config, conn)?, conn)?;
            println!("{} card(s) due", cards.len());
            for card in cards {
                println!(
                    "  [{}] {} ({}, {})",
                    card.id,
                    card.flashcard.front,
                    card.deck_name,
                    card.scheduling.status()
                );
            }
        }
        Command::Review {
            id,
            quality,
            time_ms,
        } => {
            let card = service::review_flashcard(id, quality, time_ms, now(config, conn)?, conn)?;
            println!(
                "{} → {}, next review {} (interval {} day(s), ease {:.2})",
                card.flashcard.front,
                card.scheduling.status(),
                card.scheduling.next_review_date().format("%Y-%m-%d"),
                card.scheduling.interval(),
                card.scheduling.ease_factor()
            );
        }
        Command::History { id } => {
            let card = db::get_flashcard(id, conn)?;
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        Command::Stats => {
            let cards = db::load_all_cards(conn)?;
            for (category, stats) in category_performance(&cards) {
                println!(
                    "{category}: {} card(s), {} review(s), pass rate {:.0}%, avg quality {:.2}",
                    stats.cards,
                    stats.reviews,
                    stats.pass_rate() * 100.0,
                    stats.average_quality()
                );
            }
        }
        Command::NextDay => {
            let date = db::advance_day(conn)?;
            println!("Simulated date is now {}", date.format("%Y-%m-%d"));
        }
        Command::Export { deck, path } => {
            let decks = db::load_all_decks(conn)?;
            let found = decks
                .find(&deck)
                .ok_or_else(|| StoreError::UnknownDeck(deck.clone()))?;
            export_deck(found, &path)?;
        }
        Command::Import { path } => {
            let deck = import_deck(&path)?;
            let count = store_deck(&deck, now(config, conn)?, conn)?;
            println!("Imported {count} card(s) into '{}'", deck.name);
        }
        Command::Delete { id } => db::delete_flashcard(id, conn)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = Config::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    let cli = Cli::parse();

    let result = db::init_database(&config.database_path)
        .and_then(|conn| run(cli.command, &config, &conn));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
