pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use error::{SchedulerError, StoreError};
pub use models::due::{select_due, select_due_sorted};
pub use models::sm2::{compute_next_review, compute_next_review_now};
pub use models::{
    CardStatus, Deck, DeckSet, Flashcard, LearningSession, Quality, SchedulingState, StoredCard,
};
