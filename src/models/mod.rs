pub mod deck;
pub mod deck_set;
pub mod due;
pub mod flashcard;
pub mod learning_card;
pub mod learning_session;
pub mod performance;
pub mod quality;
pub mod scheduling;
pub mod sm2;
pub mod stored_card;
pub mod study_record;

pub use deck::Deck;
pub use deck_set::DeckSet;
pub use flashcard::Flashcard;
pub use learning_card::LearningCard;
pub use learning_session::LearningSession;
pub use performance::CategoryPerformance;
pub use quality::Quality;
pub use scheduling::{CardStatus, SchedulingState};
pub use stored_card::StoredCard;
pub use study_record::StudyRecord;
