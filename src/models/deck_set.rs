//! Container for all stored decks
use super::Deck;

#[derive(Clone, Debug, Default)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}

impl DeckSet {
    pub fn total_cards(&self) -> usize {
        self.decks.iter().map(|deck| deck.flashcards.len()).sum()
    }

    pub fn find(&self, name: &str) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.name == name)
    }
}
