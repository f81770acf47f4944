use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck is exhausted")]
    Exhausted,
}

/// A standard 52-card deck, dealt from the top (end of the sequence).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deck {
    /// An unshuffled deck in suit-major order.
    ///
    /// ```
    /// use holdem_table::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        Self::fill(&mut cards);
        Self { cards }
    }

    fn fill(cards: &mut Vec<Card>) {
        cards.clear();
        for s in Suit::ALL {
            for r in Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Repopulate with all 52 cards and shuffle uniformly.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        Self::fill(&mut self.cards);
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }
}
