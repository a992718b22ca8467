use crate::card::{Card, Rank, Suit};
use crate::BlackjackGameError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single deck that cards are drawn from at random and never put back.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Associated function to create a full deck seeded from system entropy.
    pub fn new() -> Deck {
        Deck::with_rng(Deck::generate(), ChaCha8Rng::from_entropy())
    }

    /// Associated function to create a full deck whose draws are reproducible for a given `seed`.
    pub fn with_seed(seed: u64) -> Deck {
        Deck::with_rng(Deck::generate(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Builds a seeded deck holding exactly `cards`, useful for stacking the deck.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Deck {
        Deck::with_rng(cards, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(cards: Vec<Card>, rng: ChaCha8Rng) -> Deck {
        Deck { cards, rng }
    }

    /// Returns the 48 cards of a fresh deck, suit by suit: Ace, King, Queen, Jack, then 2 through 9.
    pub fn generate() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|suit| Rank::ALL.iter().map(move |rank| Card::new(*rank, *suit)))
            .collect()
    }

    /// Removes a uniformly random card from the deck and returns it.
    pub fn draw(&mut self) -> Result<Card, BlackjackGameError> {
        if self.cards.is_empty() {
            return Err(BlackjackGameError::DeckExhausted);
        }
        let idx = self.rng.gen_range(0..self.cards.len());
        Ok(self.cards.swap_remove(idx))
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
