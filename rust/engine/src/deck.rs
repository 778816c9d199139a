use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// The 52-card deck owned by one hand. Cards are dealt from the end and
/// never re-dealt until [`Deck::reset`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    /// Uniform permutation of the cards still in the deck.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes `n` cards from the end of the deck.
    ///
    /// ```
    /// use headsup_engine::deck::Deck;
    ///
    /// let mut deck = Deck::new_with_seed(7);
    /// deck.shuffle();
    /// let hole = deck.deal(2).unwrap();
    /// assert_eq!(hole.len(), 2);
    /// assert_eq!(deck.remaining(), 50);
    /// assert!(deck.deal(51).is_err());
    /// ```
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::InsufficientDeck {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(c) = self.cards.pop() {
                dealt.push(c);
            }
        }
        trace!(count = n, remaining = self.cards.len(), "dealt cards");
        Ok(dealt)
    }

    pub fn burn(&mut self) -> Result<(), EngineError> {
        self.deal(1).map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
