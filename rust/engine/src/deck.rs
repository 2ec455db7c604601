use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// 52-card deck owning its own seeded RNG.
///
/// Each table owns exactly one deck, so tables never share randomness.
/// Cards are dealt from the end of the shuffled sequence and never return
/// to it until the next [`Deck::shuffle`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    burned: Vec<Card>,
    seed: u64,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            burned: Vec::with_capacity(3),
            seed,
            rng,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restores all 52 cards and applies a uniform permutation.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.burned.clear();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Discards the next card face down.
    pub fn burn_card(&mut self) -> Option<Card> {
        let c = self.cards.pop()?;
        self.burned.push(c);
        Some(c)
    }

    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.burned.clear();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
