//! Deck construction and shuffling.
//!
//! Pure functions over the fixed 12-card set: six symbols, each on exactly
//! two cards. The shuffle is a uniform Fisher-Yates permutation via
//! `rand`, not a comparator hack, so every ordering is equally likely.

use crate::models::{Card, DECK_SIZE, PAIR_COUNT};
use rand::seq::SliceRandom;
use rand::Rng;

/// Build the fixed paired multiset in canonical order: symbol `i` on
/// cards `2i` and `2i + 1`, all matched flags false.
pub fn fresh_deck() -> Vec<Card> {
    (0..DECK_SIZE as u32)
        .map(|id| Card {
            id,
            symbol_id: id / 2,
            matched: false,
        })
        .collect()
}

/// A freshly built deck in uniform random order.
pub fn shuffled_deck() -> Vec<Card> {
    shuffled_deck_with(&mut rand::thread_rng())
}

/// Shuffle with a caller-supplied RNG, for deterministic tests.
pub fn shuffled_deck_with<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck = fresh_deck();
    deck.shuffle(rng);
    deck
}
