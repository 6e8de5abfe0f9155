//! Monte carlo hand frequencies.
//!
//! Hands are dealt from shuffled decks, ranked, and counted in a
//! [`Histogram`]. [`PokerStats`] keeps a histogram between runs so new
//! samples can either replace or be appended to earlier ones.

use crate::core::{CARDS_PER_DECK, MAX_CARDS, MIN_CARDS, PokerError};

mod histogram;
pub use self::histogram::Histogram;

mod poker_stats;
pub use self::poker_stats::{Operation, PokerStats};

mod report;
pub use self::report::{ReportRow, StatsReport};

/// Default number of shuffled decks per run.
pub const ITERATIONS: u32 = 10_000;

/// How many hands of `cards_per_hand` cards one deck deals, `0` for an
/// empty hand.
pub fn hands_per_deck(cards_per_hand: usize) -> usize {
    CARDS_PER_DECK.checked_div(cards_per_hand).unwrap_or(0)
}

/// Check the run parameters before any work is done.
pub fn validate(iterations: u32, cards_per_hand: usize) -> Result<(), PokerError> {
    if iterations < 1 {
        return Err(PokerError::InvalidIterations(iterations));
    }
    if !(MIN_CARDS..=MAX_CARDS).contains(&cards_per_hand) {
        return Err(PokerError::InvalidCardsPerHand(cards_per_hand));
    }
    Ok(())
}
