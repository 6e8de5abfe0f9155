//! This is the core module. It exports the cards, hands and the hand
//! classification code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// The error type shared by the whole crate.
mod error;
pub use self::error::PokerError;

/// Code related to cards in hands.
mod hand;
/// Everything in there should be public.
pub use self::hand::*;

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::{CARDS_PER_DECK, Deck};

/// Hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{Rank, Rankable};

/// The result of classifying a hand and how two of them compare.
mod classified_hand;
pub use self::classified_hand::ClassifiedHand;

/// A hand with a memoized classification.
mod poker_hand;
pub use self::poker_hand::PokerHand;
