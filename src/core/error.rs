use thiserror::Error;

use super::Card;

/// This is the core error type for the library. It uses `thiserror` to
/// provide readable error messages.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokerError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added to hand {0}")]
    DuplicateCard(Card),
    #[error("A hand needs at least 5 cards to be classified, found {0}")]
    TooFewCards(usize),
    #[error("A hand can't hold more than 7 cards, found {0}")]
    TooManyCards(usize),
    #[error("Can't deal {requested} cards, only {remaining} left in the deck")]
    NotEnoughCards { requested: usize, remaining: usize },
    #[error("Iterations must be greater than 0, found {0}")]
    InvalidIterations(u32),
    #[error("Cards per hand must be within [5, 7], found {0}")]
    InvalidCardsPerHand(usize),
    #[error("Unknown operation '{0}', expected 'replace' or 'append'")]
    UnknownOperation(String),
    #[error("Current and new number of cards per hand must be equal: {existing} != {requested}")]
    CardsPerHandMismatch { existing: usize, requested: usize },
}
