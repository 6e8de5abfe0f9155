use std::ops::Index;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, Hand, MAX_CARDS, PokerError, Suit, Value};

/// Number of cards in a full deck.
pub const CARDS_PER_DECK: usize = 52;

/// `Deck` is a deck of cards that allows easy indexing, shuffling and
/// dealing into hands. Cards are dealt from the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// Create the full 52 card deck in a fixed order.
    ///
    /// ```
    /// use poker_stats::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(CARDS_PER_DECK),
        };
        deck.reset();
        deck
    }

    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Put every card back, in the starting order.
    pub fn reset(&mut self) {
        self.cards.clear();
        for v in Value::values() {
            for s in Suit::suits() {
                self.cards.push(Card::new(v, s));
            }
        }
    }

    /// Randomly shuffle the deck.
    /// The random number generator is owned by the caller so that
    /// a seeded generator gives a repeatable order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Deal a card if there is one there to deal.
    /// None if the deck is empty
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Move `n` cards from the deck into `hand`.
    ///
    /// Nothing is dealt unless the deck holds at least `n` cards and the
    /// hand can take all of them.
    pub fn deal_into(&mut self, hand: &mut Hand, n: usize) -> Result<(), PokerError> {
        if self.cards.len() < n {
            return Err(PokerError::NotEnoughCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        if hand.len() + n > MAX_CARDS {
            return Err(PokerError::TooManyCards(hand.len() + n));
        }
        let start = self.cards.len() - n;
        if let Some(c) = self.cards[start..].iter().find(|c| hand.contains(c)) {
            return Err(PokerError::DuplicateCard(*c));
        }
        hand.extend(self.cards.drain(start..))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Deck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for Deck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}
