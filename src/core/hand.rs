use std::ops::Index;
use std::slice::Iter;

use super::{Card, PokerError, Suit, Value};

/// The fewest cards a hand needs before it can be classified.
pub const MIN_CARDS: usize = 5;
/// The most cards a hand can hold.
pub const MAX_CARDS: usize = 7;

/// A bounded collection of unique cards.
///
/// Every mutation bumps a version counter. Anything derived from the cards
/// (like a classification) can remember the version it was computed at and
/// know it is stale once the counter moves on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hand {
    cards: Vec<Card>,
    version: u64,
}

impl Hand {
    /// Create a new empty hand
    ///
    /// # Examples
    ///
    /// ```
    /// use poker_stats::core::Hand;
    ///
    /// let hand = Hand::new();
    ///
    /// assert!(hand.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_CARDS),
            version: 0,
        }
    }

    /// Build a hand from a list of cards, rejecting duplicates and more than
    /// seven cards.
    pub fn new_with_cards(cards: Vec<Card>) -> Result<Self, PokerError> {
        let mut hand = Self::new();
        hand.extend(cards)?;
        Ok(hand)
    }

    /// Parse a hand from a string like `"AsKsQsJsTs"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use poker_stats::core::Hand;
    ///
    /// let hand = Hand::new_from_str("AdKd2c").unwrap();
    /// assert_eq!(3, hand.len());
    /// assert!(Hand::new_from_str("AdAd").is_err());
    /// ```
    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        let mut chars = hand_string.chars().filter(|c| !c.is_whitespace());
        let mut hand = Self::new();

        while let Some(vc) = chars.next() {
            let value = Value::from_char(vc).ok_or(PokerError::UnexpectedValueChar)?;
            let suit = chars
                .next()
                .and_then(Suit::from_char)
                .ok_or(PokerError::UnexpectedSuitChar)?;
            if hand.len() == MAX_CARDS {
                return Err(PokerError::UnparsedCharsRemaining);
            }
            hand.push(Card::new(value, suit))?;
        }

        Ok(hand)
    }

    /// Add a card to the end of the hand.
    ///
    /// # Examples
    ///
    /// ```
    /// use poker_stats::core::{Card, Hand, Suit, Value};
    ///
    /// let mut hand = Hand::new();
    /// let card = Card::new(Value::Ace, Suit::Club);
    ///
    /// hand.push(card).unwrap();
    /// assert!(hand.contains(&card));
    /// assert!(hand.push(card).is_err());
    /// ```
    pub fn push(&mut self, c: Card) -> Result<(), PokerError> {
        if self.cards.len() == MAX_CARDS {
            return Err(PokerError::TooManyCards(MAX_CARDS + 1));
        }
        if self.contains(&c) {
            return Err(PokerError::DuplicateCard(c));
        }
        self.cards.push(c);
        self.version += 1;
        Ok(())
    }

    /// Add every card, stopping at the first one that can't be added.
    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) -> Result<(), PokerError> {
        for c in cards {
            self.push(c)?;
        }
        Ok(())
    }

    /// Given a card, is it in the current hand?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// Remove a card from the hand
    pub fn remove(&mut self, c: &Card) -> bool {
        match self.cards.iter().position(|card| card == c) {
            Some(idx) => {
                self.cards.remove(idx);
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Keep only the first `len` cards.
    pub fn truncate(&mut self, len: usize) {
        if len < self.cards.len() {
            self.cards.truncate(len);
            self.version += 1;
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Monotonic counter of mutations.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Index<usize> for Hand {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
