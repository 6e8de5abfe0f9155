use std::cmp::Ordering;
use std::fmt;

use tracing::event;

use super::{Card, ClassifiedHand, Hand, PokerError, Rank, Rankable};

/// A hand that remembers its last classification.
///
/// The cached result is stamped with the version of the hand it was computed
/// from. Any change to the cards moves the version on, so the next call to
/// [`PokerHand::classify`] recomputes.
///
/// # Examples
///
/// ```
/// use poker_stats::core::{PokerHand, Rank};
///
/// let mut hand = PokerHand::new_from_str("AsKsQsJs").unwrap();
/// assert!(hand.classify().is_err());
///
/// hand.push("Ts".parse().unwrap()).unwrap();
/// assert_eq!(Rank::StraightFlush, hand.classify().unwrap().rank());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PokerHand {
    hand: Hand,
    cached: Option<(u64, ClassifiedHand)>,
}

impl PokerHand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_from_str(hand_string: &str) -> Result<Self, PokerError> {
        Hand::new_from_str(hand_string).map(Self::from)
    }

    pub fn push(&mut self, c: Card) -> Result<(), PokerError> {
        self.hand.push(c)
    }

    pub fn remove(&mut self, c: &Card) -> bool {
        self.hand.remove(c)
    }

    pub fn clear(&mut self) {
        self.hand.clear();
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn len(&self) -> usize {
        self.hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Is the cached classification still valid for the current cards?
    pub fn is_classified(&self) -> bool {
        matches!(&self.cached, Some((version, _)) if *version == self.hand.version())
    }

    /// Classify the hand, reusing the previous result if the cards haven't
    /// changed since.
    pub fn classify(&mut self) -> Result<&ClassifiedHand, PokerError> {
        let version = self.hand.version();
        let classified = match self.cached.take() {
            Some((cached_version, classified)) if cached_version == version => {
                event!(tracing::Level::TRACE, version, "Classification cache hit");
                classified
            }
            _ => {
                event!(tracing::Level::TRACE, version, "Classifying hand");
                self.hand.classify()?
            }
        };
        Ok(&self.cached.insert((version, classified)).1)
    }

    /// Does the best hand have this rank?
    ///
    /// A hand that can't be classified has no rank at all.
    pub fn has(&mut self, rank: Rank) -> bool {
        self.classify().is_ok_and(|c| c.rank() == rank)
    }

    /// Compare against another hand, classifying both if needed.
    pub fn compare(&mut self, other: &mut PokerHand) -> Result<Ordering, PokerError> {
        let mine = self.classify()?;
        let theirs = other.classify()?;
        Ok(mine.compare(theirs))
    }

    /// Same best hand as another hand.
    pub fn equals(&mut self, other: &mut PokerHand) -> Result<bool, PokerError> {
        let mine = self.classify()?;
        let theirs = other.classify()?;
        Ok(mine.equals(theirs))
    }
}

impl From<Hand> for PokerHand {
    fn from(hand: Hand) -> Self {
        Self { hand, cached: None }
    }
}

impl fmt::Display for PokerHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.hand.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
