use std::cmp::Ordering;
use std::fmt;

use super::{Card, Rank};

/// Width of the longest label, "three of a kind".
const LABEL_WIDTH: usize = 15;
const REST_LABEL: &str = "rest of hand";

/// The best five card hand found in a set of cards.
///
/// `primary` holds the cards that make the rank, highest first with an Ace
/// in front whenever it plays high. `kicker` holds the highest remaining
/// cards so that together they always add up to five.
///
/// Two classified hands are compared with [`ClassifiedHand::compare`] and
/// [`ClassifiedHand::equals`], which only look at card ranks and ignore
/// suits.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedHand {
    rank: Rank,
    primary: Vec<Card>,
    kicker: Vec<Card>,
}

impl ClassifiedHand {
    pub(crate) fn new(rank: Rank, primary: Vec<Card>, kicker: Vec<Card>) -> Self {
        Self {
            rank,
            primary,
            kicker,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn primary(&self) -> &[Card] {
        &self.primary
    }

    pub fn kicker(&self) -> &[Card] {
        &self.kicker
    }

    /// The five cards, primary first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.primary.iter().chain(self.kicker.iter())
    }

    /// Total order over hands.
    ///
    /// Rank first, then the primary cards position by position, then the
    /// kicker. An Ace always beats any other card in the same position and
    /// two Aces tie.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use poker_stats::core::{Hand, Rankable};
    ///
    /// let kings = Hand::new_from_str("KsKh9c7d2s").unwrap().classify().unwrap();
    /// let aces = Hand::new_from_str("AsAh3c4d5h").unwrap().classify().unwrap();
    ///
    /// assert_eq!(Ordering::Less, kings.compare(&aces));
    /// assert_eq!(Ordering::Greater, aces.compare(&kings));
    /// ```
    pub fn compare(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| compare_cards(&self.primary, &other.primary))
            .then_with(|| compare_cards(&self.kicker, &other.kicker))
    }

    /// Same rank and the same card ranks in every position.
    pub fn equals(&self, other: &Self) -> bool {
        self.rank == other.rank
            && same_ranks(&self.primary, &other.primary)
            && same_ranks(&self.kicker, &other.kicker)
    }
}

fn compare_cards(cards: &[Card], other: &[Card]) -> Ordering {
    cards
        .iter()
        .zip(other)
        .map(|(a, b)| a.ace_high_rank().cmp(&b.ace_high_rank()))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn same_ranks(cards: &[Card], other: &[Card]) -> bool {
    cards.len() == other.len() && cards.iter().zip(other).all(|(a, b)| a.rank() == b.rank())
}

fn write_cards(f: &mut fmt::Formatter<'_>, label: &str, cards: &[Card]) -> fmt::Result {
    write!(f, "{label:<LABEL_WIDTH$}: ")?;
    for (i, c) in cards.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{c}")?;
    }
    writeln!(f)
}

impl fmt::Display for ClassifiedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cards(f, self.rank.label(), &self.primary)?;
        if !self.kicker.is_empty() {
            write_cards(f, REST_LABEL, &self.kicker)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hand, Rankable};

    fn classify(s: &str) -> ClassifiedHand {
        Hand::new_from_str(s).unwrap().classify().unwrap()
    }

    #[test]
    fn test_reflexive() {
        for s in [
            "AsKsQsJsTs",
            "2s2h2d5c5s",
            "AsAhKdKcQsQhJd",
            "7s5h9d2cJs",
            "Ad2c3s4h5s",
        ] {
            let hand = classify(s);
            assert_eq!(Ordering::Equal, hand.compare(&hand));
            assert!(hand.equals(&hand));
        }
    }

    #[test]
    fn test_rank_decides_first() {
        let flush = classify("2h5h7h9hJh");
        let straight = classify("AsKdQcJhTs");
        assert_eq!(Ordering::Greater, flush.compare(&straight));
        assert_eq!(Ordering::Less, straight.compare(&flush));
        assert!(!flush.equals(&straight));
    }

    #[test]
    fn test_ace_beats_king_in_same_position() {
        let aces = classify("AsAd7c5h2s");
        let kings = classify("KsKdQcJh9s");
        assert_eq!(Ordering::Greater, aces.compare(&kings));
        assert_eq!(Ordering::Less, kings.compare(&aces));
    }

    #[test]
    fn test_suits_do_not_matter() {
        let one = classify("AsAd7c5h2s");
        let two = classify("AhAc7d5s2h");
        assert_eq!(Ordering::Equal, one.compare(&two));
        assert!(one.equals(&two));
    }

    #[test]
    fn test_kicker_breaks_tie() {
        let high = classify("9s9dAc5h2s");
        let low = classify("9h9cKc5d2h");
        assert_eq!(Ordering::Greater, high.compare(&low));
        assert_eq!(Ordering::Less, low.compare(&high));
        assert!(!high.equals(&low));
    }

    #[test]
    fn test_late_kicker_breaks_tie() {
        let high = classify("Ks9d7c5h3s");
        let low = classify("Kh9c7d5s2h");
        assert_eq!(Ordering::Greater, high.compare(&low));
    }

    #[test]
    fn test_wheel_is_lowest_straight() {
        let wheel = classify("Ad2c3s4h5s");
        let six_high = classify("2d3c4s5h6s");
        assert_eq!(Ordering::Less, wheel.compare(&six_high));
        assert_eq!(Ordering::Greater, six_high.compare(&wheel));
    }

    #[test]
    fn test_broadway_beats_king_high() {
        let broadway = classify("AsKdQcJhTs");
        let king_high = classify("KsQdJcTh9s");
        assert_eq!(Ordering::Greater, broadway.compare(&king_high));
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let hands: Vec<ClassifiedHand> = [
            "AsKsQsJsTs",
            "9s9h9d9c2s",
            "2s2h2d5c5s",
            "2h5h7h9hJh",
            "AsKdQcJhTs",
            "7s7h7dKc2s",
            "AsAhKdKcQs",
            "AsAh3c4d5h",
            "7s5h9d2cJs",
        ]
        .iter()
        .map(|s| classify(s))
        .collect();

        for a in &hands {
            for b in &hands {
                assert_eq!(a.compare(b), b.compare(a).reverse());
                assert_eq!(a.compare(b) == Ordering::Equal, a.equals(b));
            }
        }
        // Listed strongest first.
        for w in hands.windows(2) {
            assert_eq!(Ordering::Greater, w[0].compare(&w[1]));
        }
    }

    #[test]
    fn test_display() {
        let hand = classify("AdAc9d8cTs");
        assert_eq!(
            "pair           : Ad, Ac\nrest of hand   : Ts, 9d, 8c\n",
            hand.to_string()
        );

        let hand = classify("AsKsQsJsTs");
        assert_eq!("straight flush : As, Ks, Qs, Js, Ts\n", hand.to_string());
    }

    #[test]
    fn test_cards_adds_up_to_five() {
        let hand = classify("AsAhKdKcQsQhJd");
        assert_eq!(5, hand.cards().count());
    }
}
