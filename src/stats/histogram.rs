use rand::Rng;

use crate::core::{CARDS_PER_DECK, Deck, Hand, PokerError, Rank, Rankable};

use super::{hands_per_deck, validate};

/// How often each rank came up, and out of how many hands.
///
/// Histograms only ever grow, either one hand at a time with
/// [`Histogram::record`] or by adding another one with
/// [`Histogram::merge`]. Merging is commutative and associative so partial
/// results from any number of workers combine to the same totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    counts: [u64; 9],
    samples: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal and rank random hands.
    ///
    /// Every iteration shuffles a full deck and deals it out in hands of
    /// `cards_per_hand` cards until there aren't enough cards left for
    /// another hand, so `iterations * (52 / cards_per_hand)` hands are ranked
    /// in total.
    ///
    /// # Examples
    ///
    /// ```
    /// use poker_stats::stats::Histogram;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let histogram = Histogram::sample(100, 5, &mut rng).unwrap();
    ///
    /// assert_eq!(1_000, histogram.samples());
    /// ```
    pub fn sample<R: Rng + ?Sized>(
        iterations: u32,
        cards_per_hand: usize,
        rng: &mut R,
    ) -> Result<Self, PokerError> {
        validate(iterations, cards_per_hand)?;
        let hands = hands_per_deck(cards_per_hand);

        let mut histogram = Self::new();
        let mut deck = Deck::new();
        // One buffer reused for every hand.
        let mut hand = Hand::new();
        for _ in 0..iterations {
            deck.reset();
            deck.shuffle(rng);
            for _ in 0..hands {
                hand.clear();
                deck.deal_into(&mut hand, cards_per_hand)?;
                histogram.record(hand.rank()?);
            }
        }

        debug_assert_eq!(CARDS_PER_DECK % cards_per_hand, deck.len());
        Ok(histogram)
    }

    /// Count one more hand of this rank.
    pub fn record(&mut self, rank: Rank) {
        self.counts[rank.index()] += 1;
        self.samples += 1;
    }

    /// Add every bucket of `other` into this histogram.
    pub fn merge(&mut self, other: &Histogram) {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts) {
            *count += other_count;
        }
        self.samples += other.samples;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn count(&self, rank: Rank) -> u64 {
        self.counts[rank.index()]
    }

    /// Total number of hands recorded.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Share of all samples that had this rank, `0.0` when empty.
    pub fn fraction(&self, rank: Rank) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.count(rank) as f64 / self.samples as f64
        }
    }

    /// Every rank with its count, weakest first.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, u64)> + '_ {
        Rank::ranks().into_iter().map(|r| (r, self.count(r)))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_record() {
        let mut h = Histogram::new();
        assert!(h.is_empty());
        h.record(Rank::OnePair);
        h.record(Rank::OnePair);
        h.record(Rank::Flush);

        assert_eq!(3, h.samples());
        assert_eq!(2, h.count(Rank::OnePair));
        assert_eq!(1, h.count(Rank::Flush));
        assert_eq!(0, h.count(Rank::HighCard));
        assert_relative_eq!(2.0 / 3.0, h.fraction(Rank::OnePair));
    }

    #[test]
    fn test_fraction_empty() {
        assert_eq!(0.0, Histogram::new().fraction(Rank::HighCard));
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut a = Histogram::new();
        a.record(Rank::HighCard);
        a.record(Rank::TwoPair);
        let mut b = Histogram::new();
        b.record(Rank::TwoPair);
        b.record(Rank::StraightFlush);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(4, ab.samples());
        assert_eq!(2, ab.count(Rank::TwoPair));
    }

    #[test]
    fn test_sample_accounting() {
        let mut rng = StdRng::seed_from_u64(420);
        let h = Histogram::sample(1_000, 5, &mut rng).unwrap();
        assert_eq!(1_000 * (52 / 5), h.samples());
        assert_eq!(h.samples(), h.iter().map(|(_, c)| c).sum::<u64>());
    }

    #[test]
    fn test_sample_seven_cards() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = Histogram::sample(500, 7, &mut rng).unwrap();
        assert_eq!(500 * 7, h.samples());
        assert_eq!(h.samples(), h.iter().map(|(_, c)| c).sum::<u64>());
        // With seven cards most hands have at least a pair.
        assert!(h.count(Rank::OnePair) > h.count(Rank::HighCard));
    }

    #[test]
    fn test_sample_is_repeatable() {
        let one = Histogram::sample(200, 6, &mut StdRng::seed_from_u64(9)).unwrap();
        let two = Histogram::sample(200, 6, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_sample_frequencies_are_plausible() {
        let mut rng = StdRng::seed_from_u64(2024);
        let h = Histogram::sample(2_000, 5, &mut rng).unwrap();
        // Five card odds: high card ~50.1%, one pair ~42.3%.
        assert!((0.46..0.54).contains(&h.fraction(Rank::HighCard)));
        assert!((0.38..0.46).contains(&h.fraction(Rank::OnePair)));
    }

    #[test]
    fn test_sample_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Err(PokerError::InvalidIterations(0)),
            Histogram::sample(0, 5, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidCardsPerHand(4)),
            Histogram::sample(10, 4, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidCardsPerHand(8)),
            Histogram::sample(10, 8, &mut rng)
        );
    }
}
