use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::{event, trace_span};

use crate::core::{MAX_CARDS, MIN_CARDS, PokerError};

use super::{Histogram, StatsReport, hands_per_deck, validate};

/// What to do with the samples already collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Throw away the current histogram first.
    #[default]
    Replace,
    /// Add to the current histogram. The number of cards per hand has to
    /// match, different hand sizes have different odds.
    Append,
}

impl FromStr for Operation {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" | "update" => Ok(Operation::Replace),
            "append" => Ok(Operation::Append),
            _ => Err(PokerError::UnknownOperation(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Replace => f.write_str("replace"),
            Operation::Append => f.write_str("append"),
        }
    }
}

/// Iterations handed to a single parallel worker.
#[cfg(feature = "parallel")]
const SHARD_ITERATIONS: u32 = 256;

/// Hand frequencies collected over one or more runs.
///
/// # Examples
///
/// ```
/// use poker_stats::stats::PokerStats;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut stats = PokerStats::new();
///
/// stats.update(100, 7, &mut rng).unwrap();
/// stats.append(100, 7, &mut rng).unwrap();
/// assert_eq!(1_400, stats.samples());
///
/// // Six card hands can't be mixed into seven card stats.
/// assert!(stats.append(100, 6, &mut rng).is_err());
/// assert_eq!(1_400, stats.samples());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StatsParts"))]
pub struct PokerStats {
    cards_per_hand: usize,
    operation: Operation,
    histogram: Histogram,
}

impl Default for PokerStats {
    fn default() -> Self {
        Self {
            cards_per_hand: MAX_CARDS,
            operation: Operation::default(),
            histogram: Histogram::default(),
        }
    }
}

/// `PokerStats` as it is read back, before the hand size is checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StatsParts {
    cards_per_hand: usize,
    operation: Operation,
    histogram: Histogram,
}

#[cfg(feature = "serde")]
impl TryFrom<StatsParts> for PokerStats {
    type Error = PokerError;

    fn try_from(parts: StatsParts) -> Result<Self, Self::Error> {
        if !(MIN_CARDS..=MAX_CARDS).contains(&parts.cards_per_hand) {
            return Err(PokerError::InvalidCardsPerHand(parts.cards_per_hand));
        }
        Ok(Self {
            cards_per_hand: parts.cards_per_hand,
            operation: parts.operation,
            histogram: parts.histogram,
        })
    }
}

impl PokerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards_per_hand(&self) -> usize {
        self.cards_per_hand
    }

    pub fn hands_per_deck(&self) -> usize {
        hands_per_deck(self.cards_per_hand)
    }

    /// The operation of the last successful run.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn samples(&self) -> u64 {
        self.histogram.samples()
    }

    /// Number of shuffled decks behind the current samples.
    pub fn iterations(&self) -> u64 {
        self.samples()
            .checked_div(self.hands_per_deck() as u64)
            .unwrap_or(0)
    }

    /// Replace the current stats with a fresh run.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        iterations: u32,
        cards_per_hand: usize,
        rng: &mut R,
    ) -> Result<(), PokerError> {
        self.generate(iterations, cards_per_hand, Operation::Replace, rng)
    }

    /// Add a new run to the current stats.
    pub fn append<R: Rng + ?Sized>(
        &mut self,
        iterations: u32,
        cards_per_hand: usize,
        rng: &mut R,
    ) -> Result<(), PokerError> {
        self.generate(iterations, cards_per_hand, Operation::Append, rng)
    }

    /// Deal `iterations` decks into hands of `cards_per_hand` cards and
    /// count their ranks.
    ///
    /// The parameters are checked before anything is dealt, and on error the
    /// current stats are left as they were.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        iterations: u32,
        cards_per_hand: usize,
        operation: Operation,
        rng: &mut R,
    ) -> Result<(), PokerError> {
        let span = trace_span!("PokerStats::generate", iterations, cards_per_hand, %operation);
        let _enter = span.enter();

        self.check(iterations, cards_per_hand, operation)?;
        let histogram = Histogram::sample(iterations, cards_per_hand, rng)?;
        self.commit(cards_per_hand, operation, histogram);
        Ok(())
    }

    /// Like [`PokerStats::generate`], with the iterations split across
    /// rayon's thread pool.
    ///
    /// Iterations are cut into fixed size shards. A generator seeded with
    /// `seed` hands out one seed per shard, so runs with different seeds
    /// don't share streams. The result only depends on the arguments, not on
    /// how many threads ran it.
    #[cfg(feature = "parallel")]
    pub fn generate_parallel(
        &mut self,
        iterations: u32,
        cards_per_hand: usize,
        operation: Operation,
        seed: u64,
    ) -> Result<(), PokerError> {
        use rand::{SeedableRng, rngs::StdRng};
        use rayon::prelude::*;

        let span = trace_span!("PokerStats::generate_parallel", iterations, cards_per_hand, %operation);
        let _enter = span.enter();

        self.check(iterations, cards_per_hand, operation)?;
        let shards = iterations.div_ceil(SHARD_ITERATIONS);
        event!(
            tracing::Level::DEBUG,
            shards,
            threads = rayon::current_num_threads(),
            "Sharding iterations"
        );

        let mut seeder = StdRng::seed_from_u64(seed);
        let seeds: Vec<u64> = (0..shards).map(|_| seeder.random()).collect();

        let histogram = seeds
            .into_par_iter()
            .enumerate()
            .map(|(shard, shard_seed)| {
                let start = shard as u32 * SHARD_ITERATIONS;
                let n = SHARD_ITERATIONS.min(iterations - start);
                let mut rng = StdRng::seed_from_u64(shard_seed);
                Histogram::sample(n, cards_per_hand, &mut rng)
            })
            .try_reduce(Histogram::new, |mut a, b| {
                a.merge(&b);
                Ok(a)
            })?;

        self.commit(cards_per_hand, operation, histogram);
        Ok(())
    }

    /// Add another set of stats built with the same number of cards per
    /// hand.
    pub fn merge(&mut self, other: &PokerStats) -> Result<(), PokerError> {
        if other.histogram.is_empty() {
            return Ok(());
        }
        if !self.histogram.is_empty() && self.cards_per_hand != other.cards_per_hand {
            return Err(PokerError::CardsPerHandMismatch {
                existing: self.cards_per_hand,
                requested: other.cards_per_hand,
            });
        }
        self.cards_per_hand = other.cards_per_hand;
        self.histogram.merge(&other.histogram);
        Ok(())
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.histogram.clear();
    }

    pub fn report(&self) -> StatsReport {
        StatsReport::new(self.cards_per_hand, self.operation, &self.histogram)
    }

    fn check(
        &self,
        iterations: u32,
        cards_per_hand: usize,
        operation: Operation,
    ) -> Result<(), PokerError> {
        validate(iterations, cards_per_hand)?;
        // Only an existing histogram pins the hand size.
        if operation == Operation::Append
            && !self.histogram.is_empty()
            && self.cards_per_hand != cards_per_hand
        {
            event!(
                tracing::Level::WARN,
                existing = self.cards_per_hand,
                requested = cards_per_hand,
                "Refusing to append stats for a different hand size"
            );
            return Err(PokerError::CardsPerHandMismatch {
                existing: self.cards_per_hand,
                requested: cards_per_hand,
            });
        }
        Ok(())
    }

    fn commit(&mut self, cards_per_hand: usize, operation: Operation, histogram: Histogram) {
        event!(
            tracing::Level::DEBUG,
            samples = histogram.samples(),
            %operation,
            "Generated hands"
        );
        match operation {
            Operation::Replace => self.histogram = histogram,
            Operation::Append => self.histogram.merge(&histogram),
        }
        self.cards_per_hand = cards_per_hand;
        self.operation = operation;
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::Rank;

    #[test]
    fn test_operation_from_str() {
        assert_eq!(Ok(Operation::Replace), "replace".parse());
        assert_eq!(Ok(Operation::Replace), "UPDATE".parse());
        assert_eq!(Ok(Operation::Append), "append".parse());
        assert_eq!(
            Err(PokerError::UnknownOperation("merge".to_string())),
            "merge".parse::<Operation>()
        );
    }

    #[test_log::test]
    fn test_update_replaces() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut stats = PokerStats::new();
        stats.update(100, 5, &mut rng).unwrap();
        assert_eq!(1_000, stats.samples());
        assert_eq!(5, stats.cards_per_hand());

        stats.update(50, 7, &mut rng).unwrap();
        assert_eq!(350, stats.samples());
        assert_eq!(7, stats.cards_per_hand());
        assert_eq!(50, stats.iterations());
    }

    #[test_log::test]
    fn test_append_accumulates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut stats = PokerStats::new();
        stats.append(100, 6, &mut rng).unwrap();
        stats.append(100, 6, &mut rng).unwrap();
        assert_eq!(2 * 100 * 8, stats.samples());
        assert_eq!(200, stats.iterations());
        assert_eq!(
            stats.samples(),
            stats.histogram().iter().map(|(_, c)| c).sum::<u64>()
        );
    }

    #[test_log::test]
    fn test_append_mismatch_leaves_stats_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut stats = PokerStats::new();
        stats.update(100, 5, &mut rng).unwrap();
        let before = stats.clone();

        assert_eq!(
            Err(PokerError::CardsPerHandMismatch {
                existing: 5,
                requested: 7
            }),
            stats.append(100, 7, &mut rng)
        );
        assert_eq!(before, stats);
    }

    #[test]
    fn test_invalid_parameters_leave_stats_untouched() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut stats = PokerStats::new();
        stats.update(10, 5, &mut rng).unwrap();
        let before = stats.clone();

        assert_eq!(
            Err(PokerError::InvalidIterations(0)),
            stats.update(0, 5, &mut rng)
        );
        assert_eq!(
            Err(PokerError::InvalidCardsPerHand(8)),
            stats.update(10, 8, &mut rng)
        );
        assert_eq!(before, stats);
    }

    #[test]
    fn test_append_to_empty_adopts_hand_size() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut stats = PokerStats::new();
        assert_eq!(7, stats.cards_per_hand());
        stats.append(10, 5, &mut rng).unwrap();
        assert_eq!(5, stats.cards_per_hand());
    }

    #[test]
    fn test_clear() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut stats = PokerStats::new();
        stats.update(10, 7, &mut rng).unwrap();
        stats.clear();
        assert_eq!(0, stats.samples());
        assert_eq!(0, stats.iterations());
        // Anything can be appended after a clear.
        stats.append(10, 5, &mut rng).unwrap();
    }

    #[test]
    fn test_merge() {
        let mut one = PokerStats::new();
        one.update(300, 5, &mut StdRng::seed_from_u64(10)).unwrap();
        let mut two = PokerStats::new();
        two.update(700, 5, &mut StdRng::seed_from_u64(11)).unwrap();

        let mut merged = one.clone();
        merged.merge(&two).unwrap();
        assert_eq!(1_000 * 10, merged.samples());
        for rank in Rank::ranks() {
            assert_eq!(
                one.histogram().count(rank) + two.histogram().count(rank),
                merged.histogram().count(rank)
            );
        }

        let mut single = PokerStats::new();
        single.update(1_000, 5, &mut StdRng::seed_from_u64(12)).unwrap();
        assert_eq!(single.samples(), merged.samples());
    }

    #[test]
    fn test_merge_mismatch() {
        let mut five = PokerStats::new();
        five.update(10, 5, &mut StdRng::seed_from_u64(13)).unwrap();
        let mut seven = PokerStats::new();
        seven.update(10, 7, &mut StdRng::seed_from_u64(14)).unwrap();
        let before = five.clone();

        assert!(five.merge(&seven).is_err());
        assert_eq!(before, five);
    }

    #[cfg(feature = "parallel")]
    #[test_log::test]
    fn test_generate_parallel() {
        let mut stats = PokerStats::new();
        stats
            .generate_parallel(1_000, 5, Operation::Replace, 42)
            .unwrap();
        assert_eq!(10_000, stats.samples());
        assert_eq!(
            stats.samples(),
            stats.histogram().iter().map(|(_, c)| c).sum::<u64>()
        );

        let mut again = PokerStats::new();
        again
            .generate_parallel(1_000, 5, Operation::Replace, 42)
            .unwrap();
        assert_eq!(stats, again);

        stats
            .generate_parallel(300, 5, Operation::Append, 43)
            .unwrap();
        assert_eq!(13_000, stats.samples());
        assert!(
            stats
                .generate_parallel(300, 6, Operation::Append, 43)
                .is_err()
        );
        assert_eq!(13_000, stats.samples());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_generate_parallel_neighbour_seeds_are_independent() {
        let mut single = PokerStats::new();
        single
            .generate_parallel(512, 5, Operation::Replace, 42)
            .unwrap();

        let mut split = PokerStats::new();
        split
            .generate_parallel(256, 5, Operation::Replace, 42)
            .unwrap();
        split
            .generate_parallel(256, 5, Operation::Append, 43)
            .unwrap();

        assert_eq!(single.samples(), split.samples());
        assert_ne!(single.histogram(), split.histogram());
    }

    #[test]
    fn test_operation_is_remembered() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut stats = PokerStats::new();
        assert_eq!(Operation::Replace, stats.operation());
        stats.append(10, 5, &mut rng).unwrap();
        assert_eq!(Operation::Append, stats.operation());

        // A rejected run changes nothing.
        assert!(stats.update(0, 5, &mut rng).is_err());
        assert_eq!(Operation::Append, stats.operation());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_checks_hand_size() {
        let mut stats = PokerStats::new();
        stats.update(10, 6, &mut StdRng::seed_from_u64(16)).unwrap();

        let json = serde_json::to_string(&stats).unwrap();
        let back: PokerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);

        for cards_per_hand in [0, 4, 8, 53] {
            let bad = json.replace(
                "\"cards_per_hand\":6",
                &format!("\"cards_per_hand\":{cards_per_hand}"),
            );
            assert!(serde_json::from_str::<PokerStats>(&bad).is_err());
        }
    }
}
