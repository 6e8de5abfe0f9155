use std::cmp::Reverse;
use std::fmt;

use super::{Card, ClassifiedHand, Hand, MAX_CARDS, MIN_CARDS, PokerError, Value};

/// All the different possible hand ranks, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// The lowest rank.
    /// No matches
    HighCard,
    /// One Card matches another.
    OnePair,
    /// Two diffent pair of matching cards.
    TwoPair,
    /// Three of the same value.
    ThreeOfAKind,
    /// Five cards in a sequence
    Straight,
    /// Five cards of the same suit
    Flush,
    /// Three of one value and two of another value
    FullHouse,
    /// Four of the same value.
    FourOfAKind,
    /// Five cards in a sequence all fo the same suit.
    StraightFlush,
}

const RANKS: [Rank; 9] = [
    Rank::HighCard,
    Rank::OnePair,
    Rank::TwoPair,
    Rank::ThreeOfAKind,
    Rank::Straight,
    Rank::Flush,
    Rank::FullHouse,
    Rank::FourOfAKind,
    Rank::StraightFlush,
];

impl Rank {
    /// Every rank from weakest to strongest.
    pub fn ranks() -> [Rank; 9] {
        RANKS
    }

    /// Position of this rank in [`Rank::ranks`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::HighCard => "high card",
            Rank::OnePair => "pair",
            Rank::TwoPair => "two pair",
            Rank::ThreeOfAKind => "three of a kind",
            Rank::Straight => "straight",
            Rank::Flush => "flush",
            Rank::FullHouse => "full house",
            Rank::FourOfAKind => "four of a kind",
            Rank::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of cards in a straight or a straight flush.
const SEQUENCE: usize = 5;

/// Can this turn into a hand rank?
pub trait Rankable {
    /// The cards to rank.
    fn cards(&self) -> &[Card];

    /// Rank the cards without computing the kicker.
    ///
    /// This is what the monte carlo code calls on every dealt hand.
    fn rank(&self) -> Result<Rank, PokerError> {
        let cards = checked(self.cards())?;
        Ok(find_hand(cards).rank)
    }

    /// Classify the best five card hand.
    ///
    /// It doesn't do any caching so it's left up to the user to understand
    /// that duplicate work will be done if this is called more than once.
    /// See [`crate::core::PokerHand`] for a memoized version.
    fn classify(&self) -> Result<ClassifiedHand, PokerError> {
        let cards = checked(self.cards())?;
        let found = find_hand(cards);
        let kicker = kicker(cards, &found.primary);
        Ok(ClassifiedHand::new(found.rank, found.primary, kicker))
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> &[Card] {
        self
    }
}

impl Rankable for Hand {
    fn cards(&self) -> &[Card] {
        Hand::cards(self)
    }
}

fn checked(cards: &[Card]) -> Result<&[Card], PokerError> {
    match cards.len() {
        n if n < MIN_CARDS => Err(PokerError::TooFewCards(n)),
        n if n > MAX_CARDS => Err(PokerError::TooManyCards(n)),
        _ => Ok(cards),
    }
}

/// The rank together with the cards that make it.
struct Found {
    rank: Rank,
    primary: Vec<Card>,
}

impl Found {
    fn new(rank: Rank, primary: Vec<Card>) -> Option<Self> {
        Some(Self { rank, primary })
    }
}

fn find_hand(cards: &[Card]) -> Found {
    let mut suits: [Vec<Card>; 4] = Default::default();
    // Indexed by face rank, slot 0 stays empty.
    let mut values: [Vec<Card>; 14] = Default::default();
    for c in cards {
        suits[c.suit as usize].push(*c);
        values[usize::from(c.rank())].push(*c);
    }

    find_suited(cards.len(), &mut suits)
        .or_else(|| find_grouped(&values))
        .unwrap_or_else(|| Found {
            rank: Rank::HighCard,
            primary: vec![high_card(cards)],
        })
}

/// Straight flush or flush.
fn find_suited(total: usize, suits: &mut [Vec<Card>; 4]) -> Option<Found> {
    // With n cards at most n - 4 suits can be present if any of them holds
    // five cards.
    let distinct = suits.iter().filter(|s| !s.is_empty()).count();
    if distinct + MIN_CARDS > total + 1 {
        return None;
    }

    let suited = suits.iter_mut().find(|s| s.len() >= MIN_CARDS)?;
    // Descending, so an Ace (rank 1) sits last.
    suited.sort_by_key(|c| Reverse(c.rank()));
    let ace = suited.last().is_some_and(|c| c.value.is_ace());

    if ace && suited[SEQUENCE - 2].value == Value::Ten {
        // K Q J T at the top, the Ace completes the royal run.
        suited.rotate_right(1);
        return Found::new(Rank::StraightFlush, suited[..SEQUENCE].to_vec());
    }

    if let Some(i) = find_run(suited, |c| c.rank()) {
        return Found::new(Rank::StraightFlush, suited[i..i + SEQUENCE].to_vec());
    }

    if ace {
        suited.rotate_right(1);
    }
    Found::new(Rank::Flush, suited[..MIN_CARDS].to_vec())
}

/// Everything decided by rank groups: straight, four of a kind, full house,
/// three of a kind, two pair and pair.
fn find_grouped(values: &[Vec<Card>; 14]) -> Option<Found> {
    let mut groups: Vec<&[Card]> = values
        .iter()
        .rev()
        .filter(|g| !g.is_empty())
        .map(Vec::as_slice)
        .collect();
    let ace = groups
        .last()
        .map(|g| g[0])
        .filter(|c| c.value.is_ace());

    if let Some(found) = find_straight(&groups, ace) {
        return Some(found);
    }

    // Aces beat every other group of the same size.
    if ace.is_some() {
        groups.rotate_right(1);
    }

    let mut three: Vec<Card> = Vec::with_capacity(3);
    let mut pairs: Vec<Card> = Vec::with_capacity(6);
    for group in groups {
        let full = match group.len() {
            4 => return Found::new(Rank::FourOfAKind, group.to_vec()),
            3 => full_house(group, &mut three, &pairs),
            2 => full_house(group, &mut pairs, &three),
            _ => None,
        };
        if full.is_some() {
            return full;
        }
    }

    match pairs.len() {
        2 => Found::new(Rank::OnePair, pairs),
        n if n > 2 => Found::new(Rank::TwoPair, pairs[..4].to_vec()),
        _ if !three.is_empty() => Found::new(Rank::ThreeOfAKind, three),
        _ => None,
    }
}

fn find_straight(groups: &[&[Card]], ace: Option<Card>) -> Option<Found> {
    if groups.len() < SEQUENCE {
        return None;
    }

    if let Some(ace) = ace.filter(|_| groups[SEQUENCE - 2][0].value == Value::Ten) {
        let primary = std::iter::once(ace)
            .chain(groups[..SEQUENCE - 1].iter().map(|g| g[0]))
            .collect();
        return Found::new(Rank::Straight, primary);
    }

    let i = find_run(groups, |g| g[0].rank())?;
    Found::new(
        Rank::Straight,
        groups[i..i + SEQUENCE].iter().map(|g| g[0]).collect(),
    )
}

/// Index of the first window of five descending items whose top rank is
/// exactly four above its bottom rank.
///
/// Given 10, 8, 6, 5, 4, 3, 2 the windows starting at 10 and 8 fail and the
/// one starting at 6 is the run. Aces are rank 1 here, so 5 4 3 2 A is a run
/// as well.
fn find_run<T>(items: &[T], rank: impl Fn(&T) -> u8) -> Option<usize> {
    items
        .windows(SEQUENCE)
        .position(|w| rank(&w[0]) == rank(&w[SEQUENCE - 1]) + (SEQUENCE as u8 - 1))
}

/// Record a pair or three, completing a full house if possible.
///
/// `same` collects the groups of the same size as `group` and `complement`
/// the ones that complete it.
fn full_house(group: &[Card], same: &mut Vec<Card>, complement: &[Card]) -> Option<Found> {
    if !complement.is_empty() {
        let primary = if group.len() == 2 {
            [complement, group].concat()
        } else {
            [group, &complement[..2]].concat()
        };
        return Found::new(Rank::FullHouse, primary);
    }

    // A second three, the higher one was seen first.
    if same.len() == 3 {
        let primary = [same.as_slice(), &group[..2]].concat();
        return Found::new(Rank::FullHouse, primary);
    }

    same.extend_from_slice(group);
    None
}

fn high_card(cards: &[Card]) -> Card {
    cards
        .iter()
        .copied()
        .max_by_key(|c| c.ace_high_rank())
        .unwrap_or(cards[0])
}

/// The highest cards outside `primary` that complete a five card hand.
fn kicker(cards: &[Card], primary: &[Card]) -> Vec<Card> {
    let rest = MIN_CARDS.saturating_sub(primary.len());
    let mut remaining: Vec<Card> = cards
        .iter()
        .filter(|c| !primary.contains(c))
        .copied()
        .collect();
    remaining.sort_by_key(|c| Reverse(c.ace_high_rank()));
    remaining.truncate(rest);
    remaining
}
