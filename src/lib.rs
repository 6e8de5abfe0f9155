//! # Poker Stats
//!
//! Poker Stats classifies poker hands of five to seven cards, compares the
//! results, and estimates how often each hand comes up by dealing random
//! decks.
//!
//! ## Classifying hands
//!
//! ```
//! use poker_stats::core::{Hand, Rank, Rankable};
//!
//! let hand = Hand::new_from_str("AsKsQsJsTs9d2c").unwrap();
//! let classified = hand.classify().unwrap();
//!
//! assert_eq!(Rank::StraightFlush, classified.rank());
//! assert_eq!(5, classified.primary().len());
//! assert!(classified.kicker().is_empty());
//! ```
//!
//! ## Comparing hands
//!
//! [`core::PokerHand`] remembers its classification until the cards change.
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use poker_stats::core::PokerHand;
//!
//! let mut pair = PokerHand::new_from_str("KdKh9c5s2d").unwrap();
//! let mut two_pair = PokerHand::new_from_str("3c3d2h2s9c").unwrap();
//!
//! assert_eq!(Ordering::Greater, two_pair.compare(&mut pair).unwrap());
//! ```
//!
//! ## Hand frequencies
//!
//! ```
//! use poker_stats::stats::PokerStats;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut stats = PokerStats::new();
//! stats.update(1_000, 5, &mut StdRng::seed_from_u64(1)).unwrap();
//!
//! assert_eq!(10_000, stats.samples());
//! println!("{}", stats.report());
//! ```

/// Cards, hands, and everything needed to classify and compare them.
pub mod core;
/// Monte carlo hand frequencies.
pub mod stats;
