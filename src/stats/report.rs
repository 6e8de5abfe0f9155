use std::fmt;

use crate::core::{CARDS_PER_DECK, Rank};

use super::{Histogram, Operation, hands_per_deck};

/// One line of a [`StatsReport`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportRow {
    pub rank: Rank,
    pub count: u64,
    pub fraction: f64,
}

/// A snapshot of collected stats, ready to print.
///
/// The text form lists every rank that came up at least once. Before any
/// hands are dealt only the header is printed, with the operation in place
/// of the sample count.
///
///
/// ```text
/// cards per hand = 5
/// hands per deck = 10, (52 / 5 = cards per deck / cards per hand)
/// iterations     = 1
/// samples        = 10, (10 * 1 = hands per deck * iterations)
///
/// high card      :  6 ->   60.000%
/// pair           :  4 ->   40.000%
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatsReport {
    pub cards_per_hand: usize,
    pub operation: Operation,
    pub hands_per_deck: usize,
    pub iterations: u64,
    pub samples: u64,
    pub rows: Vec<ReportRow>,
}

impl StatsReport {
    pub fn new(cards_per_hand: usize, operation: Operation, histogram: &Histogram) -> Self {
        let hands_per_deck = hands_per_deck(cards_per_hand);
        let samples = histogram.samples();
        let rows = histogram
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(rank, count)| ReportRow {
                rank,
                count,
                fraction: histogram.fraction(rank),
            })
            .collect();
        Self {
            cards_per_hand,
            operation,
            hands_per_deck,
            iterations: samples.checked_div(hands_per_deck as u64).unwrap_or(0),
            samples,
            rows,
        }
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `1234567` as `"1,234,567"`.
fn with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The sample count is the widest number in the report.
        let width = with_commas(self.samples).len();

        writeln!(f, "cards per hand = {}", self.cards_per_hand)?;
        writeln!(
            f,
            "hands per deck = {:<width$}, ({} / {} = cards per deck / cards per hand)",
            self.hands_per_deck, CARDS_PER_DECK, self.cards_per_hand
        )?;

        let iterations = with_commas(self.iterations);
        writeln!(f, "iterations     = {iterations}")?;
        if self.samples == 0 {
            return writeln!(f, "operation      = {}", self.operation);
        }

        writeln!(
            f,
            "samples        = {:<width$}, ({} * {} = hands per deck * iterations)",
            with_commas(self.samples),
            self.hands_per_deck,
            iterations
        )?;
        writeln!(f)?;

        for row in &self.rows {
            writeln!(
                f,
                "{:<15}: {:>width$} -> {:8.3}%",
                row.rank.label(),
                with_commas(row.count),
                row.fraction * 100.0
            )?;
        }
        Ok(())
    }
}
