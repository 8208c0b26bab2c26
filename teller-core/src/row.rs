//! Parsed transaction rows and in-batch duplicate detection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which side of the ledger a row posts to. Pasted statement text doesn't
/// say, so every row starts as a credit and the reviewer flips the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }
}

/// Identity of a transaction within one pasted batch.
///
/// Compared as a structured value (date, uppercased whitespace-collapsed
/// description, comma-stripped amount) rather than a concatenated string,
/// so no characters inside a description can collide with another row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    pub date: NaiveDate,
    pub description: String,
    pub amount: String,
}

impl DedupeKey {
    pub fn new(date: NaiveDate, description: &str, amount: &str) -> Self {
        Self {
            date,
            description: normalize_description(description).to_uppercase(),
            amount: amount.replace(',', ""),
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_description(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One candidate transaction awaiting review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    /// 1-based position within the parse batch
    pub id: u32,
    pub date: NaiveDate,
    pub description: String,
    /// Decimal string with thousands separators stripped. Kept as text so
    /// the value reaches the ledger without a binary-float round-trip.
    pub amount: String,
    pub direction: Direction,
    /// True when an earlier row in the same batch has the same identity.
    pub duplicate: bool,
}

impl ParsedRow {
    pub fn dedupe_key(&self) -> DedupeKey {
        DedupeKey::new(self.date, &self.description, &self.amount)
    }
}

/// Flag repeated rows within one batch.
///
/// The first occurrence of each key stays unflagged; every later row with
/// the same key is marked duplicate. Nothing is removed here — excluding
/// duplicates is the submitter's decision, not the parser's.
pub fn mark_duplicates(rows: &mut [ParsedRow]) {
    let mut seen: HashSet<DedupeKey> = HashSet::new();
    for row in rows.iter_mut() {
        row.duplicate = !seen.insert(row.dedupe_key());
    }
}
