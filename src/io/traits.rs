//! Core traits for file import.
//!
//! Defines the [`FlashcardSource`] trait that format adapters implement and
//! the [`ParsedCards`] value they produce.

use super::formats::Format;
use crate::Result;
use crate::models::FlashcardRecord;

/// Records extracted from one file, plus how many source units were dropped.
///
/// A "unit" is whatever the format iterates over: a CSV line, a JSON array
/// element, a Markdown block or an Anki note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCards {
    /// Valid records in source order. Duplicates are kept.
    pub records: Vec<FlashcardRecord>,
    /// Units that did not yield a valid record.
    pub skipped: usize,
}

impl ParsedCards {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }

    /// Records a parsed unit: keeps the record, or counts the unit as skipped.
    pub fn push(&mut self, record: Option<FlashcardRecord>) {
        match record {
            Some(record) => self.records.push(record),
            None => self.skipped += 1,
        }
    }

    /// Number of valid records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no valid record was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Option<FlashcardRecord>> for ParsedCards {
    fn from_iter<I: IntoIterator<Item = Option<FlashcardRecord>>>(iter: I) -> Self {
        let mut parsed = Self::new();
        for record in iter {
            parsed.push(record);
        }
        parsed
    }
}

/// A parser for one file format.
///
/// Sources are stateless and shared between concurrent imports, so they must
/// be `Send + Sync`. Parsing is synchronous; the dispatcher decides whether to
/// run it on the blocking pool (see [`Format::is_binary`]).
///
/// # Contract
///
/// - Return `Err` only for whole-file problems (grammar, container).
/// - Never return `Err` for a single bad unit; count it in
///   [`ParsedCards::skipped`] instead.
/// - An empty [`ParsedCards`] is a valid result; emptiness is rejected one
///   layer up.
pub trait FlashcardSource: Send + Sync {
    /// The format this source parses.
    fn format(&self) -> Format;

    /// Parses file content into flashcard records.
    ///
    /// # Errors
    ///
    /// Returns an error if the content as a whole does not match the format.
    fn parse(&self, content: &str) -> Result<ParsedCards>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_counts_skipped() {
        let parsed: ParsedCards = vec![
            FlashcardRecord::new("a", "1"),
            None,
            FlashcardRecord::new("b", "2"),
            None,
        ]
        .into_iter()
        .collect();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.records[1].term(), "b");
    }

    #[test]
    fn test_empty() {
        let parsed = ParsedCards::new();
        assert!(parsed.is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}
