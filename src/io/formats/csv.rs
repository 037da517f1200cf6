//! CSV format adapter.
//!
//! Two columns, comma-delimited, no header, no quoting or escaping. The first
//! comma on a line separates the term from the definition, so definitions may
//! contain further commas: `list,a,b` yields the definition `a,b`, not `a`.
//! Nothing after the second comma is dropped.
//!
//! A leading UTF-8 byte-order mark is ignored.

use super::{Format, strip_bom};
use crate::Result;
use crate::io::traits::{FlashcardSource, ParsedCards};
use crate::models::FlashcardRecord;

/// CSV import source.
///
/// Fields are trimmed; a line whose term or definition is empty after
/// trimming is skipped. Blank lines are ignored without being counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSource;

impl CsvSource {
    /// Creates a new CSV import source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses one line into a record.
    fn parse_line(line: &str) -> Option<FlashcardRecord> {
        let (term, definition) = line.split_once(',')?;
        FlashcardRecord::trimmed(term, definition)
    }
}

impl FlashcardSource for CsvSource {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn parse(&self, content: &str) -> Result<ParsedCards> {
        // `lines` strips the `\r` of CRLF endings.
        Ok(strip_bom(content)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_line)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParsedCards {
        CsvSource::new().parse(input).unwrap()
    }

    #[test]
    fn test_basic_csv() {
        let parsed = parse("Dog,A canine\nCat,A feline\n");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records[0].term(), "Dog");
        assert_eq!(parsed.records[0].definition(), "A canine");
        assert_eq!(parsed.records[1].term(), "Cat");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("A,1\r\nB,2\r\n");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.records[0].definition(), "1");
        assert_eq!(parsed.records[1].definition(), "2");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let parsed = parse("no comma here\n,missing term\nmissing definition,\nok,fine");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.skipped, 3);
        assert_eq!(parsed.records[0].term(), "ok");
    }

    #[test]
    fn test_whitespace_only_fields_are_skipped() {
        let parsed = parse("  ,definition\nterm,   \n  term , definition  ");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.records[0].term(), "term");
        assert_eq!(parsed.records[0].definition(), "definition");
    }

    #[test]
    fn test_definition_keeps_extra_commas() {
        let parsed = parse("list,a, b, c");

        assert_eq!(parsed.records[0].definition(), "a, b, c");
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let parsed = parse("\u{feff}Dog,A canine\nCat,A feline");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.records[0].term().as_bytes(), b"Dog");
    }

    #[test]
    fn test_blank_lines_are_not_counted() {
        let parsed = parse("\n\nA,1\n\n   \nB,2\n\n");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let parsed = parse("A,1\nA,1\nB,2");

        let terms: Vec<_> = parsed.records.iter().map(FlashcardRecord::term).collect();
        assert_eq!(terms, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse("");
        assert!(parsed.is_empty());
    }
}
