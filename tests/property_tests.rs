//! Property-based tests for the format parsers.
//!
//! Uses proptest to verify invariants across random inputs:
//! - CSV record count matches the number of well-formed lines
//! - Parsed records never carry empty fields
//! - Extension matching is case-insensitive
//! - Title derivation only strips the final extension

#![allow(clippy::expect_used, clippy::unwrap_used)]

use deckport::io::formats::csv::CsvSource;
use deckport::io::formats::json::JsonSource;
use deckport::io::formats::markdown::MarkdownSource;
use deckport::io::{FlashcardSource, ImportValidator};
use deckport::{Error, Format};
use proptest::prelude::*;

/// A field that survives trimming and contains no separators.
fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,15}[A-Za-z0-9]|[A-Za-z0-9]"
}

proptest! {
    /// Property: well-formed two-column CSV yields one record per line.
    #[test]
    fn prop_csv_count_matches_lines(rows in prop::collection::vec((field(), field()), 0..40)) {
        let content = rows
            .iter()
            .map(|(t, d)| format!("{t},{d}"))
            .collect::<Vec<_>>()
            .join("\n");

        let parsed = CsvSource::new().parse(&content).unwrap();
        prop_assert_eq!(parsed.len(), rows.len());
        prop_assert_eq!(parsed.skipped, 0);
        for (record, (t, d)) in parsed.records.iter().zip(&rows) {
            prop_assert_eq!(record.term(), t.as_str());
            prop_assert_eq!(record.definition(), d.as_str());
        }
    }

    /// Property: the CSV parser never fails and never emits empty fields.
    #[test]
    fn prop_csv_never_fails(content in "[ -~\r\n]{0,300}") {
        let parsed = CsvSource::new().parse(&content).unwrap();
        for record in &parsed.records {
            prop_assert!(!record.term().is_empty());
            prop_assert!(!record.definition().is_empty());
        }
    }

    /// Property: Markdown blocks of two bullet lines become records.
    #[test]
    fn prop_markdown_blocks(cards in prop::collection::vec((field(), field()), 0..20)) {
        let content = cards
            .iter()
            .map(|(t, d)| format!("- {t}\n- {d}"))
            .collect::<Vec<_>>()
            .join("\n\n");

        let parsed = MarkdownSource::new().parse(&content).unwrap();
        prop_assert_eq!(parsed.len(), cards.len());
    }

    /// Property: JSON arrays of term/definition objects round through the parser.
    #[test]
    fn prop_json_array(cards in prop::collection::vec((field(), field()), 0..20)) {
        let value: Vec<_> = cards
            .iter()
            .map(|(t, d)| serde_json::json!({ "term": t, "definition": d }))
            .collect();
        let content = serde_json::to_string(&value).unwrap();

        let parsed = JsonSource::new().parse(&content).unwrap();
        prop_assert_eq!(parsed.len(), cards.len());
    }

    /// Property: a non-array JSON root is always malformed.
    #[test]
    fn prop_json_non_array_rejected(n in any::<i64>(), s in "[a-z]{0,10}") {
        for content in [n.to_string(), format!("\"{s}\""), format!("{{\"term\":\"{s}\"}}")] {
            let result = JsonSource::new().parse(&content);
            prop_assert!(matches!(result, Err(Error::MalformedInput(_))));
        }
    }

    /// Property: extension matching ignores case.
    #[test]
    fn prop_extension_case_insensitive(stem in "[a-z]{1,10}", idx in 0usize..4, upper in any::<bool>()) {
        let format = Format::all()[idx];
        let ext = format.extensions()[0];
        let ext = if upper { ext.to_uppercase() } else { ext.to_string() };
        prop_assert_eq!(Format::from_file_name(&format!("{stem}.{ext}")).unwrap(), format);
    }

    /// Property: the title is the file name minus its last extension.
    #[test]
    fn prop_title_strips_last_extension(stem in "[A-Za-z0-9 ._-]{0,20}[A-Za-z0-9]", ext in "[a-z]{1,8}") {
        let title = ImportValidator::derive_title(&format!("{stem}.{ext}"));
        prop_assert_eq!(title, stem);
    }
}
