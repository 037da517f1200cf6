//! JSON format adapter.
//!
//! Accepts a single JSON array whose elements are objects with `term` and
//! `definition` string fields.

use super::{Format, strip_bom};
use crate::io::traits::{FlashcardSource, ParsedCards};
use crate::models::FlashcardRecord;
use crate::{Error, Result};
use serde_json::Value;

/// JSON import source.
///
/// Elements that are not objects, or whose `term` or `definition` is missing,
/// not a string, or empty, are skipped. Values are used verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

impl JsonSource {
    /// Creates a new JSON import source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_element(element: &Value) -> Option<FlashcardRecord> {
        let term = element.get("term").and_then(Value::as_str)?;
        let definition = element.get("definition").and_then(Value::as_str)?;
        FlashcardRecord::new(term, definition)
    }
}

impl FlashcardSource for JsonSource {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, content: &str) -> Result<ParsedCards> {
        let value: Value = serde_json::from_str(strip_bom(content))
            .map_err(|e| Error::MalformedInput(format!("failed to parse JSON: {e}")))?;

        let Value::Array(elements) = value else {
            return Err(Error::MalformedInput(
                "JSON root must be an array of flashcards".to_string(),
            ));
        };

        Ok(elements.iter().map(Self::parse_element).collect())
    }
}
