//! The term/definition pair extracted from a source file.

use serde::Serialize;

/// A term/definition pair extracted from a source file.
///
/// Both fields are guaranteed non-empty: the only constructor refuses empty
/// strings. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlashcardRecord {
    term: String,
    definition: String,
}

impl FlashcardRecord {
    /// Creates a record, or `None` if either field is empty.
    ///
    /// Values are stored verbatim; callers decide whether to trim first.
    #[must_use]
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Option<Self> {
        let term = term.into();
        let definition = definition.into();
        if term.is_empty() || definition.is_empty() {
            return None;
        }
        Some(Self { term, definition })
    }

    /// Creates a record from trimmed copies of both fields.
    ///
    /// Returns `None` if either field is empty after trimming.
    #[must_use]
    pub fn trimmed(term: &str, definition: &str) -> Option<Self> {
        Self::new(term.trim(), definition.trim())
    }

    /// The front of the card.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The back of the card.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Consumes the record, returning `(term, definition)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.term, self.definition)
    }
}
