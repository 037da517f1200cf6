//! Format adapters for file import.
//!
//! Each format implements [`FlashcardSource`].

pub mod apkg;
pub mod csv;
pub mod json;
pub mod markdown;

use crate::{Error, Result};
use std::str::FromStr;
use std::sync::Arc;

use super::traits::FlashcardSource;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    /// Comma-separated term/definition lines.
    Csv,
    /// JSON array of term/definition objects.
    Json,
    /// Blank-line separated Markdown blocks.
    Markdown,
    /// Anki package (zip container with an embedded collection database).
    Apkg,
}

impl Format {
    /// Returns every supported format.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Markdown, Self::Apkg]
    }

    /// Returns the canonical name of this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Apkg => "apkg",
        }
    }

    /// Returns the file extensions recognized for this format.
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Csv => &["csv"],
            Self::Json => &["json"],
            Self::Markdown => &["md", "markdown"],
            Self::Apkg => &["apkg"],
        }
    }

    /// Returns whether file content arrives base64-encoded.
    ///
    /// Binary formats are also the ones whose parsing blocks on I/O.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Apkg)
    }

    /// Detects format from a bare extension (case-insensitive, no dot).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the extension is not recognized.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            "apkg" => Ok(Self::Apkg),
            other => Err(Error::UnsupportedFormat(format!(
                "unsupported file extension: .{other}"
            ))),
        }
    }

    /// Detects format from a file name.
    ///
    /// The extension is the text after the final `.`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the name has no extension or
    /// the extension is not recognized.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        file_extension(file_name).map_or_else(
            || {
                Err(Error::UnsupportedFormat(format!(
                    "cannot determine format: '{file_name}' has no extension"
                )))
            },
            Self::from_extension,
        )
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the text after the final `.` of a file name, if non-empty.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// UTF-8 byte-order mark written by some spreadsheet and editor exports.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Removes a leading byte-order mark from text content.
#[must_use]
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content)
}

/// Creates the default source for a format.
#[must_use]
pub fn create_source(format: Format) -> Arc<dyn FlashcardSource> {
    match format {
        Format::Csv => Arc::new(csv::CsvSource::new()),
        Format::Json => Arc::new(json::JsonSource::new()),
        Format::Markdown => Arc::new(markdown::MarkdownSource::new()),
        Format::Apkg => Arc::new(apkg::ApkgSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(Format::from_str("csv").unwrap(), Format::Csv);
        assert_eq!(Format::from_str("JSON").unwrap(), Format::Json);
        assert_eq!(Format::from_str(".md").unwrap(), Format::Markdown);
        assert!(Format::from_str("yaml").is_err());
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(Format::from_file_name("deck.csv").unwrap(), Format::Csv);
        assert_eq!(Format::from_file_name("Deck.JSON").unwrap(), Format::Json);
        assert_eq!(Format::from_file_name("notes.markdown").unwrap(), Format::Markdown);
        assert_eq!(Format::from_file_name("a.b.md").unwrap(), Format::Markdown);
        assert_eq!(Format::from_file_name("shared.apkg").unwrap(), Format::Apkg);
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(matches!(
            Format::from_file_name("words.txt"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Format::from_file_name("csv"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Format::from_file_name("trailing."),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.csv"), Some("csv"));
        assert_eq!(file_extension(".csv"), Some("csv"));
        assert_eq!(file_extension("a"), None);
        assert_eq!(file_extension("a."), None);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}Dog,A canine"), "Dog,A canine");
        assert_eq!(strip_bom("Dog,A canine"), "Dog,A canine");
        // Only the leading mark is removed
        assert_eq!(strip_bom("a\u{feff}b"), "a\u{feff}b");
    }

    #[test]
    fn test_binary_formats() {
        assert!(Format::Apkg.is_binary());
        assert!(!Format::Csv.is_binary());
        assert!(!Format::Markdown.is_binary());
    }

    #[test]
    fn test_every_extension_maps_back() {
        for format in Format::all() {
            for ext in format.extensions() {
                assert_eq!(Format::from_extension(ext).unwrap(), *format);
            }
        }
    }
}
