//! Markdown format adapter.
//!
//! A deck is a sequence of blocks separated by one or more blank lines. The
//! first line of a block is the term, the second is the definition, and any
//! further lines are ignored:
//!
//! ```text
//! - Dog
//! - A canine
//!
//! Cat
//! A feline
//! ```

use super::{Format, strip_bom};
use crate::Result;
use crate::io::traits::{FlashcardSource, ParsedCards};
use crate::models::FlashcardRecord;

/// Markdown import source.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSource;

impl MarkdownSource {
    /// Creates a new Markdown import source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_block(block: &[&str]) -> Option<FlashcardRecord> {
        let [term, definition, ..] = block else {
            return None;
        };
        FlashcardRecord::trimmed(strip_bullet(term), strip_bullet(definition))
    }
}

/// Strips a leading `-` or `*` bullet marker that is followed by whitespace.
fn strip_bullet(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix(['-', '*'])
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .unwrap_or(line)
}

/// Groups lines into blocks of consecutive non-blank lines.
fn blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

impl FlashcardSource for MarkdownSource {
    fn format(&self) -> Format {
        Format::Markdown
    }

    fn parse(&self, content: &str) -> Result<ParsedCards> {
        Ok(blocks(strip_bom(content))
            .iter()
            .map(|block| Self::parse_block(block))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParsedCards {
        MarkdownSource::new().parse(input).unwrap()
    }

    #[test]
    fn test_bulleted_blocks() {
        let parsed = parse("- Dog\n- A canine\n\n- Cat\n- A feline");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.records[0].term(), "Dog");
        assert_eq!(parsed.records[0].definition(), "A canine");
        assert_eq!(parsed.records[1].term(), "Cat");
        assert_eq!(parsed.records[1].definition(), "A feline");
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let parsed = parse("\u{feff}- Dog\n- A canine");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.records[0].term(), "Dog");
    }

    #[test]
    fn test_star_bullets_and_plain_lines() {
        let parsed = parse("* Sun\nA star\n\nMoon  \n   * Earth's satellite");

        assert_eq!(parsed.records[0].term(), "Sun");
        assert_eq!(parsed.records[0].definition(), "A star");
        assert_eq!(parsed.records[1].term(), "Moon");
        assert_eq!(parsed.records[1].definition(), "Earth's satellite");
    }

    #[test]
    fn test_marker_without_whitespace_is_kept() {
        let parsed = parse("-5\n**bold** text");

        assert_eq!(parsed.records[0].term(), "-5");
        assert_eq!(parsed.records[0].definition(), "**bold** text");
    }

    #[test]
    fn test_extra_lines_ignored() {
        let parsed = parse("Term\nDefinition\nExample sentence\nMore notes");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.records[0].definition(), "Definition");
    }

    #[test]
    fn test_single_line_blocks_are_skipped() {
        let parsed = parse("# Heading\n\nTerm\nDefinition\n\nlonely");

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_multiple_blank_lines_and_crlf() {
        let parsed = parse("A\r\n1\r\n\r\n\r\n  \r\nB\r\n2\r\n");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records[1].term(), "B");
        assert_eq!(parsed.records[1].definition(), "2");
    }

    #[test]
    fn test_bare_bullet_is_skipped() {
        let parsed = parse("- \n- definition");

        assert!(parsed.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- x"), " x");
        assert_eq!(strip_bullet("*\tx"), "\tx");
        assert_eq!(strip_bullet("-x"), "-x");
        assert_eq!(strip_bullet("plain"), "plain");
    }
}
