//! Note field decoding.
//!
//! Anki stores all fields of a note in one `flds` column, joined by the ASCII
//! Unit Separator. That convention is owned by a third-party application, so
//! it is kept behind [`NoteFieldCodec`] and can be replaced without touching
//! the extractor.

/// ASCII Unit Separator (0x1F).
pub const UNIT_SEPARATOR: char = '\u{1f}';

/// Splits a stored note field blob into card front and back.
pub trait NoteFieldCodec: Send + Sync {
    /// Returns `(front, back)`, or `None` if the blob has fewer than two fields.
    ///
    /// Values are returned verbatim; emptiness is checked by the caller.
    fn front_back<'a>(&self, fields: &'a str) -> Option<(&'a str, &'a str)>;
}

/// Codec for the Anki convention: fields joined by [`UNIT_SEPARATOR`].
///
/// The first two fields are front and back; the rest are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSeparatorCodec;

impl NoteFieldCodec for UnitSeparatorCodec {
    fn front_back<'a>(&self, fields: &'a str) -> Option<(&'a str, &'a str)> {
        let mut parts = fields.split(UNIT_SEPARATOR);
        let front = parts.next()?;
        let back = parts.next()?;
        Some((front, back))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_fields() {
        let codec = UnitSeparatorCodec;
        assert_eq!(codec.front_back("Dog\u{1f}A canine"), Some(("Dog", "A canine")));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let codec = UnitSeparatorCodec;
        assert_eq!(
            codec.front_back("front\u{1f}back\u{1f}extra\u{1f}tags"),
            Some(("front", "back"))
        );
    }

    #[test]
    fn test_single_field() {
        assert_eq!(UnitSeparatorCodec.front_back("only front"), None);
    }

    #[test]
    fn test_empty_fields_are_returned() {
        assert_eq!(UnitSeparatorCodec.front_back("\u{1f}"), Some(("", "")));
    }
}
