//! Anki package (`.apkg`) adapter.
//!
//! An Anki package is a zip archive. The notes live in an embedded `SQLite`
//! database stored under the entry name `collection.anki2`; each row of its
//! `notes` table holds all fields of one note in the `flds` column.
//!
//! Only the simplest case is supported: the first two fields of every note
//! become term and definition. Checksums, schema versions, note models, media
//! and multiple decks are ignored.
//!
//! # Resource handling
//!
//! The collection entry is inflated into memory only up to a size cap; a larger
//! entry is rejected before anything is written to disk. `SQLite` needs a file
//! path, so the collection is written to a private temporary directory and
//! opened read-only. The connection and the directory are owned locals: both
//! are released on every exit path, including errors and unwinding.

pub mod fields;

use super::Format;
use crate::io::traits::{FlashcardSource, ParsedCards};
use crate::models::FlashcardRecord;
use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::ZipArchive;
use zip::result::ZipError;

pub use fields::{NoteFieldCodec, UNIT_SEPARATOR, UnitSeparatorCodec};

/// Name of the archive entry holding the collection database.
pub const COLLECTION_ENTRY: &str = "collection.anki2";

/// Upper bound on how much larger the inflated collection may be than the
/// package it came from.
pub const MAX_INFLATION_RATIO: u64 = 20;

/// Default cap on the inflated size of the collection entry (100 MiB).
pub const DEFAULT_MAX_COLLECTION_SIZE: u64 = 100 * 1024 * 1024;

/// Prefix of the temporary directories holding extracted collections.
const TEMP_DIR_PREFIX: &str = "deckport-apkg-";

/// Returns the collection cap for packages of at most `max_package_size` bytes.
#[must_use]
pub const fn collection_limit(max_package_size: u64) -> u64 {
    max_package_size.saturating_mul(MAX_INFLATION_RATIO)
}

/// Query returning the field blob of every note.
const NOTES_QUERY: &str = "SELECT flds FROM notes ORDER BY rowid";

/// Anki package import source.
///
/// Expects base64-encoded package bytes. Parsing blocks on file I/O; the
/// dispatcher runs it on the blocking pool.
#[derive(Clone)]
pub struct ApkgSource {
    codec: Arc<dyn NoteFieldCodec>,
    max_collection_size: u64,
    temp_root: Option<PathBuf>,
}

impl std::fmt::Debug for ApkgSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApkgSource")
            .field("max_collection_size", &self.max_collection_size)
            .field("temp_root", &self.temp_root)
            .finish_non_exhaustive()
    }
}

impl Default for ApkgSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ApkgSource {
    /// Creates a source using the Unit Separator field convention.
    #[must_use]
    pub fn new() -> Self {
        Self::with_codec(Arc::new(UnitSeparatorCodec))
    }

    /// Creates a source with a custom note field codec.
    #[must_use]
    pub fn with_codec(codec: Arc<dyn NoteFieldCodec>) -> Self {
        Self {
            codec,
            max_collection_size: DEFAULT_MAX_COLLECTION_SIZE,
            temp_root: None,
        }
    }

    /// Sets the cap on the inflated size of the collection entry.
    #[must_use]
    pub fn with_max_collection_size(mut self, max_bytes: u64) -> Self {
        self.max_collection_size = max_bytes;
        self
    }

    /// Extracts collections under `root` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Returns the cap on the inflated size of the collection entry.
    #[must_use]
    pub const fn max_collection_size(&self) -> u64 {
        self.max_collection_size
    }

    /// Extracts records from raw (already decoded) package bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainer`] if the bytes are not a zip archive,
    /// the collection entry is missing or larger than the cap, or the
    /// collection is unreadable.
    pub fn parse_bytes(&self, package: &[u8]) -> Result<ParsedCards> {
        let collection = read_collection_entry(package, self.max_collection_size)?;

        let dir = self.temp_dir()?;
        let path = dir.path().join(COLLECTION_ENTRY);
        std::fs::write(&path, &collection)
            .map_err(|e| Error::operation("write_collection", e))?;

        let parsed = read_notes(&path, self.codec.as_ref());
        // `dir` is dropped here, after the connection inside `read_notes` closed.
        drop(dir);
        parsed
    }

    fn temp_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        dir.map_err(|e| Error::operation("create_temp_dir", e))
    }
}

impl FlashcardSource for ApkgSource {
    fn format(&self) -> Format {
        Format::Apkg
    }

    fn parse(&self, content: &str) -> Result<ParsedCards> {
        let package = decode_package(content)?;
        self.parse_bytes(&package)
    }
}

/// Decodes base64 package content, ignoring ASCII whitespace.
fn decode_package(content: &str) -> Result<Vec<u8>> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::MalformedInput(format!("package is not valid base64: {e}")))
}

/// Reads the raw bytes of the collection entry from a zip archive.
///
/// Both the declared size and the bytes actually inflated are checked against
/// `max_size`.
fn read_collection_entry(package: &[u8], max_size: u64) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(package))
        .map_err(|e| Error::InvalidContainer(format!("not a zip archive: {e}")))?;

    let mut entry = archive.by_name(COLLECTION_ENTRY).map_err(|e| match e {
        ZipError::FileNotFound => {
            Error::InvalidContainer(format!("package has no '{COLLECTION_ENTRY}' entry"))
        },
        other => Error::InvalidContainer(format!("cannot open '{COLLECTION_ENTRY}': {other}")),
    })?;

    if entry.size() > max_size {
        return Err(collection_too_large(max_size));
    }

    let mut collection = Vec::new();
    entry
        .by_ref()
        .take(max_size.saturating_add(1))
        .read_to_end(&mut collection)
        .map_err(|e| Error::InvalidContainer(format!("cannot read '{COLLECTION_ENTRY}': {e}")))?;
    if u64::try_from(collection.len()).unwrap_or(u64::MAX) > max_size {
        return Err(collection_too_large(max_size));
    }
    Ok(collection)
}

fn collection_too_large(max_size: u64) -> Error {
    Error::InvalidContainer(format!(
        "collection too large: '{COLLECTION_ENTRY}' exceeds {max_size} bytes"
    ))
}

/// Opens the collection read-only and extracts one record per usable note.
fn read_notes(path: &Path, codec: &dyn NoteFieldCodec) -> Result<ParsedCards> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| Error::InvalidContainer(format!("cannot open collection: {e}")))?;

    let parsed = collect_notes(&conn, codec);

    if let Err((_, e)) = conn.close() {
        tracing::warn!(error = %e, "Failed to close Anki collection cleanly");
    }

    parsed
}

fn collect_notes(conn: &Connection, codec: &dyn NoteFieldCodec) -> Result<ParsedCards> {
    let mut stmt = conn
        .prepare(NOTES_QUERY)
        .map_err(|e| Error::InvalidContainer(format!("cannot read notes: {e}")))?;

    let rows = stmt
        .query_map([], |row| Ok(field_text(row.get_ref(0)?)))
        .map_err(|e| Error::InvalidContainer(format!("cannot read notes: {e}")))?;

    let mut parsed = ParsedCards::new();
    for row in rows {
        let fields =
            row.map_err(|e| Error::InvalidContainer(format!("cannot read note row: {e}")))?;
        parsed.push(fields.as_deref().and_then(|f| note_record(f, codec)));
    }
    Ok(parsed)
}

/// Reads the `flds` value as text; `NULL` and numeric values yield `None`.
fn field_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        },
        ValueRef::Null | ValueRef::Integer(_) | ValueRef::Real(_) => None,
    }
}

fn note_record(fields: &str, codec: &dyn NoteFieldCodec) -> Option<FlashcardRecord> {
    let (front, back) = codec.front_back(fields)?;
    FlashcardRecord::new(front, back)
}
