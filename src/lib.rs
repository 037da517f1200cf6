//! # Deckport
//!
//! Imports user-supplied flashcard files into study sets.
//!
//! A file import turns raw text (CSV, JSON, Markdown) or a base64-encoded
//! Anki package into validated term/definition records and hands them to a
//! storage backend as a new study set.
//!
//! ## Features
//!
//! - Extension-based format dispatch with a lazily-populated source registry
//! - Best-effort parsing: malformed lines, elements and notes are skipped and counted
//! - Anki package extraction (zip container + embedded `SQLite` collection)
//! - Pluggable storage (`SQLite`, in-memory)
//!
//! ## Example
//!
//! ```rust,ignore
//! use deckport::{ImportRequest, ImportService, UserId};
//! use deckport::storage::SqliteStudySetStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStudySetStore::new("deckport.db")?);
//! let service = ImportService::new(store);
//! let result = service
//!     .import_from_file(&UserId::new("user-1"), ImportRequest::new("animals.csv", "Dog,A canine"))
//!     .await?;
//! println!("created {} with {} cards", result.created_set_id, result.count);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::DeckportConfig;
pub use io::{Format, FormatDispatcher, SourceRegistry};
pub use models::{
    FlashcardRecord, ImportRequest, ImportResult, NewStudySet, NewTerm, StudySet, StudySetId,
    Term, UserId,
};
pub use services::{ImportOptions, ImportService, ImportStage};
pub use storage::StudySetStore;

/// Error type for deckport operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `UnsupportedFormat` | File name has no extension, or the extension is not registered |
/// | `MalformedInput` | Invalid JSON, non-array JSON root, undecodable base64 |
/// | `InvalidContainer` | Not a zip archive, missing `collection.anki2`, unusable collection |
/// | `EmptyImport` | No valid flashcards survived parsing |
/// | `InvalidInput` | Caller-side violations such as an oversized file |
/// | `OperationFailed` | I/O, storage and task failures |
///
/// The first four are terminal for an import and are never retried. None of
/// them can occur after storage has been touched.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The file extension does not map to a known format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The content does not match the grammar of its format.
    ///
    /// Raised when:
    /// - JSON text fails to parse
    /// - The JSON root is not an array
    /// - Anki package content is not valid base64
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An Anki package could not be used as a container.
    ///
    /// Raised when:
    /// - The decoded bytes are not a zip archive
    /// - The archive has no `collection.anki2` entry
    /// - The collection cannot be opened or has no `notes` table
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// Parsing produced zero valid flashcards.
    #[error("nothing to import: {0}")]
    EmptyImport(String),

    /// Invalid input was provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` database operations fail
    /// - Filesystem I/O errors occur
    /// - A blocking task panics or is cancelled
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from any displayable cause.
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Returns whether the error rejects the import itself rather than
    /// reporting an infrastructure failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::MalformedInput(_)
                | Self::InvalidContainer(_)
                | Self::EmptyImport(_)
                | Self::InvalidInput(_)
        )
    }

    /// Short label used for metrics and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::MalformedInput(_) => "malformed_input",
            Self::InvalidContainer(_) => "invalid_container",
            Self::EmptyImport(_) => "empty_import",
            Self::InvalidInput(_) => "invalid_input",
            Self::OperationFailed { .. } => "operation_failed",
        }
    }
}

/// Result type alias for deckport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
