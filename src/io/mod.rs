//! File import I/O subsystem.
//!
//! Turns user-supplied study-set files into validated flashcard records.
//!
//! # Architecture
//!
//! - **Format sources** implement [`FlashcardSource`], one per file format
//! - **Registry** lazily builds sources on first use, keyed by [`Format`]
//! - **Dispatcher** maps a file name to a source and runs it, moving blocking
//!   container extraction off the async executor
//! - **Validation** rejects empty imports and prepares storage requests
//!
//! # Supported Formats
//!
//! | Format | Extensions | Content | Notes |
//! |--------|------------|---------|-------|
//! | CSV | `csv` | text | first comma splits term/definition, no quoting |
//! | JSON | `json` | text | array of `{"term", "definition"}` objects |
//! | Markdown | `md`, `markdown` | text | blank-line separated two-line blocks |
//! | Anki package | `apkg` | base64 | zip holding `collection.anki2` |
//!
//! Malformed lines, elements, blocks and notes are skipped rather than
//! failing the import; the number skipped is reported alongside the records.

pub mod dispatch;
pub mod formats;
pub mod registry;
pub mod traits;
pub mod validation;

pub use dispatch::FormatDispatcher;
pub use formats::Format;
pub use registry::SourceRegistry;
pub use traits::{FlashcardSource, ParsedCards};
pub use validation::ImportValidator;
