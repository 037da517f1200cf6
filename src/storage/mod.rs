//! Storage layer for study sets.
//!
//! The import pipeline only needs the two write operations of
//! [`StudySetStore`]; the read helpers back the CLI listing commands.
//!
//! ## Backends
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`SqliteStudySetStore`] | Durable storage, WAL-mode `SQLite` |
//! | [`MemoryStudySetStore`] | Tests and embedding hosts without a database |

// Allow significant_drop_tightening - dropping database connections slightly early
// provides no meaningful benefit.
#![allow(clippy::significant_drop_tightening)]

pub mod persistence;
pub mod sqlite;
pub mod traits;

pub use persistence::{MemoryStudySetStore, SqliteStudySetStore};
pub use traits::StudySetStore;
