//! Study set storage backends.

mod memory;
mod sqlite;

pub use memory::MemoryStudySetStore;
pub use sqlite::SqliteStudySetStore;
