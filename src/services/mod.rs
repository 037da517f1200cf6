//! Business logic services.
//!
//! Services orchestrate the I/O layer and storage backends.

mod import;

pub use import::{ImportOptions, ImportService, ImportStage};
