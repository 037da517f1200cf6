//! Command handlers module.
//!
//! - `import.rs`: file import, including dry runs
//! - `sets.rs`: study set listing and display
//! - `formats.rs`: supported format listing
//! - `config.rs`: configuration display

mod config;
mod formats;
mod import;
mod sets;

pub use config::cmd_config;
pub use formats::cmd_formats;
pub use import::{ImportArgs, cmd_import};
pub use sets::{cmd_sets, cmd_show};
