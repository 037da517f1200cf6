//! Format source registry.
//!
//! Maps each [`Format`] to the [`FlashcardSource`] that parses it. Sources are
//! built by a factory on first lookup and memoized for the lifetime of the
//! registry. The registry is an ordinary value owned by the dispatcher, so
//! tests and embedders can inject their own sources.
//!
//! ```rust,ignore
//! use deckport::io::SourceRegistry;
//! use deckport::io::formats::{Format, apkg::ApkgSource};
//! use std::sync::Arc;
//!
//! let registry = SourceRegistry::with_defaults()
//!     .register(Format::Apkg, || Arc::new(ApkgSource::with_codec(Arc::new(MyCodec))));
//! ```

use super::formats::{Format, create_source};
use super::traits::FlashcardSource;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Factory producing a source on first use.
pub type SourceFactory = Box<dyn Fn() -> Arc<dyn FlashcardSource> + Send + Sync>;

struct Slot {
    factory: SourceFactory,
    instance: OnceLock<Arc<dyn FlashcardSource>>,
}

impl Slot {
    fn get(&self) -> Arc<dyn FlashcardSource> {
        Arc::clone(self.instance.get_or_init(|| (self.factory)()))
    }
}

/// Lazily-initialized, explicitly keyed registry of format sources.
pub struct SourceRegistry {
    slots: BTreeMap<Format, Slot>,
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SourceRegistry {
    /// Creates a registry with no formats.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Creates a registry with the built-in source for every [`Format`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Format::all()
            .iter()
            .fold(Self::empty(), |registry, &format| {
                registry.register(format, move || create_source(format))
            })
    }

    /// Registers (or replaces) the factory for a format.
    #[must_use]
    pub fn register<F>(mut self, format: Format, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn FlashcardSource> + Send + Sync + 'static,
    {
        self.slots.insert(
            format,
            Slot {
                factory: Box::new(factory),
                instance: OnceLock::new(),
            },
        );
        self
    }

    /// Returns the source for a format, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if nothing is registered for the format.
    pub fn get(&self, format: Format) -> Result<Arc<dyn FlashcardSource>> {
        self.slots.get(&format).map(Slot::get).ok_or_else(|| {
            Error::UnsupportedFormat(format!("no source registered for format '{format}'"))
        })
    }

    /// Returns whether the source for a format has been built yet.
    #[must_use]
    pub fn is_loaded(&self, format: Format) -> bool {
        self.slots
            .get(&format)
            .is_some_and(|slot| slot.instance.get().is_some())
    }

    /// Returns the registered formats in declaration order.
    #[must_use]
    pub fn formats(&self) -> Vec<Format> {
        self.slots.keys().copied().collect()
    }
}
