//! Format dispatch.
//!
//! Picks the source for a file by its extension and runs it. Text formats are
//! parsed inline; binary formats do blocking container and database I/O and
//! are moved to tokio's blocking pool.

use super::formats::Format;
use super::registry::SourceRegistry;
use super::traits::{FlashcardSource, ParsedCards};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// Routes file content to the parser for its format.
#[derive(Debug, Clone)]
pub struct FormatDispatcher {
    registry: Arc<SourceRegistry>,
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        Self::new(SourceRegistry::with_defaults())
    }
}

impl FormatDispatcher {
    /// Creates a dispatcher over the given registry.
    #[must_use]
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Resolves the format and source for a file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for a missing or unknown extension.
    pub fn resolve(&self, file_name: &str) -> Result<(Format, Arc<dyn FlashcardSource>)> {
        let format = Format::from_file_name(file_name)?;
        let source = self.registry.get(format)?;
        Ok((format, source))
    }

    /// Runs a resolved source over file content.
    ///
    /// # Errors
    ///
    /// Propagates the source's error, or [`Error::OperationFailed`] if the
    /// blocking task panicked or was cancelled.
    pub async fn run(
        &self,
        format: Format,
        source: Arc<dyn FlashcardSource>,
        content: String,
    ) -> Result<ParsedCards> {
        if !format.is_binary() {
            return source.parse(&content);
        }

        tokio::task::spawn_blocking(move || source.parse(&content))
            .await
            .map_err(|e| Error::operation("parse_package", e))?
    }

    /// Resolves and runs the source for a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] before any parser runs if the
    /// extension is unknown; otherwise propagates the parser's error.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn dispatch(&self, file_name: &str, content: String) -> Result<ParsedCards> {
        let (format, source) = self.resolve(file_name)?;
        tracing::debug!(%format, "Dispatching file to parser");
        self.run(format, source, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::apkg::test_support::package_base64;

    #[tokio::test]
    async fn test_dispatch_csv() {
        let dispatcher = FormatDispatcher::default();
        let parsed = dispatcher
            .dispatch("x.csv", "A,1\nB,2".to_string())
            .await
            .unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_markdown_aliases() {
        let dispatcher = FormatDispatcher::default();
        for name in ["deck.md", "deck.markdown", "DECK.MD"] {
            let parsed = dispatcher
                .dispatch(name, "Dog\nA canine".to_string())
                .await
                .unwrap();
            assert_eq!(parsed.len(), 1, "{name}");
        }
    }

    #[tokio::test]
    async fn test_dispatch_apkg_on_blocking_pool() {
        let dispatcher = FormatDispatcher::default();
        let parsed = dispatcher
            .dispatch("deck.apkg", package_base64(&["front\u{1f}back"]))
            .await
            .unwrap();
        assert_eq!(parsed.records[0].term(), "front");
    }

    #[tokio::test]
    async fn test_unsupported_extension_runs_no_parser() {
        let dispatcher = FormatDispatcher::default();
        let result = dispatcher.dispatch("words.txt", "A,1".to_string()).await;

        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
        assert!(Format::all().iter().all(|f| !dispatcher.registry().is_loaded(*f)));
    }

    #[tokio::test]
    async fn test_missing_extension() {
        let dispatcher = FormatDispatcher::default();
        let result = dispatcher.dispatch("README", String::new()).await;
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
