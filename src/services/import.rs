//! Flashcard import service.
//!
//! Orchestrates one file import: dispatch by extension, parse, reject empty
//! results, then create the study set and its terms through the store.
//!
//! Every rejection (unsupported format, malformed input, invalid container,
//! empty import) happens before the store is touched. A failure while writing
//! terms leaves the already-created set in place; the store is not asked to
//! roll it back.

use crate::io::{Format, FormatDispatcher, ImportValidator, ParsedCards, SourceRegistry};
use crate::models::{DEFAULT_DESCRIPTION, ImportRequest, ImportResult, StudySetId, UserId};
use crate::storage::StudySetStore;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Options for study set import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Description given to created study sets.
    pub description: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ImportOptions {
    /// Sets the description given to created study sets.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Stage of a single import.
///
/// ```text
/// Idle -> Dispatching -> Parsing -> Validating -> Persisting -> Done
///              \            \           \             \
///               +------------+-----------+-------------+--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Not started.
    Idle,
    /// Resolving the format from the file name.
    Dispatching,
    /// Running the format's parser.
    Parsing,
    /// Checking that at least one record was found.
    Validating,
    /// Creating the study set and its terms.
    Persisting,
    /// Finished successfully.
    Done,
    /// Finished with an error.
    Failed,
}

impl ImportStage {
    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dispatching => "dispatching",
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks and logs stage transitions for one import.
struct StageTracker {
    stage: ImportStage,
}

impl StageTracker {
    const fn new() -> Self {
        Self {
            stage: ImportStage::Idle,
        }
    }

    fn enter(&mut self, next: ImportStage) {
        tracing::debug!(from = %self.stage, to = %next, "Import stage transition");
        self.stage = next;
    }
}

/// Service for importing flashcard files into study sets.
///
/// Holds no per-import state, so one instance can serve concurrent imports.
pub struct ImportService {
    dispatcher: FormatDispatcher,
    store: Arc<dyn StudySetStore>,
    validator: ImportValidator,
}

impl ImportService {
    /// Creates an import service over `store` with the default formats.
    #[must_use]
    pub fn new(store: Arc<dyn StudySetStore>) -> Self {
        Self {
            dispatcher: FormatDispatcher::default(),
            store,
            validator: ImportValidator::new(),
        }
    }

    /// Replaces the source registry.
    #[must_use]
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.dispatcher = FormatDispatcher::new(registry);
        self
    }

    /// Applies import options.
    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.validator = self.validator.with_description(options.description);
        self
    }

    /// Returns the format dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &FormatDispatcher {
        &self.dispatcher
    }

    /// Parses and validates a file without touching storage.
    ///
    /// # Errors
    ///
    /// Returns the same rejections as [`Self::import_from_file`].
    #[instrument(skip(self, request), fields(file_name = %request.file_name))]
    pub async fn preview(&self, request: ImportRequest) -> Result<ParsedCards> {
        let ImportRequest {
            file_name,
            file_content,
        } = request;

        let parsed = self.dispatcher.dispatch(&file_name, file_content).await?;
        self.validator.validate(&file_name, &parsed)?;
        Ok(parsed)
    }

    /// Imports a file as a new study set owned by `owner`.
    ///
    /// Every call creates a new set, even for identical content.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for a missing or unknown extension
    /// - [`Error::MalformedInput`] for invalid JSON or undecodable base64
    /// - [`Error::InvalidContainer`] for an unusable Anki package
    /// - [`Error::EmptyImport`] if no valid flashcards were found
    /// - [`Error::OperationFailed`] if storage fails
    #[instrument(skip(self, request), fields(owner = %owner, file_name = %request.file_name))]
    pub async fn import_from_file(
        &self,
        owner: &UserId,
        request: ImportRequest,
    ) -> Result<ImportResult> {
        let start = Instant::now();
        let format_label =
            Format::from_file_name(&request.file_name).map_or("unknown", |f| f.as_str());

        let mut tracker = StageTracker::new();
        let result = self.run_import(owner, request, &mut tracker).await;

        let status = match &result {
            Ok(imported) => {
                tracker.enter(ImportStage::Done);
                metrics::counter!("deckport_import_records_total", "format" => format_label)
                    .increment(imported.count as u64);
                metrics::counter!("deckport_import_skipped_total", "format" => format_label)
                    .increment(imported.skipped as u64);
                tracing::info!(
                    set_id = %imported.created_set_id,
                    title = %imported.title,
                    count = imported.count,
                    skipped = imported.skipped,
                    "Imported study set"
                );
                "success"
            },
            Err(e) => {
                let failed_at = tracker.stage;
                tracker.enter(ImportStage::Failed);
                if e.is_rejection() {
                    tracing::info!(stage = %failed_at, error = %e, "Import rejected");
                } else {
                    tracing::error!(stage = %failed_at, error = %e, "Import failed");
                }
                e.kind()
            },
        };

        metrics::counter!(
            "deckport_imports_total",
            "format" => format_label,
            "status" => status
        )
        .increment(1);
        metrics::histogram!("deckport_import_duration_ms", "format" => format_label)
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn run_import(
        &self,
        owner: &UserId,
        request: ImportRequest,
        tracker: &mut StageTracker,
    ) -> Result<ImportResult> {
        let ImportRequest {
            file_name,
            file_content,
        } = request;

        tracker.enter(ImportStage::Dispatching);
        let (format, source) = self.dispatcher.resolve(&file_name)?;

        tracker.enter(ImportStage::Parsing);
        let parsed = self.dispatcher.run(format, source, file_content).await?;

        tracker.enter(ImportStage::Validating);
        self.validator.validate(&file_name, &parsed)?;
        let skipped = parsed.skipped;
        if skipped > 0 {
            tracing::warn!(%format, skipped, "Skipped malformed entries");
        }
        let title = ImportValidator::derive_title(&file_name);

        tracker.enter(ImportStage::Persisting);
        let (created_set_id, count) = self.persist(owner, &title, parsed).await?;

        Ok(ImportResult {
            created_set_id,
            title,
            count,
            skipped,
        })
    }

    /// Creates the set, then its terms, on the blocking pool.
    async fn persist(
        &self,
        owner: &UserId,
        title: &str,
        parsed: ParsedCards,
    ) -> Result<(StudySetId, usize)> {
        let store = Arc::clone(&self.store);
        let set_request = self.validator.study_set_request(title, owner);
        let terms = ImportValidator::to_new_terms(parsed.records);

        tokio::task::spawn_blocking(move || -> Result<(StudySetId, usize)> {
            let set_id = store.create_study_set(&set_request)?;
            let count = store
                .create_terms_batch(&set_id, &terms)
                .inspect_err(|e| {
                    tracing::warn!(set_id = %set_id, error = %e, "Term batch failed after set creation");
                })?;
            Ok((set_id, count))
        })
        .await
        .map_err(|e| Error::operation("persist_study_set", e))?
    }
}
