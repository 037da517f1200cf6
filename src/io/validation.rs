//! Import validation and normalization.
//!
//! Rejects imports that produced no flashcards and turns parsed records into
//! storage requests.

use super::traits::ParsedCards;
use crate::models::{
    DEFAULT_DESCRIPTION, FlashcardRecord, NewStudySet, NewTerm, PLACEHOLDER_RANK, UserId,
};
use crate::{Error, Result};

/// Validates parsed records and builds storage requests.
///
/// # Defaults
///
/// - `description`: [`DEFAULT_DESCRIPTION`]
/// - term `rank`: [`PLACEHOLDER_RANK`] for every term
#[derive(Debug, Clone)]
pub struct ImportValidator {
    description: String,
}

impl Default for ImportValidator {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ImportValidator {
    /// Creates a new validator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description given to created study sets.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the description given to created study sets.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks that parsing produced at least one record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImport`] if there are no records.
    pub fn validate(&self, file_name: &str, parsed: &ParsedCards) -> Result<()> {
        if parsed.is_empty() {
            let detail = if parsed.skipped > 0 {
                format!(
                    "no flashcards found in '{file_name}' ({} entries were malformed)",
                    parsed.skipped
                )
            } else {
                format!("no flashcards found in '{file_name}'")
            };
            return Err(Error::EmptyImport(detail));
        }
        Ok(())
    }

    /// Derives a study set title by stripping the final extension.
    ///
    /// A trailing segment containing `/` is not treated as an extension, and a
    /// name that would strip down to nothing (such as `.csv`) is kept whole.
    #[must_use]
    pub fn derive_title(file_name: &str) -> String {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => {
                stem.to_string()
            },
            _ => file_name.to_string(),
        }
    }

    /// Builds the request that creates the study set.
    #[must_use]
    pub fn study_set_request(&self, title: impl Into<String>, owner: &UserId) -> NewStudySet {
        NewStudySet {
            title: title.into(),
            owner_id: owner.clone(),
            description: self.description.clone(),
        }
    }

    /// Converts records into batch term requests, preserving order.
    #[must_use]
    pub fn to_new_terms(records: Vec<FlashcardRecord>) -> Vec<NewTerm> {
        records
            .into_iter()
            .map(|record| {
                let (word, definition) = record.into_parts();
                NewTerm {
                    word,
                    definition,
                    rank: PLACEHOLDER_RANK,
                }
            })
            .collect()
    }
}
