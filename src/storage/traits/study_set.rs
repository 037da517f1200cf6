//! Study set storage trait.

use crate::Result;
use crate::models::{NewStudySet, NewTerm, StudySet, StudySetId, Term, UserId};

/// Trait for study set storage backends.
///
/// Calls are synchronous; async callers run them on the blocking pool.
/// Backends must be safe to share between concurrent imports.
pub trait StudySetStore: Send + Sync {
    /// Creates a study set and returns its new identifier.
    fn create_study_set(&self, request: &NewStudySet) -> Result<StudySetId>;

    /// Inserts terms into an existing set and returns how many were inserted.
    fn create_terms_batch(&self, set_id: &StudySetId, terms: &[NewTerm]) -> Result<usize>;

    /// Lists the study sets owned by `owner`, oldest first.
    fn list_study_sets(&self, owner: &UserId) -> Result<Vec<StudySet>>;

    /// Retrieves a study set by ID.
    fn get_study_set(&self, id: &StudySetId) -> Result<Option<StudySet>>;

    /// Lists the terms of a set in insertion order.
    fn list_terms(&self, set_id: &StudySetId) -> Result<Vec<Term>>;
}
