//! In-memory study set store.

use crate::models::{NewStudySet, NewTerm, StudySet, StudySetId, Term, UserId};
use crate::storage::sqlite::acquire_lock;
use crate::storage::traits::StudySetStore;
use crate::{Error, Result, current_timestamp};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    sets: Vec<StudySet>,
    terms: Vec<Term>,
}

/// In-memory study set store.
///
/// Counts every write call so callers can assert that a rejected import never
/// reached storage. Term batch failures can be injected with
/// [`Self::fail_term_batches`].
#[derive(Debug, Default)]
pub struct MemoryStudySetStore {
    state: Mutex<State>,
    calls: AtomicUsize,
    fail_terms: bool,
}

impl MemoryStudySetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_terms_batch` call fail.
    #[must_use]
    pub const fn fail_term_batches(mut self) -> Self {
        self.fail_terms = true;
        self
    }

    /// Number of write calls received (`create_study_set` and
    /// `create_terms_batch`), including failed ones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored set.
    #[must_use]
    pub fn study_sets(&self) -> Vec<StudySet> {
        acquire_lock(&self.state).sets.clone()
    }

    /// Snapshot of every stored term.
    #[must_use]
    pub fn terms(&self) -> Vec<Term> {
        acquire_lock(&self.state).terms.clone()
    }
}

impl StudySetStore for MemoryStudySetStore {
    fn create_study_set(&self, request: &NewStudySet) -> Result<StudySetId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = StudySetId::new(Uuid::new_v4().to_string());
        acquire_lock(&self.state).sets.push(StudySet {
            id: id.clone(),
            title: request.title.clone(),
            owner_id: request.owner_id.clone(),
            description: request.description.clone(),
            created_at: current_timestamp(),
        });
        Ok(id)
    }

    fn create_terms_batch(&self, set_id: &StudySetId, terms: &[NewTerm]) -> Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_terms {
            return Err(Error::operation("insert_term", "injected failure"));
        }

        let mut state = acquire_lock(&self.state);
        if !state.sets.iter().any(|s| &s.id == set_id) {
            return Err(Error::operation(
                "insert_term",
                format!("unknown study set '{set_id}'"),
            ));
        }
        state.terms.extend(terms.iter().map(|term| Term {
            id: Uuid::new_v4().to_string(),
            study_set_id: set_id.clone(),
            word: term.word.clone(),
            definition: term.definition.clone(),
            rank: term.rank,
        }));
        Ok(terms.len())
    }

    fn list_study_sets(&self, owner: &UserId) -> Result<Vec<StudySet>> {
        Ok(acquire_lock(&self.state)
            .sets
            .iter()
            .filter(|s| &s.owner_id == owner)
            .cloned()
            .collect())
    }

    fn get_study_set(&self, id: &StudySetId) -> Result<Option<StudySet>> {
        Ok(acquire_lock(&self.state)
            .sets
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    fn list_terms(&self, set_id: &StudySetId) -> Result<Vec<Term>> {
        Ok(acquire_lock(&self.state)
            .terms
            .iter()
            .filter(|t| &t.study_set_id == set_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_set(owner: &str) -> NewStudySet {
        NewStudySet {
            title: "Animals".to_string(),
            owner_id: UserId::new(owner),
            description: "d".to_string(),
        }
    }

    #[test]
    fn test_counts_write_calls() {
        let store = MemoryStudySetStore::new();
        assert_eq!(store.call_count(), 0);

        let id = store.create_study_set(&new_set("user-1")).unwrap();
        let terms = [NewTerm {
            word: "Dog".to_string(),
            definition: "A canine".to_string(),
            rank: 0,
        }];
        assert_eq!(store.create_terms_batch(&id, &terms).unwrap(), 1);

        assert_eq!(store.call_count(), 2);
        assert_eq!(store.list_terms(&id).unwrap().len(), 1);
        // Reads are not counted
        store.list_study_sets(&UserId::new("user-1")).unwrap();
        assert_eq!(store.call_count(), 2);
    }

    #[test]
    fn test_unknown_set_rejected() {
        let store = MemoryStudySetStore::new();
        let result = store.create_terms_batch(&StudySetId::new("missing"), &[]);
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }

    #[test]
    fn test_injected_failure() {
        let store = MemoryStudySetStore::new().fail_term_batches();
        let id = store.create_study_set(&new_set("user-1")).unwrap();
        assert!(store.create_terms_batch(&id, &[]).is_err());
        assert_eq!(store.study_sets().len(), 1);
        assert!(store.terms().is_empty());
    }

    #[test]
    fn test_list_filters_by_owner() {
        let store = MemoryStudySetStore::new();
        let id = store.create_study_set(&new_set("user-1")).unwrap();
        store.create_study_set(&new_set("user-2")).unwrap();

        let sets = store.list_study_sets(&UserId::new("user-1")).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, id);
        assert!(store.get_study_set(&id).unwrap().is_some());
    }
}
