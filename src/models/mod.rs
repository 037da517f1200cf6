//! Data models for deckport.
//!
//! Import boundary objects, the transient flashcard record, and the study set
//! entities owned by storage.

mod flashcard;
mod import;
mod study_set;

pub use flashcard::FlashcardRecord;
pub use import::{ImportRequest, ImportResult};
pub use study_set::{
    DEFAULT_DESCRIPTION, NewStudySet, NewTerm, PLACEHOLDER_RANK, StudySet, StudySetId, Term,
    UserId,
};
