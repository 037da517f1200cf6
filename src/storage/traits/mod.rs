//! Storage backend traits.

mod study_set;

pub use study_set::StudySetStore;
