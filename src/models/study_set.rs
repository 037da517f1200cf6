//! Study set and term entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank assigned to every imported term.
///
/// Import order is not reflected yet; every term gets the same rank.
pub const PLACEHOLDER_RANK: i64 = 0;

/// Description given to study sets created by an import.
pub const DEFAULT_DESCRIPTION: &str = "Default description";

/// Identifier of the principal that owns a study set.
///
/// Supplied by an already-authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a study set, issued by storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudySetId(String);

impl StudySetId {
    /// Creates a new study set ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudySetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StudySetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StudySetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Request to create a study set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudySet {
    /// Display title.
    pub title: String,
    /// Owning principal.
    pub owner_id: UserId,
    /// Free-form description.
    pub description: String,
}

/// One element of a batch term insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTerm {
    /// Front of the card.
    pub word: String,
    /// Back of the card.
    pub definition: String,
    /// Ordering rank within the set.
    pub rank: i64,
}

/// A stored study set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySet {
    /// Identifier.
    pub id: StudySetId,
    /// Display title.
    pub title: String,
    /// Owning principal.
    pub owner_id: UserId,
    /// Description.
    pub description: String,
    /// Creation timestamp (Unix epoch seconds).
    pub created_at: u64,
}

/// A stored term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Identifier.
    pub id: String,
    /// Set this term belongs to.
    pub study_set_id: StudySetId,
    /// Front of the card.
    pub word: String,
    /// Back of the card.
    pub definition: String,
    /// Ordering rank within the set.
    pub rank: i64,
}
