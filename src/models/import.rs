//! Import request and result types.

use super::StudySetId;
use serde::Serialize;

/// A file handed to the importer.
///
/// `file_content` is raw text for CSV, JSON and Markdown files, and a
/// base64-encoded blob for Anki packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Name of the uploaded file, used for format detection and the set title.
    pub file_name: String,
    /// File content (text, or base64 for binary formats).
    pub file_content: String,
}

impl ImportRequest {
    /// Creates a new import request.
    #[must_use]
    pub fn new(file_name: impl Into<String>, file_content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_content: file_content.into(),
        }
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    /// The study set that was created.
    pub created_set_id: StudySetId,
    /// Title derived from the file name.
    pub title: String,
    /// Number of terms storage reported as inserted.
    pub count: usize,
    /// Number of source lines, elements, blocks or notes that were dropped.
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_with_snake_case_fields() {
        let result = ImportResult {
            created_set_id: StudySetId::new("set-1"),
            title: "Animals".to_string(),
            count: 2,
            skipped: 1,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["created_set_id"], "set-1");
        assert_eq!(json["count"], 2);
        assert_eq!(json["skipped"], 1);
    }
}
