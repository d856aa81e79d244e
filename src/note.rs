//! The note record and its identifier scheme.

use crate::util::time::unix_millis;
use serde::{Deserialize, Serialize};

/// Number of characters of plain text shown in a list row.
const PREVIEW_LENGTH: usize = 50;

/// A single user-authored document.
///
/// `content` is the plain-text rendering used for list previews; `html` is
/// the markup rendering used to re-hydrate the editing surface when the note
/// is reopened. Both are produced by the editor widget at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable key for upsert and delete, unique within the collection.
    pub id: String,
    /// Plain-text rendering of the note body.
    pub content: String,
    /// Rich markup rendering of the note body.
    pub html: String,
}

impl Note {
    /// Creates a note with a freshly generated identifier.
    pub fn new(content: impl Into<String>, html: impl Into<String>) -> Self {
        Self::with_id(generate_id(), content, html)
    }

    /// Creates a note with a caller-supplied identifier.
    pub fn with_id(
        id: impl Into<String>,
        content: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            html: html.into(),
        }
    }

    /// Returns the truncated plain-text preview shown on the list screen.
    pub fn preview(&self) -> &str {
        match self.content.char_indices().nth(PREVIEW_LENGTH) {
            Some((index, _)) => &self.content[..index],
            None => &self.content,
        }
    }
}

/// Generates a timestamp-derived note identifier.
pub(crate) fn generate_id() -> String {
    unix_millis().to_string()
}
