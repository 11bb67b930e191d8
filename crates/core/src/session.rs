//! Per-session chat history.
//!
//! A `ChatHistory` is the only place assistant answers live. It can grow,
//! and it can be read; there is no way to remove, reorder, or edit an entry.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One stored assistant answer.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// Zero-based position in the history
    pub position: usize,

    /// The rendered answer text (Markdown)
    pub content: String,

    /// When the answer was stored
    pub created_at: DateTime<Utc>,
}

/// Ordered, append-only list of assistant answers for one session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatHistory {
    entries: Vec<HistoryEntry>,
}

impl ChatHistory {
    /// Create an empty history (start of a session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an answer to the end. Returns its position.
    pub fn append(&mut self, content: impl Into<String>) -> usize {
        let position = self.entries.len();
        self.entries.push(HistoryEntry {
            position,
            content: content.into(),
            created_at: Utc::now(),
        });
        position
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, position: usize) -> Option<&HistoryEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
