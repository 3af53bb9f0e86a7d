//! Search filter over loaded rows.

use super::TableRecord;

/// Case-insensitive substring filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// The query as typed.
    query: String,
    /// Lowercased query used for matching.
    needle: String,
}

impl SearchFilter {
    /// Create an empty filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Replace the query. Returns true if it changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.needle = query.trim().to_lowercase();
        self.query = query;
        true
    }

    /// Whether a record matches the query.
    pub fn matches<R: TableRecord>(&self, row: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        row.search_text()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Indices of matching rows.
    pub fn apply<R: TableRecord>(&self, rows: &[R]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| self.matches(*row))
            .map(|(i, _)| i)
            .collect()
    }
}
