//! Row selection.
//!
//! Selection is keyed by row id and spans the whole loaded row set, not the
//! visible page. "Select all" therefore checks rows on every page.

use std::collections::HashSet;

/// The set of checked row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a single row.
    pub fn toggle_row(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Check every loaded row, or clear the selection.
    pub fn toggle_all<'a>(&mut self, checked: bool, all_ids: impl IntoIterator<Item = &'a str>) {
        if checked {
            self.ids = all_ids.into_iter().map(str::to_string).collect();
        } else {
            self.ids.clear();
        }
    }

    /// Drop every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether a row is checked.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of checked rows.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is checked.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether every one of `row_count` loaded rows is checked.
    ///
    /// Always false for an empty table.
    pub fn all_selected(&self, row_count: usize) -> bool {
        row_count > 0 && self.ids.len() == row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("p-{}", i)).collect()
    }

    #[test]
    fn test_toggle_row_adds_and_removes() {
        let mut selection = Selection::new();
        selection.toggle_row("p-1");
        assert!(selection.contains("p-1"));
        selection.toggle_row("p-1");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_spans_every_row() {
        let all = ids(25);
        let mut selection = Selection::new();
        selection.toggle_all(true, all.iter().map(String::as_str));
        assert_eq!(selection.len(), 25);
        assert!(selection.contains("p-25"));
        assert!(selection.all_selected(25));
    }

    #[test]
    fn test_deselect_one_after_select_all() {
        let all = ids(12);
        let mut selection = Selection::new();
        selection.toggle_all(true, all.iter().map(String::as_str));
        selection.toggle_row("p-7");
        assert_eq!(selection.len(), 11);
        assert!(!selection.all_selected(12));
    }

    #[test]
    fn test_toggle_all_unchecked_clears() {
        let all = ids(3);
        let mut selection = Selection::new();
        selection.toggle_row("p-1");
        selection.toggle_all(false, all.iter().map(String::as_str));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_selected_false_when_empty() {
        assert!(!Selection::new().all_selected(0));
    }
}
