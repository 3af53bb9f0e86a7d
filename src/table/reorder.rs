//! Drag protocol for reordering columns.
//!
//! A drag runs in three phases: [`ReorderController::drag_start`] picks up a
//! visible column, [`ReorderController::drag_over`] records the hover
//! target in the full list, and [`ReorderController::drag_end`] drops it.

use super::column::{full_index_of_visible, ColumnDescriptor};

/// Transient drag state for a column list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderController {
    /// Index of the dragged column in the full list.
    drag_index: Option<usize>,
    /// Index of the current drop target in the full list.
    hover_index: Option<usize>,
}

impl ReorderController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_index.is_some()
    }

    /// Full-list index of the dragged column, if any.
    pub fn drag_index(&self) -> Option<usize> {
        self.drag_index
    }

    /// Full-list index of the hover target, if any.
    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    /// Begin dragging the column at `visible_index` among visible columns.
    ///
    /// An out-of-range index leaves the controller idle.
    pub fn drag_start(&mut self, columns: &[ColumnDescriptor], visible_index: usize) {
        self.drag_index = full_index_of_visible(columns, visible_index);
        self.hover_index = None;
    }

    /// Record `full_index` as the drop target unless it is the dragged column.
    pub fn drag_over(&mut self, full_index: usize) {
        if self.drag_index.is_some_and(|from| from != full_index) {
            self.hover_index = Some(full_index);
        }
    }

    /// Drop the dragged column at the recorded target.
    ///
    /// Returns the reordered full list, or `None` when there was nothing to
    /// move. The transient state is cleared either way.
    pub fn drag_end(&mut self, columns: &mut Vec<ColumnDescriptor>) -> Option<Vec<ColumnDescriptor>> {
        let from = self.drag_index.take();
        let to = self.hover_index.take();
        let (from, to) = (from?, to?);

        if from == to || from >= columns.len() {
            return None;
        }

        let column = columns.remove(from);
        let to = to.min(columns.len());
        columns.insert(to, column);
        Some(columns.clone())
    }

    /// Abandon the current drag.
    pub fn cancel(&mut self) {
        self.drag_index = None;
        self.hover_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|k| ColumnDescriptor::new(*k, k.to_uppercase()))
            .collect()
    }

    fn keys(columns: &[ColumnDescriptor]) -> String {
        columns.iter().map(|c| c.key.as_str()).collect()
    }

    fn drag(columns: &mut Vec<ColumnDescriptor>, visible: usize, to: usize) -> Option<Vec<ColumnDescriptor>> {
        let mut controller = ReorderController::new();
        controller.drag_start(columns, visible);
        controller.drag_over(to);
        controller.drag_end(columns)
    }

    #[test]
    fn test_drag_moves_column_forward() {
        let mut cols = columns();
        let emitted = drag(&mut cols, 0, 3).unwrap();
        assert_eq!(keys(&cols), "bcdae");
        assert_eq!(emitted, cols);
    }

    #[test]
    fn test_drag_moves_column_backward() {
        let mut cols = columns();
        drag(&mut cols, 4, 1);
        assert_eq!(keys(&cols), "aebcd");
    }

    #[test]
    fn test_reorder_inverse_restores_order() {
        let original = columns();
        for from in 0..original.len() {
            for to in 0..original.len() {
                let mut cols = original.clone();
                drag(&mut cols, from, to);
                // The moved column now sits at `to`; bring it back.
                drag(&mut cols, to, from);
                assert_eq!(cols, original, "from {} to {}", from, to);
            }
        }
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut cols = columns();
        let mut controller = ReorderController::new();
        controller.drag_start(&cols, 2);
        controller.drag_over(2);
        assert_eq!(controller.hover_index(), None);
        assert!(controller.drag_end(&mut cols).is_none());
        assert_eq!(cols, columns());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drag_end_without_hover_clears_state() {
        let mut cols = columns();
        let mut controller = ReorderController::new();
        controller.drag_start(&cols, 1);
        assert!(controller.is_dragging());
        assert!(controller.drag_end(&mut cols).is_none());
        assert!(!controller.is_dragging());
        assert_eq!(cols, columns());
    }

    #[test]
    fn test_drag_start_resolves_visible_index() {
        let mut cols = columns();
        cols[0].visible = false;
        cols[1].visible = false;
        let mut controller = ReorderController::new();
        controller.drag_start(&cols, 0);
        assert_eq!(controller.drag_index(), Some(2));
    }

    #[test]
    fn test_drag_over_without_start_is_ignored() {
        let mut controller = ReorderController::new();
        controller.drag_over(3);
        assert_eq!(controller.hover_index(), None);
    }

    #[test]
    fn test_drag_start_out_of_range_stays_idle() {
        let cols = columns();
        let mut controller = ReorderController::new();
        controller.drag_start(&cols, 10);
        assert!(!controller.is_dragging());
    }
}
