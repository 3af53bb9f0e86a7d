//! Column descriptors and the visibility controller.
//!
//! A table's layout is an ordered list of [`ColumnDescriptor`]s. List order
//! is display order; only `visible` and relative order change at runtime.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned (the default).
    #[default]
    Left,
    /// Centered.
    Center,
}

/// Metadata describing one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field key, unique within a list.
    pub key: String,
    /// Header label.
    pub label: String,
    /// Cell alignment.
    #[serde(default)]
    pub align: Align,
    /// Whether the column is displayed.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl ColumnDescriptor {
    /// Create a visible, left-aligned column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            align: Align::Left,
            visible: true,
        }
    }

    /// Set the alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Mark the column as hidden by default.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Merge a persisted layout onto a record type's default columns.
///
/// Precedence:
/// - a key known to `defaults` keeps its default label and alignment and
///   takes `visible` from the override;
/// - a key unknown to `defaults` is taken as-is with left alignment;
/// - the override's order wins, and default keys missing from the override
///   are appended in default order.
///
/// Duplicate keys in the override keep their first occurrence.
pub fn merge_columns(
    defaults: &[ColumnDescriptor],
    overrides: &[ColumnDescriptor],
) -> Vec<ColumnDescriptor> {
    let mut merged: Vec<ColumnDescriptor> = Vec::with_capacity(defaults.len());

    for entry in overrides {
        if merged.iter().any(|c| c.key == entry.key) {
            continue;
        }
        let column = match defaults.iter().find(|d| d.key == entry.key) {
            Some(default) => ColumnDescriptor {
                visible: entry.visible,
                ..default.clone()
            },
            None => ColumnDescriptor {
                align: Align::Left,
                ..entry.clone()
            },
        };
        merged.push(column);
    }

    for default in defaults {
        if !merged.iter().any(|c| c.key == default.key) {
            merged.push(default.clone());
        }
    }

    merged
}

/// Flip the visibility of the column with the given key.
///
/// Returns the full updated list for the owner to persist, or `None` when
/// the key is unknown (in which case nothing changes).
pub fn toggle_visibility(
    columns: &mut [ColumnDescriptor],
    key: &str,
) -> Option<Vec<ColumnDescriptor>> {
    let column = columns.iter_mut().find(|c| c.key == key)?;
    column.visible = !column.visible;
    Some(columns.to_vec())
}

/// Iterate over the visible columns in display order.
pub fn visible_columns(columns: &[ColumnDescriptor]) -> impl Iterator<Item = &ColumnDescriptor> {
    columns.iter().filter(|c| c.visible)
}

/// Map an index among the visible columns back to the full list.
pub fn full_index_of_visible(columns: &[ColumnDescriptor], visible_index: usize) -> Option<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.visible)
        .nth(visible_index)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("title", "Title"),
            ColumnDescriptor::new("price", "Price").align(Align::Center),
            ColumnDescriptor::new("status", "Status").align(Align::Center),
            ColumnDescriptor::new("views", "Views").hidden(),
        ]
    }

    fn keys(columns: &[ColumnDescriptor]) -> Vec<&str> {
        columns.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn test_toggle_visibility_flips_flag() {
        let mut columns = defaults();
        let emitted = toggle_visibility(&mut columns, "price").unwrap();
        assert!(!columns[1].visible);
        assert_eq!(emitted, columns);
    }

    #[test]
    fn test_double_toggle_restores_layout() {
        let original = defaults();
        for column in &original {
            let mut columns = original.clone();
            toggle_visibility(&mut columns, &column.key);
            toggle_visibility(&mut columns, &column.key);
            assert_eq!(columns, original);
        }
    }

    #[test]
    fn test_toggle_unknown_key_is_noop() {
        let mut columns = defaults();
        assert!(toggle_visibility(&mut columns, "nope").is_none());
        assert_eq!(columns, defaults());
    }

    #[test]
    fn test_merge_takes_only_visibility_for_known_keys() {
        let overrides = vec![ColumnDescriptor {
            key: "price".to_string(),
            label: "Asking".to_string(),
            align: Align::Left,
            visible: false,
        }];
        let merged = merge_columns(&defaults(), &overrides);
        let price = merged.iter().find(|c| c.key == "price").unwrap();
        assert_eq!(price.label, "Price");
        assert_eq!(price.align, Align::Center);
        assert!(!price.visible);
    }

    #[test]
    fn test_merge_keeps_override_order_and_appends_missing() {
        let overrides = vec![
            ColumnDescriptor::new("status", "Status"),
            ColumnDescriptor::new("title", "Title"),
        ];
        let merged = merge_columns(&defaults(), &overrides);
        assert_eq!(keys(&merged), vec!["status", "title", "price", "views"]);
        assert!(!merged[3].visible);
    }

    #[test]
    fn test_merge_unknown_key_used_as_is_left_aligned() {
        let overrides = vec![ColumnDescriptor {
            key: "legacy".to_string(),
            label: "Legacy".to_string(),
            align: Align::Center,
            visible: true,
        }];
        let merged = merge_columns(&defaults(), &overrides);
        assert_eq!(merged[0].key, "legacy");
        assert_eq!(merged[0].label, "Legacy");
        assert_eq!(merged[0].align, Align::Left);
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn test_merge_empty_override_is_default() {
        assert_eq!(merge_columns(&defaults(), &[]), defaults());
    }

    #[test]
    fn test_full_index_of_visible_skips_hidden() {
        let mut columns = defaults();
        columns[1].visible = false;
        assert_eq!(full_index_of_visible(&columns, 0), Some(0));
        assert_eq!(full_index_of_visible(&columns, 1), Some(2));
        assert_eq!(full_index_of_visible(&columns, 2), None);
    }

    #[test]
    fn test_descriptor_deserializes_with_defaults() {
        let column: ColumnDescriptor =
            serde_json::from_str(r#"{"key":"city","label":"City"}"#).unwrap();
        assert_eq!(column.align, Align::Left);
        assert!(column.visible);
    }
}
