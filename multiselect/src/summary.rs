//! Compact, truncated rendering of the current selection.

use crate::catalog::{CatalogIndex, Key};

/// Render `selected` as a display string.
///
/// Empty when `enabled` is false or nothing is selected. Otherwise each key
/// is resolved through `index`; keys without a (non-empty) label are dropped.
/// Up to `max_items` labels are joined with `", "`, and when more remain a
/// `", +N"` suffix counts them.
///
/// ```
/// use multiselect::{Catalog, CatalogIndex, summarize};
///
/// let catalog = Catalog::new([(1, "Apple"), (2, "Banana"), (3, "Cherry")]);
/// let index = CatalogIndex::build(&catalog);
/// assert_eq!(summarize(&[1, 2, 3], &index, true, 2), "Apple, Banana, +1");
/// ```
pub fn summarize<K: Key>(
    selected: &[K],
    index: &CatalogIndex<K>,
    enabled: bool,
    max_items: usize,
) -> String {
    if !enabled || selected.is_empty() {
        return String::new();
    }

    let labels: Vec<&str> = selected
        .iter()
        .filter_map(|key| index.label(key))
        .filter(|label| !label.is_empty())
        .collect();

    if labels.len() > max_items {
        let shown = labels[..max_items].join(", ");
        format!("{}, +{}", shown, labels.len() - max_items)
    } else {
        labels.join(", ")
    }
}
