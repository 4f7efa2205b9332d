//! Text filtering of the catalog.
//!
//! Matching is a case-insensitive substring test against the item label.
//! An empty query matches everything, including unlabeled items; a
//! non-empty query never matches an unlabeled item.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogVersion, Item};
use crate::memo::Memo;

/// Whether `label` matches `query`.
pub fn matches(label: Option<&str>, query: &str) -> bool {
    query.is_empty() || contains_needle(label, &query.to_lowercase())
}

/// `needle` must already be lowercased.
fn contains_needle(label: Option<&str>, needle: &str) -> bool {
    label.is_some_and(|label| label.to_lowercase().contains(needle))
}

/// Items of `catalog` whose label matches `query`, in catalog order.
///
/// An empty query returns the catalog's own backing slice.
pub fn filter<K: Clone>(catalog: &Catalog<K>, query: &str) -> Arc<[Item<K>]> {
    if query.is_empty() {
        return catalog.shared();
    }

    let needle = query.to_lowercase();
    let items: Vec<Item<K>> = catalog
        .iter()
        .filter(|item| contains_needle(item.label(), &needle))
        .cloned()
        .collect();
    items.into()
}

/// [`filter`] with its output cached on `(catalog version, query)`.
#[derive(Debug)]
pub struct FilterEngine<K> {
    memo: Memo<(CatalogVersion, String), Arc<[Item<K>]>>,
}

impl<K> Default for FilterEngine<K> {
    fn default() -> Self {
        Self { memo: Memo::default() }
    }
}

impl<K: Clone> FilterEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered view. Repeated calls with an unchanged catalog and query
    /// return the same allocation.
    pub fn view(&mut self, catalog: &Catalog<K>, query: &str) -> Arc<[Item<K>]> {
        self.memo
            .get((catalog.version(), query.to_string()), |(version, query)| {
                let view = filter(catalog, query);
                log::trace!(
                    "FilterEngine recompute {} query={:?} matched={}/{}",
                    version,
                    query,
                    view.len(),
                    catalog.len()
                );
                view
            })
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.misses()
    }
}
