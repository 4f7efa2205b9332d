//! The ordered item catalog supplied by the host and its key-to-label index.
//!
//! A [`Catalog`] is immutable once built. Replacing the catalog means
//! building a new one, which gets a fresh [`CatalogVersion`]; everything
//! derived from a catalog (filtered views, the label index, row bundles)
//! is keyed on that version.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Bounds every item key has to satisfy.
///
/// Blanket-implemented, so any `Clone + Eq + Hash + Send + Sync` type works.
pub trait Key: Clone + Eq + Hash + Send + Sync + 'static {}

impl<T> Key for T where T: Clone + Eq + Hash + Send + Sync + 'static {}

/// A selectable entry: an opaque key plus a display label.
///
/// The label is optional so that malformed host data can still be shown;
/// an unlabeled item never matches a non-empty query and never contributes
/// to the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<K> {
    pub key: K,
    pub label: Option<String>,
}

impl<K> Item<K> {
    pub fn new(key: K, label: impl Into<String>) -> Self {
        Self {
            key,
            label: Some(label.into()),
        }
    }

    pub fn unlabeled(key: K) -> Self {
        Self { key, label: None }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl<K, S: Into<String>> From<(K, S)> for Item<K> {
    fn from((key, label): (K, S)) -> Self {
        Self::new(key, label)
    }
}

/// Identity of one catalog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogVersion(u64);

impl CatalogVersion {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "catalog#{}", self.0)
    }
}

/// An ordered, shared, read-only sequence of items.
///
/// Cloning is cheap and keeps the same version.
#[derive(Debug, Clone)]
pub struct Catalog<K> {
    version: CatalogVersion,
    items: Arc<[Item<K>]>,
}

impl<K> Catalog<K> {
    pub fn new<I>(items: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<Item<K>>,
    {
        let items: Vec<Item<K>> = items.into_iter().map(Into::into).collect();
        Self {
            version: CatalogVersion::next(),
            items: items.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<Item<K>>::new())
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    /// The shared backing slice. Two catalogs with the same version share it.
    pub fn shared(&self) -> Arc<[Item<K>]> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<K>> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(|item| &item.key)
    }
}

impl<K> Default for Catalog<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> From<Vec<Item<K>>> for Catalog<K> {
    fn from(items: Vec<Item<K>>) -> Self {
        Self::new(items)
    }
}

/// Key-to-label lookup derived from one catalog version.
///
/// Only the summary formatter reads it. When a key occurs more than once in
/// the catalog the first occurrence wins.
#[derive(Debug, Clone)]
pub struct CatalogIndex<K> {
    version: CatalogVersion,
    labels: HashMap<K, Option<String>>,
}

impl<K: Key> CatalogIndex<K> {
    pub fn build(catalog: &Catalog<K>) -> Self {
        let mut labels = HashMap::with_capacity(catalog.len());
        for item in catalog.iter() {
            if let Entry::Vacant(slot) = labels.entry(item.key.clone()) {
                slot.insert(item.label.clone());
            }
        }
        log::trace!(
            "CatalogIndex::build {} items={} keys={}",
            catalog.version(),
            catalog.len(),
            labels.len()
        );
        Self {
            version: catalog.version(),
            labels,
        }
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    /// Label for `key`, or `None` if the key is unknown or unlabeled.
    pub fn label(&self, key: &K) -> Option<&str> {
        self.labels.get(key).and_then(|label| label.as_deref())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
