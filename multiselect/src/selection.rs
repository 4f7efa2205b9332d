//! The selection store: which keys are selected, under single or multi
//! selection rules.

use std::collections::HashSet;

use serde::Deserialize;

use crate::catalog::{Catalog, Key};

/// Selection mode, fixed for the lifetime of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    /// At most one key selected (radio-button style).
    #[default]
    Single,
    /// Any number of keys selected (checkbox style).
    Multi,
}

/// Tracks selected keys.
///
/// Keys are reported in the order they were selected. Hosts should still
/// treat the reported list as unordered.
///
/// Keys are never pruned when the catalog changes: a key that no longer
/// exists in the catalog stays selected until it is toggled off or the
/// store is cleared.
#[derive(Debug, Clone)]
pub struct SelectionStore<K> {
    mode: SelectionMode,
    order: Vec<K>,
    members: HashSet<K>,
    /// Bumped on every mutation, including ones that leave the set unchanged.
    revision: u64,
}

impl<K: Key> SelectionStore<K> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            order: Vec::new(),
            members: HashSet::new(),
            revision: 0,
        }
    }

    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn multi() -> Self {
        Self::new(SelectionMode::Multi)
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Toggle `key`.
    ///
    /// Multi: flips membership. Single: deselects if `key` is the current
    /// selection, otherwise replaces the selection with `key`.
    ///
    /// Returns whether `key` is selected afterwards.
    pub fn toggle(&mut self, key: K) -> bool {
        self.revision += 1;
        match self.mode {
            SelectionMode::Single => {
                if self.members.contains(&key) {
                    self.reset();
                    false
                } else {
                    self.reset();
                    self.insert(key);
                    true
                }
            }
            SelectionMode::Multi => {
                if self.members.remove(&key) {
                    self.order.retain(|k| k != &key);
                    false
                } else {
                    self.insert(key);
                    true
                }
            }
        }
    }

    /// Select or unselect the whole catalog.
    ///
    /// Works against the full catalog, never a filtered view. If the number
    /// of selected keys equals the catalog length the selection is emptied;
    /// otherwise every catalog key is added to the existing selection.
    ///
    /// Single mode has no select-all; the call is ignored and returns false.
    pub fn select_all(&mut self, catalog: &Catalog<K>) -> bool {
        if self.mode == SelectionMode::Single {
            log::warn!("select_all ignored in single selection mode");
            return false;
        }

        self.revision += 1;
        if self.is_all_selected(catalog) {
            self.reset();
        } else {
            for key in catalog.keys() {
                if !self.members.contains(key) {
                    self.insert(key.clone());
                }
            }
        }
        true
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.revision += 1;
        self.reset();
    }

    /// Size comparison against the catalog, as used by select-all.
    pub fn is_all_selected(&self, catalog: &Catalog<K>) -> bool {
        self.members.len() == catalog.len()
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected keys in selection order.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    /// Membership set, for per-row highlight lookups.
    pub fn members(&self) -> &HashSet<K> {
        &self.members
    }

    pub fn to_vec(&self) -> Vec<K> {
        self.order.clone()
    }

    fn insert(&mut self, key: K) {
        self.members.insert(key.clone());
        self.order.push(key);
    }

    fn reset(&mut self) {
        self.members.clear();
        self.order.clear();
    }
}

impl<K: Key> Default for SelectionStore<K> {
    fn default() -> Self {
        Self::single()
    }
}
