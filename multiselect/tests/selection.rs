use multiselect::{Catalog, SelectionMode, SelectionStore};

fn fruit() -> Catalog<u32> {
    Catalog::new([(1, "Apple"), (2, "Banana"), (3, "Cherry")])
}

#[test]
fn test_multi_toggle_flips() {
    let mut store = SelectionStore::multi();
    assert!(store.toggle(1));
    assert!(store.toggle(2));
    assert_eq!(store.keys(), &[1, 2]);

    assert!(!store.toggle(1));
    assert_eq!(store.keys(), &[2]);
}

#[test]
fn test_single_toggle_replaces() {
    let mut store = SelectionStore::single();
    store.toggle(1);
    store.toggle(2);
    assert_eq!(store.keys(), &[2]);

    assert!(!store.toggle(2));
    assert!(store.is_empty());
}

#[test]
fn test_select_all_uses_full_catalog() {
    let catalog = fruit();
    let mut store = SelectionStore::multi();
    store.toggle(2);

    assert!(store.select_all(&catalog));
    assert_eq!(store.len(), 3);
    assert!(store.is_all_selected(&catalog));

    assert!(store.select_all(&catalog));
    assert!(store.is_empty());
}

#[test]
fn test_select_all_keeps_stale_keys() {
    let catalog = fruit();
    let mut store = SelectionStore::multi();
    store.toggle(42);

    store.select_all(&catalog);
    assert_eq!(store.len(), 4);
    assert!(store.is_selected(&42));

    // Size differs from the catalog, so this selects again rather than clears.
    store.select_all(&catalog);
    assert_eq!(store.len(), 4);
}

#[test]
fn test_select_all_ignored_in_single_mode() {
    let mut store = SelectionStore::single();
    let before = store.revision();
    assert!(!store.select_all(&fruit()));
    assert!(store.is_empty());
    assert_eq!(store.revision(), before);
}

#[test]
fn test_clear_and_revision() {
    let mut store = SelectionStore::new(SelectionMode::Multi);
    store.toggle(1);
    store.toggle(3);
    let before = store.revision();

    store.clear();
    assert!(store.is_empty());
    assert!(store.revision() > before);

    // Clearing an empty store still counts as a mutation.
    let before = store.revision();
    store.clear();
    assert_eq!(store.revision(), before + 1);
}

#[test]
fn test_duplicate_keys_collapse() {
    let catalog = Catalog::new([(1, "Apple"), (1, "Apple again")]);
    let mut store = SelectionStore::multi();
    store.select_all(&catalog);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_select_all_with_duplicate_keys_never_reads_as_all() {
    let catalog = Catalog::new([(1, "Apple"), (1, "Apple again"), (2, "Banana")]);
    let mut store = SelectionStore::multi();

    assert!(store.select_all(&catalog));
    assert_eq!(store.keys(), &[1, 2]);
    assert!(!store.is_all_selected(&catalog));

    // Two distinct keys against three entries: a second call adds nothing.
    assert!(store.select_all(&catalog));
    assert_eq!(store.keys(), &[1, 2]);
}
