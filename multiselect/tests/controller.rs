use std::sync::{Arc, Mutex};

use multiselect::{
    Catalog, Controller, Item, Options, PanelState, PointerEvent, PointerHub, Rect, Transition,
};

type Log = Arc<Mutex<Vec<Vec<u32>>>>;

fn fruit() -> Vec<(u32, &'static str)> {
    vec![(1, "Apple"), (2, "Banana"), (3, "Cherry")]
}

/// Build a control whose notifications land in the returned log.
/// The initial sync notification is dropped.
fn control(options: Options) -> (Controller<u32>, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let control = Controller::builder()
        .options(options)
        .catalog(fruit())
        .on_change(move |keys: &[u32]| sink.lock().unwrap().push(keys.to_vec()))
        .build()
        .expect("valid options");
    log.lock().unwrap().clear();
    (control, log)
}

fn sorted(mut keys: Vec<u32>) -> Vec<u32> {
    keys.sort();
    keys
}

// ============================================================================
// Selection scenarios
// ============================================================================

#[test]
fn test_multi_toggle_summary_and_notification() {
    let (control, log) = control(Options::new().multi().with_summary(true));

    control.toggle(1);
    control.toggle(2);

    assert_eq!(sorted(control.selected()), vec![1, 2]);
    assert_eq!(control.summary(), "Apple, +1");

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(sorted(log[1].clone()), vec![1, 2]);
}

#[test]
fn test_single_mode_replaces_and_clears() {
    let (control, log) = control(Options::new());

    control.toggle(1);
    control.toggle(2);
    assert_eq!(control.selected(), vec![2]);

    control.toggle(2);
    assert!(control.selected().is_empty());
    assert_eq!(log.lock().unwrap().last(), Some(&vec![]));
}

#[test]
fn test_select_all_ignores_filter() {
    let (control, _) = control(Options::new().multi());
    control.open();
    control.set_query("an");

    let filtered: Vec<u32> = control.filtered().iter().map(|i| i.key).collect();
    assert_eq!(filtered, vec![2]);

    control.select_all();
    assert_eq!(sorted(control.selected()), vec![1, 2, 3]);

    control.select_all();
    assert!(control.selected().is_empty());
}

#[test]
fn test_select_all_single_mode_is_noop() {
    let (control, log) = control(Options::new());
    assert!(!control.select_all());
    assert!(log.lock().unwrap().is_empty());
    assert!(control.header().is_none());
}

#[test]
fn test_clear_notifies_immediately() {
    let (control, log) = control(Options::new().multi());
    control.toggle(1);
    control.toggle(3);
    log.lock().unwrap().clear();

    control.clear();
    assert!(control.selected().is_empty());

    let log = log.lock().unwrap();
    assert_eq!(log.first(), Some(&vec![]));
    assert!(log.iter().all(|keys| keys.is_empty()));
}

#[test]
fn test_clear_not_deferred_by_batch() {
    let (control, log) = control(Options::new().multi());
    control.toggle(1);
    log.lock().unwrap().clear();

    control.batch(|c| {
        c.toggle(2);
        c.clear();
        // The direct clear notification is already out.
        assert_eq!(log.lock().unwrap().as_slice(), &[Vec::<u32>::new()]);
        c.toggle(3);
    });

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1], vec![3]);
}

#[test]
fn test_batch_coalesces() {
    let (control, log) = control(Options::new().multi());
    control.batch(|c| {
        c.toggle(1);
        c.toggle(2);
        c.toggle(3);
    });
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(sorted(log[0].clone()), vec![1, 2, 3]);
}

#[test]
fn test_notification_sees_post_mutation_state() {
    let (control, _) = control(Options::new().multi());
    let observed = Arc::new(Mutex::new(Vec::new()));

    let handle = control.clone();
    let sink = Arc::clone(&observed);
    control.set_on_change(move |keys: &[u32]| {
        // Reading the control from inside the callback must not deadlock.
        sink.lock().unwrap().push((keys.to_vec(), handle.selected()));
    });

    control.toggle(2);
    let observed = observed.lock().unwrap();
    assert_eq!(observed[0].0, vec![2]);
    assert_eq!(observed[0].1, vec![2]);
}

#[test]
fn test_initial_sync_notification() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let _control = Controller::<u32>::builder()
        .on_change(move |keys: &[u32]| sink.lock().unwrap().push(keys.to_vec()))
        .build()
        .expect("default options");
    assert_eq!(log.lock().unwrap().as_slice(), &[Vec::<u32>::new()]);
}

#[test]
fn test_initial_sync_with_catalog_is_single() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let _control = Controller::builder()
        .options(Options::new().multi())
        .catalog(fruit())
        .on_change(move |keys: &[u32]| sink.lock().unwrap().push(keys.to_vec()))
        .build()
        .expect("valid options");
    assert_eq!(log.lock().unwrap().as_slice(), &[Vec::<u32>::new()]);
}

// ============================================================================
// Catalog replacement
// ============================================================================

#[test]
fn test_catalog_empty_to_non_empty_notifies() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let control = Controller::<u32>::builder()
        .on_change(move |keys: &[u32]| sink.lock().unwrap().push(keys.to_vec()))
        .build()
        .expect("default options");
    log.lock().unwrap().clear();

    control.set_catalog(Catalog::new(fruit()));
    assert_eq!(log.lock().unwrap().as_slice(), &[Vec::<u32>::new()]);

    // Non-empty to non-empty is silent.
    control.set_catalog(Catalog::new(fruit()));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_catalog_replacement_keeps_stale_keys() {
    let (control, _) = control(Options::new().multi().with_summary(true).with_max_display_items(5));
    control.toggle(1);
    control.toggle(2);

    control.set_catalog(vec![Item::new(2, "Blueberry"), Item::new(4, "Date")]);
    assert_eq!(sorted(control.selected()), vec![1, 2]);
    // Key 1 no longer resolves and drops out of the summary.
    assert_eq!(control.summary(), "Blueberry");

    control.toggle(1);
    assert_eq!(control.selected(), vec![2]);
}

#[test]
fn test_catalog_replacement_refilters() {
    let (control, _) = control(Options::new());
    control.open();
    control.set_query("a");
    assert_eq!(control.filtered().len(), 2);

    control.set_catalog(Catalog::new([(7, "Grape"), (8, "Fig"), (9, "Papaya")]));
    let keys: Vec<u32> = control.filtered().iter().map(|i| i.key).collect();
    assert_eq!(keys, vec![7, 9]);
}

// ============================================================================
// Panel, input and outside pointer
// ============================================================================

#[test]
fn test_activation_and_query_reset() {
    let (control, _) = control(Options::new());
    assert_eq!(control.state(), PanelState::Closed);
    assert!(!control.set_query("ignored"));

    assert_eq!(control.activate(), Transition::Opened);
    assert!(control.set_query("ch"));
    assert_eq!(control.query(), "ch");

    assert_eq!(control.activate(), Transition::Closed);
    assert_eq!(control.query(), "");
}

#[test]
fn test_outside_pointer_closes() {
    let hub = PointerHub::new();
    let control = Controller::builder()
        .catalog(fruit())
        .hub(hub.clone())
        .build()
        .expect("default options");
    control.set_region(Rect::new(0, 0, 30, 10));

    assert!(hub.is_empty());
    control.activate();
    control.set_query("app");
    assert!(control.is_listening());
    assert_eq!(hub.len(), 1);

    hub.dispatch(&PointerEvent::new(5, 5));
    assert!(control.is_open());

    hub.dispatch(&PointerEvent::new(50, 5));
    assert!(!control.is_open());
    assert_eq!(control.query(), "");
    assert!(!control.is_listening());
    assert!(hub.is_empty());
}

#[test]
fn test_outside_pointer_never_touches_selection() {
    let (control, log) = control(Options::new().multi());
    control.set_region(|x: u16, _y: u16| x < 10);
    control.toggle(1);
    log.lock().unwrap().clear();

    control.open();
    control.hub().dispatch(&PointerEvent::new(20, 0));
    assert!(!control.is_open());
    assert_eq!(control.selected(), vec![1]);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_no_region_never_closes() {
    let (control, _) = control(Options::new());
    control.open();
    control.hub().dispatch(&PointerEvent::new(500, 500));
    assert!(control.is_open());
}

#[test]
fn test_listener_released_on_close_and_teardown() {
    let hub = PointerHub::new();
    let control = Controller::<u32>::builder()
        .hub(hub.clone())
        .build()
        .expect("default options");

    control.open();
    assert_eq!(hub.len(), 1);
    control.close();
    assert!(hub.is_empty());

    control.open();
    let other = control.clone();
    drop(control);
    // Another handle keeps the control alive.
    assert_eq!(hub.len(), 1);
    drop(other);
    assert!(hub.is_empty());
}

#[test]
fn test_input_view() {
    let (control, _) = control(Options::new().with_summary(true).with_placeholder("Pick fruit"));

    let view = control.input_view();
    assert_eq!(view.text, "");
    assert_eq!(view.placeholder.as_deref(), Some("Pick fruit"));
    assert!(view.read_only);

    control.toggle(3);
    let view = control.input_view();
    assert_eq!(view.text, "Cherry");
    assert!(view.placeholder.is_none());

    control.open();
    let view = control.input_view();
    assert_eq!(view.text, "");
    assert!(!view.read_only);

    control.set_query("ba");
    assert_eq!(control.input_view().text, "ba");
}

#[test]
fn test_summary_follows_settings() {
    let (control, _) = control(Options::new().multi());
    control.toggle(1);
    control.toggle(2);
    control.toggle(3);
    assert_eq!(control.summary(), "");

    control.set_show_summary(true);
    assert_eq!(control.summary(), "Apple, +2");

    control.set_max_display_items(3);
    assert_eq!(control.summary(), "Apple, Banana, Cherry");
}

#[test]
fn test_clear_visibility_and_header() {
    let (control, _) = control(Options::new().multi());
    assert!(!control.clear_visible());

    let header = control.header().expect("multi mode has a header");
    assert!(!header.checked);
    assert_eq!(header.label, "Select All");

    control.select_all();
    assert!(control.clear_visible());
    let header = control.header().expect("multi mode has a header");
    assert!(header.checked);
    assert_eq!(header.label, "Unselect All");
}

#[test]
fn test_header_with_duplicate_keys_stays_select_all() {
    let control = Controller::builder()
        .options(Options::new().multi())
        .catalog([(1, "Apple"), (1, "Apple again"), (2, "Banana")])
        .build()
        .expect("valid options");

    control.select_all();
    assert_eq!(sorted(control.selected()), vec![1, 2]);
    let header = control.header().expect("multi mode has a header");
    assert!(!header.checked);
    assert_eq!(header.label, "Select All");

    control.select_all();
    assert_eq!(control.selected_count(), 2);
}

// ============================================================================
// Window
// ============================================================================

#[test]
fn test_window_gated_by_panel() {
    let (control, _) = control(Options::new());
    assert!(control.window().is_none());
    control.open();
    assert!(control.window().is_some());
}

#[test]
fn test_window_geometry() {
    let (single, _) = control(Options::new());
    single.open();
    let window = single.window().expect("open");
    assert_eq!(window.height(), 105);
    assert_eq!(window.item_count(), 3);

    let (multi, _) = control(Options::new().multi());
    multi.open();
    assert_eq!(multi.window().expect("open").height(), 60);

    multi.set_query("an");
    assert_eq!(multi.window().expect("open").height(), 0);
}

#[test]
fn test_window_rows_reflect_selection_and_filter() {
    let (control, _) = control(Options::new().multi());
    control.open();
    control.toggle(2);
    control.set_query("a");

    let window = control.window().expect("open");
    let rows: Vec<(u32, bool)> = window
        .rows(0..window.item_count())
        .map(|row| (row.item.key, row.selected))
        .collect();
    assert_eq!(rows, vec![(1, false), (2, true)]);
}

#[test]
fn test_window_data_is_stable_until_inputs_change() {
    let (control, _) = control(Options::new().multi());
    control.open();

    let first = control.window().expect("open");
    let second = control.window().expect("open");
    assert!(Arc::ptr_eq(first.data(), second.data()));

    control.toggle(1);
    let third = control.window().expect("open");
    assert!(!Arc::ptr_eq(second.data(), third.data()));
    // Filtered items did not change, only the selection did.
    assert!(Arc::ptr_eq(&second.data().items, &third.data().items));
}
