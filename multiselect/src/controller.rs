//! The select control.
//!
//! [`Controller`] owns the single source of truth (catalog, selection,
//! panel, search text) and derives everything else from it on demand. Every
//! selection mutation notifies the host's change callback with the full
//! list of selected keys, after the mutation has been applied and after the
//! controller's lock has been released, so the callback may read the
//! controller freely.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::catalog::{Catalog, CatalogIndex, CatalogVersion, Item, Key};
use crate::config::{Options, Presentation};
use crate::error::ConfigError;
use crate::filter::FilterEngine;
use crate::listener::{ListenerGuard, PointerEvent, PointerHub};
use crate::memo::Memo;
use crate::panel::{Panel, PanelEvent, PanelState, Transition};
use crate::region::HitRegion;
use crate::selection::{SelectionMode, SelectionStore};
use crate::summary::summarize;
use crate::window::{RowData, Window, viewport_height};

/// Host callback receiving the selected keys. Treat the slice as unordered.
pub type ChangeCallback<K> = Arc<dyn Fn(&[K]) + Send + Sync>;

const SELECT_ALL_LABEL: &str = "Select All";
const UNSELECT_ALL_LABEL: &str = "Unselect All";

/// Unique identifier for a control instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__multiselect_{}", self.0)
    }
}

/// What the input field shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    /// Search text while open, selection summary while closed.
    pub text: String,
    /// Set when `text` is empty.
    pub placeholder: Option<String>,
    /// The input only accepts typing while the panel is open.
    pub read_only: bool,
}

/// Select-all header shown above the rows in multi mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub checked: bool,
    pub label: &'static str,
}

type SummaryKey = (u64, CatalogVersion, usize, bool);
type RowsKey = (CatalogVersion, String, u64);

struct Inner<K> {
    id: ControlId,
    options: Options,
    presentation: Arc<Presentation>,
    catalog: Catalog<K>,
    index: CatalogIndex<K>,
    selection: SelectionStore<K>,
    panel: Panel,
    filter: FilterEngine<K>,
    summary: Memo<SummaryKey, String>,
    rows: Memo<RowsKey, Arc<RowData<K>>>,
    region: Option<Arc<dyn HitRegion>>,
    /// Registered only while the panel is open.
    outside: Option<ListenerGuard>,
    on_change: Option<ChangeCallback<K>>,
    batch_depth: usize,
    /// A change notification is owed to the host.
    pending: bool,
}

impl<K: Key> Inner<K> {
    fn summary(&mut self) -> String {
        let key = (
            self.selection.revision(),
            self.index.version(),
            self.options.max_display_items,
            self.options.show_summary,
        );
        let selection = &self.selection;
        let index = &self.index;
        self.summary.get(key, |(_, _, max, show)| {
            summarize(selection.keys(), index, *show, *max)
        })
    }

    fn filtered(&mut self) -> Arc<[Item<K>]> {
        self.filter.view(&self.catalog, self.panel.query())
    }

    fn row_data(&mut self) -> Arc<RowData<K>> {
        let items = self.filtered();
        let key = (
            self.catalog.version(),
            self.panel.query().to_string(),
            self.selection.revision(),
        );
        let selection = &self.selection;
        let presentation = &self.presentation;
        self.rows.get(key, |_| {
            Arc::new(RowData::new(
                items,
                selection.members().clone(),
                Arc::clone(presentation),
            ))
        })
    }

    fn take_notification(&mut self) -> Option<(ChangeCallback<K>, Vec<K>)> {
        if !self.pending || self.batch_depth > 0 {
            return None;
        }
        self.pending = false;
        let callback = self.on_change.clone()?;
        Some((callback, self.selection.to_vec()))
    }

    fn pointer_down(&mut self, event: &PointerEvent) {
        let outside = self
            .region
            .as_ref()
            .is_some_and(|region| !region.contains(event.x, event.y));
        if !outside {
            return;
        }
        if self.panel.handle(PanelEvent::OutsidePointer) == Transition::Closed {
            log::debug!("{} closed by pointer at ({}, {})", self.id, event.x, event.y);
            self.outside = None;
        }
    }
}

/// A single or multi select control.
///
/// Cloning yields another handle to the same control. The control is torn
/// down, and its outside-pointer listener released, when the last handle
/// is dropped.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use multiselect::{Controller, Options};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let control = Controller::builder()
///     .options(Options::new().multi().with_summary(true))
///     .catalog([(1, "Apple"), (2, "Banana"), (3, "Cherry")])
///     .on_change(move |keys: &[i32]| *sink.lock().unwrap() = keys.to_vec())
///     .build()
///     .unwrap();
///
/// control.toggle(1);
/// control.toggle(2);
/// assert_eq!(control.summary(), "Apple, +1");
/// assert_eq!(seen.lock().unwrap().len(), 2);
/// ```
#[derive(Clone)]
pub struct Controller<K: Key> {
    inner: Arc<RwLock<Inner<K>>>,
    hub: PointerHub,
}

impl<K: Key> Controller<K> {
    /// Build a control with `options`, an empty catalog and a private hub.
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        ControllerBuilder::new().options(options).build()
    }

    pub fn builder() -> ControllerBuilder<K> {
        ControllerBuilder::new()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<K>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<K>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the state, then deliver any owed notification.
    fn mutate<R>(&self, f: impl FnOnce(&mut Inner<K>) -> R) -> R {
        let result = f(&mut self.write());
        self.flush();
        result
    }

    fn flush(&self) {
        let owed = self.write().take_notification();
        if let Some((callback, keys)) = owed {
            callback(&keys);
        }
    }

    pub fn id(&self) -> ControlId {
        self.read().id
    }

    pub fn mode(&self) -> SelectionMode {
        self.read().selection.mode()
    }

    pub fn options(&self) -> Options {
        self.read().options.clone()
    }

    /// The hub this control registers its outside-pointer listener with.
    pub fn hub(&self) -> &PointerHub {
        &self.hub
    }

    /// Replace the change callback.
    pub fn set_on_change<F>(&self, callback: F)
    where
        F: Fn(&[K]) + Send + Sync + 'static,
    {
        let callback: ChangeCallback<K> = Arc::new(callback);
        self.write().on_change = Some(callback);
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> Catalog<K> {
        self.read().catalog.clone()
    }

    /// Replace the catalog.
    ///
    /// The filtered view and label index follow the new catalog. Selected
    /// keys missing from it are kept. When the catalog goes from empty to
    /// non-empty while nothing is selected the host is notified once.
    pub fn set_catalog(&self, catalog: impl Into<Catalog<K>>) {
        let catalog = catalog.into();
        self.mutate(|inner| {
            let was_empty = inner.catalog.is_empty();
            log::debug!(
                "{} catalog {} -> {} ({} items)",
                inner.id,
                inner.catalog.version(),
                catalog.version(),
                catalog.len()
            );
            inner.index = CatalogIndex::build(&catalog);
            inner.catalog = catalog;
            if was_empty && !inner.catalog.is_empty() && inner.selection.is_empty() {
                inner.pending = true;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle `key` under the control's selection mode. Returns whether the
    /// key is selected afterwards.
    pub fn toggle(&self, key: K) -> bool {
        self.mutate(|inner| {
            let selected = inner.selection.toggle(key);
            inner.pending = true;
            selected
        })
    }

    /// Select every catalog item, or unselect all when everything already
    /// is. Ignores the search filter. No-op in single mode.
    pub fn select_all(&self) -> bool {
        self.mutate(|inner| {
            let applied = inner.selection.select_all(&inner.catalog);
            if applied {
                log::debug!(
                    "{} select_all -> {} selected",
                    inner.id,
                    inner.selection.len()
                );
                inner.pending = true;
            }
            applied
        })
    }

    /// Empty the selection.
    ///
    /// The host hears about it immediately with an empty list, even inside
    /// [`batch`](Self::batch); the regular change notification follows.
    pub fn clear(&self) {
        let direct = {
            let mut inner = self.write();
            inner.selection.clear();
            inner.pending = true;
            log::debug!("{} cleared", inner.id);
            inner.on_change.clone()
        };
        if let Some(callback) = direct {
            callback(&[]);
        }
        self.flush();
    }

    /// Selected keys in selection order.
    pub fn selected(&self) -> Vec<K> {
        self.read().selection.to_vec()
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.read().selection.is_selected(key)
    }

    pub fn selected_count(&self) -> usize {
        self.read().selection.len()
    }

    /// Whether the clear affordance should be offered.
    pub fn clear_visible(&self) -> bool {
        !self.read().selection.is_empty()
    }

    /// Select-all header, present in multi mode only.
    pub fn header(&self) -> Option<Header> {
        let inner = self.read();
        if inner.selection.mode() != SelectionMode::Multi {
            return None;
        }
        let all = inner.selection.is_all_selected(&inner.catalog);
        Some(Header {
            checked: all && !inner.catalog.is_empty(),
            label: if all { UNSELECT_ALL_LABEL } else { SELECT_ALL_LABEL },
        })
    }

    /// Run `f`, delivering at most one change notification for all the
    /// mutations it makes, after it returns.
    pub fn batch<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        struct Depth<'a, K: Key>(&'a Controller<K>);

        impl<K: Key> Drop for Depth<'_, K> {
            fn drop(&mut self) {
                self.0.write().batch_depth -= 1;
            }
        }

        self.write().batch_depth += 1;
        let result = {
            let _depth = Depth(self);
            f(self)
        };
        self.flush();
        result
    }

    // -------------------------------------------------------------------------
    // Summary & input
    // -------------------------------------------------------------------------

    /// Truncated selection summary; empty when disabled or nothing resolves.
    pub fn summary(&self) -> String {
        self.write().summary()
    }

    pub fn set_max_display_items(&self, max: usize) {
        self.write().options.max_display_items = max;
    }

    pub fn set_show_summary(&self, show: bool) {
        self.write().options.show_summary = show;
    }

    pub fn input_view(&self) -> InputView {
        let mut inner = self.write();
        let open = inner.panel.is_open();
        let text = if open {
            inner.panel.query().to_string()
        } else {
            inner.summary()
        };
        let placeholder = text.is_empty().then(|| inner.options.placeholder.clone());
        InputView {
            text,
            placeholder,
            read_only: !open,
        }
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    pub fn query(&self) -> String {
        self.read().panel.query().to_string()
    }

    /// Update the search text. Ignored while the panel is closed.
    pub fn set_query(&self, query: impl Into<String>) -> bool {
        self.write().panel.set_query(query)
    }

    /// Catalog items matching the current search text.
    pub fn filtered(&self) -> Arc<[Item<K>]> {
        self.write().filtered()
    }

    // -------------------------------------------------------------------------
    // Panel
    // -------------------------------------------------------------------------

    pub fn state(&self) -> PanelState {
        self.read().panel.state()
    }

    pub fn is_open(&self) -> bool {
        self.read().panel.is_open()
    }

    /// The user activated the control surface: open if closed, close if open.
    pub fn activate(&self) -> Transition {
        self.apply(PanelEvent::Activate)
    }

    pub fn open(&self) -> Transition {
        self.apply(PanelEvent::Open)
    }

    pub fn close(&self) -> Transition {
        self.apply(PanelEvent::Close)
    }

    /// Set the region used to tell outside pointer events from inside ones.
    /// Until a region is set, pointer events never close the panel.
    pub fn set_region(&self, region: impl HitRegion + 'static) {
        let region: Arc<dyn HitRegion> = Arc::new(region);
        self.write().region = Some(region);
    }

    /// Whether an outside-pointer listener is currently registered.
    pub fn is_listening(&self) -> bool {
        self.read().outside.is_some()
    }

    fn apply(&self, event: PanelEvent) -> Transition {
        let mut inner = self.write();
        let transition = inner.panel.handle(event);
        match transition {
            Transition::Opened => {
                let weak = Arc::downgrade(&self.inner);
                inner.outside = Some(self.hub.register(move |event| outside_pointer(&weak, event)));
            }
            Transition::Closed => inner.outside = None,
            Transition::Unchanged => {}
        }
        transition
    }

    // -------------------------------------------------------------------------
    // Window
    // -------------------------------------------------------------------------

    /// The row window for the current filtered view. `None` while closed.
    pub fn window(&self) -> Option<Window<K>> {
        let mut inner = self.write();
        if !inner.panel.is_open() {
            return None;
        }
        let data = inner.row_data();
        let header = match inner.selection.mode() {
            SelectionMode::Multi => inner.options.header_height,
            SelectionMode::Single => 0,
        };
        let height = viewport_height(
            data.items.len(),
            inner.options.row_height,
            inner.options.max_viewport_height,
            header,
        );
        Some(Window::new(data, inner.options.row_height, height))
    }
}

fn outside_pointer<K: Key>(inner: &Weak<RwLock<Inner<K>>>, event: &PointerEvent) {
    // Control already torn down.
    let Some(inner) = inner.upgrade() else {
        return;
    };
    inner
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .pointer_down(event);
}

impl<K: Key> std::fmt::Debug for Controller<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("Controller")
            .field("id", &inner.id)
            .field("mode", &inner.selection.mode())
            .field("state", &inner.panel.state())
            .field("catalog", &inner.catalog.len())
            .field("selected", &inner.selection.len())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Controller`].
pub struct ControllerBuilder<K: Key> {
    options: Options,
    catalog: Catalog<K>,
    hub: Option<PointerHub>,
    on_change: Option<ChangeCallback<K>>,
}

impl<K: Key> Default for ControllerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> ControllerBuilder<K> {
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            catalog: Catalog::empty(),
            hub: None,
            on_change: None,
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn catalog<I>(mut self, items: impl IntoIterator<Item = I>) -> Self
    where
        I: Into<Item<K>>,
    {
        self.catalog = Catalog::new(items);
        self
    }

    /// Share a host-wide hub. Without one the control gets a private hub,
    /// reachable through [`Controller::hub`].
    pub fn hub(mut self, hub: PointerHub) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[K]) + Send + Sync + 'static,
    {
        let callback: ChangeCallback<K> = Arc::new(callback);
        self.on_change = Some(callback);
        self
    }

    /// Validate the options and build the control.
    ///
    /// With a change callback installed the host is told the initial, empty
    /// selection right away.
    pub fn build(self) -> Result<Controller<K>, ConfigError> {
        self.options.validate()?;

        let id = ControlId::new();
        let mode = self.options.mode;
        log::debug!(
            "{} build mode={:?} items={}",
            id,
            mode,
            self.catalog.len()
        );

        let initial = self.on_change.clone();
        let inner = Inner {
            id,
            presentation: Arc::new(self.options.presentation.clone()),
            options: self.options,
            index: CatalogIndex::build(&self.catalog),
            catalog: self.catalog,
            selection: SelectionStore::new(mode),
            panel: Panel::new(),
            filter: FilterEngine::new(),
            summary: Memo::new(),
            rows: Memo::new(),
            region: None,
            outside: None,
            on_change: self.on_change,
            batch_depth: 0,
            pending: false,
        };

        let controller = Controller {
            inner: Arc::new(RwLock::new(inner)),
            hub: self.hub.unwrap_or_default(),
        };

        if let Some(callback) = initial {
            callback(&[]);
        }
        Ok(controller)
    }
}
