//! Headless select control: a catalog of labeled items, a text filter,
//! single or multi selection, a truncated summary, an open/closed panel and
//! a window adapter that feeds a virtualized row renderer.
//!
//! [`Controller`] composes the pieces and is what a host embeds. The other
//! modules are usable on their own for hosts that want to wire things
//! differently.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod listener;
pub mod memo;
pub mod panel;
pub mod region;
pub mod selection;
pub mod summary;
pub mod window;

pub use catalog::{Catalog, CatalogIndex, CatalogVersion, Item, Key};
pub use config::{Options, Presentation};
pub use controller::{ChangeCallback, ControlId, Controller, ControllerBuilder, Header, InputView};
pub use error::ConfigError;
pub use filter::{FilterEngine, filter, matches};
pub use listener::{ListenerGuard, ListenerId, PointerEvent, PointerHub};
pub use panel::{Panel, PanelEvent, PanelState, Transition};
pub use region::{HitRegion, Rect};
pub use selection::{SelectionMode, SelectionStore};
pub use summary::summarize;
pub use window::{FixedSizeList, Row, RowData, ScrollState, Virtualizer, Window};

pub mod prelude {
    pub use crate::catalog::{Catalog, Item};
    pub use crate::config::{Options, Presentation};
    pub use crate::controller::{Controller, ControllerBuilder};
    pub use crate::listener::{PointerEvent, PointerHub};
    pub use crate::panel::PanelState;
    pub use crate::region::{HitRegion, Rect};
    pub use crate::selection::SelectionMode;
    pub use crate::window::{FixedSizeList, Virtualizer, Window};
}
