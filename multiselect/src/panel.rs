//! Open/closed state of the dropdown panel and the search text it owns.

/// Whether the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Inputs to the panel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The user activated the control surface.
    Activate,
    /// A pointer went down outside the control's region.
    OutsidePointer,
    /// Programmatic open.
    Open,
    /// Programmatic close.
    Close,
}

/// Result of feeding an event to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    Unchanged,
}

/// Panel state machine.
///
/// Every entry into `Closed` clears the search query. Nothing here touches
/// the selection.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    state: PanelState,
    query: String,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn handle(&mut self, event: PanelEvent) -> Transition {
        let next = match (self.state, event) {
            (PanelState::Closed, PanelEvent::Activate | PanelEvent::Open) => PanelState::Open,
            (PanelState::Open, PanelEvent::Activate | PanelEvent::OutsidePointer | PanelEvent::Close) => {
                PanelState::Closed
            }
            (state, _) => state,
        };

        if next == self.state {
            return Transition::Unchanged;
        }

        log::debug!("Panel {:?} -> {:?} on {:?}", self.state, next, event);
        self.state = next;
        match next {
            PanelState::Open => Transition::Opened,
            PanelState::Closed => {
                self.query.clear();
                Transition::Closed
            }
        }
    }

    /// Replace the search text. Only accepted while open; the input is
    /// read-only while closed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        if !self.is_open() {
            log::warn!("Panel::set_query ignored while closed");
            return false;
        }
        self.query = query.into();
        true
    }
}
