//! Expand/collapse state for category entries within one navigation menu.
//!
//! Each entry with children is either closed or open, and at most one entry
//! of a menu is open at a time. Transitions return the list of changes the
//! DOM layer has to apply, closes first.
use crate::keys::Key;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// One entry changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChange {
    pub index: usize,
    pub state: PanelState,
}

/// What a toggle keydown should do to the event and the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResponse {
    pub changes: Vec<PanelChange>,
    /// Suppress the default action and stop propagation.
    pub consume: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMenu {
    entries: Vec<PanelState>,
}

impl CategoryMenu {
    /// A menu of `len` entries, all closed.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            entries: vec![PanelState::Closed; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<PanelState> {
        self.entries.get(index).copied()
    }

    #[must_use]
    pub fn open_entry(&self) -> Option<usize> {
        self.entries.iter().position(|state| state.is_open())
    }

    /// Flip entry `index`. Opening closes any other open entry first.
    pub fn toggle(&mut self, index: usize) -> Vec<PanelChange> {
        match self.state(index) {
            Some(PanelState::Open) => self.close(index),
            Some(PanelState::Closed) => self.open(index),
            None => Vec::new(),
        }
    }

    pub fn open(&mut self, index: usize) -> Vec<PanelChange> {
        if self.state(index) != Some(PanelState::Closed) {
            return Vec::new();
        }
        let mut changes = self.close_all_except(Some(index));
        self.entries[index] = PanelState::Open;
        changes.push(PanelChange {
            index,
            state: PanelState::Open,
        });
        changes
    }

    pub fn close(&mut self, index: usize) -> Vec<PanelChange> {
        if self.state(index) != Some(PanelState::Open) {
            return Vec::new();
        }
        self.entries[index] = PanelState::Closed;
        vec![PanelChange {
            index,
            state: PanelState::Closed,
        }]
    }

    /// Close every open entry (outside click, host menu closing).
    pub fn collapse_all(&mut self) -> Vec<PanelChange> {
        self.close_all_except(None)
    }

    /// React to a key pressed while entry `index`'s toggle has focus.
    pub fn on_toggle_key(&mut self, index: usize, key: Key) -> KeyResponse {
        match key {
            Key::Enter | Key::Space => KeyResponse {
                changes: self.toggle(index),
                consume: true,
            },
            Key::Escape => KeyResponse {
                changes: self.close(index),
                consume: false,
            },
            Key::ArrowLeft | Key::ArrowRight | Key::Other => KeyResponse::default(),
        }
    }

    fn close_all_except(&mut self, keep: Option<usize>) -> Vec<PanelChange> {
        let mut changes = Vec::new();
        for (index, state) in self.entries.iter_mut().enumerate() {
            if Some(index) == keep || !state.is_open() {
                continue;
            }
            *state = PanelState::Closed;
            changes.push(PanelChange {
                index,
                state: PanelState::Closed,
            });
        }
        changes
    }
}
