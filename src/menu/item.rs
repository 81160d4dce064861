//! A single menu entry.

use crate::core::StateId;

/// A labelled entry pointing at the state to enter when it is confirmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    label: String,
    selected: bool,
    next: Option<StateId>,
}

impl MenuItem {
    /// An entry leading to `next`.
    pub fn new(label: impl Into<String>, next: StateId) -> Self {
        Self {
            label: label.into(),
            selected: false,
            next: Some(next),
        }
    }

    /// An entry that leads nowhere; confirming it causes no transition.
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: false,
            next: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn next(&self) -> Option<StateId> {
        self.next
    }

    pub(crate) fn select(&mut self, selected: bool) {
        self.selected = selected;
    }
}
