//! Transition history tracking.
//!
//! Keeps a bounded log of applied transitions and the trail of previously
//! current states that `Back` commands return along.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept by a machine's history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 16;

/// How a transition was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Requested with [`Command::Change`](super::Command::Change)
    Change,
    /// Requested with [`Command::Back`](super::Command::Back)
    Back,
}

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateId, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: StateId::new(0),
///     to: StateId::new(1),
///     kind: TransitionKind::Change,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, StateId::new(1));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// Whether this was a change or a return
    pub kind: TransitionKind,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of transitions.
///
/// Only the most recent `capacity` transitions are kept, so a device loop
/// running forever holds constant memory. A capacity of zero disables both
/// the log and `Back` navigation.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{StateHistory, StateId, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(TransitionRecord {
///     from: StateId::new(0),
///     to: StateId::new(1),
///     kind: TransitionKind::Change,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![StateId::new(0), StateId::new(1)]);
/// assert_eq!(history.previous(), Some(StateId::new(0)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    records: VecDeque<TransitionRecord>,
    trail: VecDeque<StateId>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history keeping at most `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            trail: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of transitions kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record an applied transition.
    ///
    /// A `Change` pushes the state being left onto the back trail; a `Back`
    /// is expected to have consumed its target with [`pop_previous`](Self::pop_previous).
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }

        if record.kind == TransitionKind::Change {
            if self.trail.len() == self.capacity {
                self.trail.pop_front();
            }
            self.trail.push_back(record.from);
        }

        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// State a `Back` command would return to.
    pub fn previous(&self) -> Option<StateId> {
        self.trail.back().copied()
    }

    /// Take the state a `Back` command returns to.
    pub fn pop_previous(&mut self) -> Option<StateId> {
        self.trail.pop_back()
    }

    /// Path of states traversed by the retained transitions.
    ///
    /// Starts with the `from` state of the oldest retained transition, then
    /// lists the `to` state of each transition in order.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained transition.
    ///
    /// Returns `None` when there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> + '_ {
        self.records.iter()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Number of retained transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no transition has been retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
