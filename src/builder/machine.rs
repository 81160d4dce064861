//! Builder for constructing state machines.

use crate::builder::error::{BuildError, BuildViolation};
use crate::core::{State, StateHistory, StateId, DEFAULT_HISTORY_CAPACITY};
use crate::driver::StateMachine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing state machines.
///
/// States are registered first so their ids can be captured by other
/// states' behaviors; behaviors may be bound or rebound through
/// [`state_mut`](Self::state_mut) until the machine is built.
pub struct StateMachineBuilder<C> {
    states: Vec<State<C>>,
    initial: Option<StateId>,
    history_capacity: usize,
}

impl<C> StateMachineBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Register a state and return its id.
    pub fn add_state(&mut self, state: State<C>) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(state);
        id
    }

    /// Access a registered state to bind its behaviors.
    pub fn state_mut(&mut self, id: StateId) -> Option<&mut State<C>> {
        self.states.get_mut(id.index())
    }

    /// Set the initial state (required).
    pub fn initial(mut self, id: StateId) -> Self {
        self.initial = Some(id);
        self
    }

    /// Number of transitions the machine remembers for `Back`.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the state machine.
    ///
    /// Every configuration problem is reported at once in
    /// [`BuildError::Invalid`] rather than one per attempt.
    pub fn build(self) -> Result<StateMachine<C>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if let Validation::Failure(violations) = self.validate(initial) {
            return Err(BuildError::Invalid(violations.iter().cloned().collect()));
        }

        Ok(StateMachine::from_parts(
            self.states,
            initial,
            StateHistory::with_capacity(self.history_capacity),
        ))
    }

    fn validate(&self, initial: StateId) -> Validation<(), NonEmptyVec<BuildViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildViolation>>> = Vec::new();

        let count = self.states.len();
        let check = if initial.index() < count {
            Validation::success(())
        } else {
            Validation::fail(BuildViolation::UnknownInitialState { id: initial, count })
        };
        checks.push(check);

        let mut seen = HashSet::new();
        for (index, state) in self.states.iter().enumerate() {
            let check = if state.name().is_empty() {
                Validation::fail(BuildViolation::EmptyName {
                    id: StateId::new(index),
                })
            } else if !seen.insert(state.name()) {
                Validation::fail(BuildViolation::DuplicateName {
                    name: state.name().to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<C> Default for StateMachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
