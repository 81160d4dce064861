//! State machine that drives one state per loop iteration.

use crate::builder::StateMachineBuilder;
use crate::core::{
    BehaviorError, Command, State, StateHistory, StateId, TransitionKind, TransitionRecord,
};
use crate::driver::error::{MachineError, Phase};
use chrono::Utc;
use tracing::{debug, trace};

/// Outcome of a single [`StateMachine::run`] iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The current state asked to stay
    Stayed,

    /// The machine changed from one state to another
    Changed { from: StateId, to: StateId },

    /// The machine returned to the previously current state
    WentBack { from: StateId, to: StateId },
}

impl Step {
    /// Whether a transition was applied.
    pub fn is_transition(&self) -> bool {
        !matches!(self, Self::Stayed)
    }

    /// State entered by this step, if any.
    pub fn entered(&self) -> Option<StateId> {
        match self {
            Self::Stayed => None,
            Self::Changed { to, .. } | Self::WentBack { to, .. } => Some(*to),
        }
    }
}

/// Flat, single-active-state machine over a shared context `C`.
///
/// The machine owns its states in an arena; commands and menu items refer
/// to them by [`StateId`]. Building a machine never invokes the initial
/// state's enter behavior; call [`start`](Self::start) for that.
///
/// # Example
///
/// ```rust
/// use tickstate::builder::StateMachineBuilder;
/// use tickstate::core::{Command, State};
/// use tickstate::driver::Step;
///
/// let mut builder = StateMachineBuilder::new();
/// let off = builder.add_state(State::new("off"));
/// let on = builder.add_state(State::new("on"));
///
/// builder
///     .state_mut(off)
///     .unwrap()
///     .set_on_run(move |presses: &mut u32| {
///         if *presses > 0 {
///             *presses -= 1;
///             Ok(Command::change_to(on))
///         } else {
///             Ok(Command::nothing())
///         }
///     });
///
/// let mut machine = builder.initial(off).build().unwrap();
/// let mut presses = 1;
///
/// assert_eq!(machine.run(&mut presses).unwrap(), Step::Changed { from: off, to: on });
/// assert_eq!(machine.current(), on);
/// ```
pub struct StateMachine<C> {
    states: Vec<State<C>>,
    current: StateId,
    history: StateHistory,
    started: bool,
}

impl<C> StateMachine<C> {
    /// Start building a machine.
    pub fn builder() -> StateMachineBuilder<C> {
        StateMachineBuilder::new()
    }

    pub(crate) fn from_parts(states: Vec<State<C>>, initial: StateId, history: StateHistory) -> Self {
        Self {
            states,
            current: initial,
            history,
            started: false,
        }
    }

    /// Id of the current state.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Name of the current state.
    pub fn current_name(&self) -> &str {
        self.states[self.current.index()].name()
    }

    /// Look up a state.
    pub fn state(&self, id: StateId) -> Option<&State<C>> {
        self.states.get(id.index())
    }

    /// Look up a state for rebinding its behaviors.
    pub fn state_mut(&mut self, id: StateId) -> Option<&mut State<C>> {
        self.states.get_mut(id.index())
    }

    /// Find a state by name.
    pub fn id_of(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name() == name)
            .map(StateId::new)
    }

    /// Whether `id` belongs to this machine.
    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.states.len()
    }

    /// Number of states in the arena.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Transition history.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Whether the current state has been entered.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Invoke the current state's enter behavior.
    ///
    /// Only the first call does anything; once started, or once any
    /// transition has been applied, this is a no-op.
    pub fn start(&mut self, ctx: &mut C) -> Result<(), MachineError> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let id = self.current;
        debug!(state = self.current_name(), "starting state machine");
        self.states[id.index()]
            .enter(ctx)
            .map_err(|source| self.behavior_error(id, Phase::Enter, source))
    }

    /// Run one loop iteration.
    ///
    /// Invokes the current state's run behavior once and applies the command
    /// it returns. A transition calls the outgoing state's exit behavior, then
    /// the incoming state's enter behavior; the incoming state's run behavior
    /// is left for the next iteration.
    pub fn run(&mut self, ctx: &mut C) -> Result<Step, MachineError> {
        let from = self.current;
        let command = self.states[from.index()]
            .run(ctx)
            .map_err(|source| self.behavior_error(from, Phase::Run, source))?;

        match command {
            Command::Nothing => Ok(Step::Stayed),
            Command::Change(to) => {
                self.transition(ctx, to, TransitionKind::Change)?;
                Ok(Step::Changed { from, to })
            }
            Command::Back => match self.history.previous() {
                Some(to) => {
                    self.transition(ctx, to, TransitionKind::Back)?;
                    Ok(Step::WentBack { from, to })
                }
                None => {
                    debug!(state = self.current_name(), "back requested without history");
                    Ok(Step::Stayed)
                }
            },
        }
    }

    /// Run `iterations` loop iterations, returning how many transitions were applied.
    pub fn run_for(&mut self, ctx: &mut C, iterations: usize) -> Result<usize, MachineError> {
        let mut transitions = 0;
        for _ in 0..iterations {
            if self.run(ctx)?.is_transition() {
                transitions += 1;
            }
        }
        Ok(transitions)
    }

    /// Run until `done` holds or `max_iterations` iterations have passed.
    ///
    /// `done` is checked before every iteration and once more at the end.
    /// Returns whether it was satisfied.
    pub fn run_until<P>(
        &mut self,
        ctx: &mut C,
        max_iterations: usize,
        mut done: P,
    ) -> Result<bool, MachineError>
    where
        P: FnMut(StateId, &C) -> bool,
    {
        for _ in 0..max_iterations {
            if done(self.current, ctx) {
                return Ok(true);
            }
            self.run(ctx)?;
        }
        Ok(done(self.current, ctx))
    }

    fn transition(
        &mut self,
        ctx: &mut C,
        to: StateId,
        kind: TransitionKind,
    ) -> Result<(), MachineError> {
        if !self.contains(to) {
            return Err(MachineError::UnknownState {
                id: to,
                count: self.states.len(),
            });
        }

        let from = self.current;
        self.states[from.index()]
            .exit(ctx)
            .map_err(|source| self.behavior_error(from, Phase::Exit, source))?;

        if kind == TransitionKind::Back {
            self.history.pop_previous();
        }
        self.current = to;
        self.started = true;
        self.history.record(TransitionRecord {
            from,
            to,
            kind,
            timestamp: Utc::now(),
        });

        debug!(
            from = self.states[from.index()].name(),
            to = self.states[to.index()].name(),
            ?kind,
            "state transition"
        );

        self.states[to.index()]
            .enter(ctx)
            .map_err(|source| self.behavior_error(to, Phase::Enter, source))?;
        trace!(state = self.current_name(), "entered");
        Ok(())
    }

    fn behavior_error(&self, id: StateId, phase: Phase, source: BehaviorError) -> MachineError {
        MachineError::Behavior {
            state: self.states[id.index()].name().to_string(),
            phase,
            source,
        }
    }
}
