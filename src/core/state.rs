//! States of the cooperative machine.
//!
//! A state is inert glue: it owns three user behaviors (enter, run, exit)
//! and forwards to them when the driver asks. All side effects live in the
//! behaviors, which receive the machine's shared context explicitly.

use super::command::Command;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type returned by state behaviors and change callbacks.
///
/// Any collaborator error converts into it with `?`.
pub type BehaviorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by state behaviors.
pub type BehaviorResult<T = ()> = Result<T, BehaviorError>;

type Hook<C> = Box<dyn FnMut(&mut C) -> BehaviorResult>;
type RunHook<C> = Box<dyn FnMut(&mut C) -> BehaviorResult<Command>>;

/// Stable handle of a state inside a machine's arena.
///
/// Ids are issued by [`StateMachineBuilder`](crate::builder::StateMachineBuilder)
/// and stay valid for the lifetime of the machine built from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(usize);

impl StateId {
    /// Wrap a raw arena index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of the state machine.
///
/// Behaviors default to no-ops; the default run behavior returns
/// [`Command::Nothing`]. Behaviors can be rebound at any time and the new
/// behavior is used from the next invocation on.
///
/// # Example
///
/// ```rust
/// use tickstate::core::{Command, State};
///
/// let mut counter = State::new("counter").on_run(|ticks: &mut u32| {
///     *ticks += 1;
///     Ok(Command::nothing())
/// });
///
/// let mut ticks = 0;
/// assert_eq!(counter.run(&mut ticks).unwrap(), Command::Nothing);
/// assert_eq!(ticks, 1);
/// ```
pub struct State<C> {
    name: String,
    on_enter: Hook<C>,
    on_run: RunHook<C>,
    on_exit: Hook<C>,
}

impl<C> State<C> {
    /// Create a state with no-op behaviors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_enter: Box::new(|_| Ok(())),
            on_run: Box::new(|_| Ok(Command::Nothing)),
            on_exit: Box::new(|_| Ok(())),
        }
    }

    /// Name used in logs and diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the enter behavior, builder style.
    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) -> BehaviorResult + 'static,
    {
        self.set_on_enter(f);
        self
    }

    /// Set the run behavior, builder style.
    pub fn on_run<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) -> BehaviorResult<Command> + 'static,
    {
        self.set_on_run(f);
        self
    }

    /// Set the exit behavior, builder style.
    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut C) -> BehaviorResult + 'static,
    {
        self.set_on_exit(f);
        self
    }

    /// Replace the enter behavior.
    pub fn set_on_enter<F>(&mut self, f: F)
    where
        F: FnMut(&mut C) -> BehaviorResult + 'static,
    {
        self.on_enter = Box::new(f);
    }

    /// Replace the run behavior.
    pub fn set_on_run<F>(&mut self, f: F)
    where
        F: FnMut(&mut C) -> BehaviorResult<Command> + 'static,
    {
        self.on_run = Box::new(f);
    }

    /// Replace the exit behavior.
    pub fn set_on_exit<F>(&mut self, f: F)
    where
        F: FnMut(&mut C) -> BehaviorResult + 'static,
    {
        self.on_exit = Box::new(f);
    }

    /// Invoke the run behavior and hand back its command.
    pub fn run(&mut self, ctx: &mut C) -> BehaviorResult<Command> {
        (self.on_run)(ctx)
    }

    /// Invoke the enter behavior.
    pub fn enter(&mut self, ctx: &mut C) -> BehaviorResult {
        (self.on_enter)(ctx)
    }

    /// Invoke the exit behavior.
    pub fn exit(&mut self, ctx: &mut C) -> BehaviorResult {
        (self.on_exit)(ctx)
    }

    /// Command that keeps this state current.
    pub fn nothing(&self) -> Command {
        Command::Nothing
    }

    /// Command that moves the machine to `target`.
    pub fn change_to(&self, target: StateId) -> Command {
        Command::Change(target)
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        entries: Vec<&'static str>,
    }

    #[test]
    fn default_behaviors_are_noops() {
        let mut state: State<Log> = State::new("idle");
        let mut log = Log::default();

        assert_eq!(state.run(&mut log).unwrap(), Command::Nothing);
        state.enter(&mut log).unwrap();
        state.exit(&mut log).unwrap();
        assert!(log.entries.is_empty());
    }

    #[test]
    fn behaviors_receive_context() {
        let mut state = State::new("busy")
            .on_enter(|log: &mut Log| {
                log.entries.push("enter");
                Ok(())
            })
            .on_run(|log: &mut Log| {
                log.entries.push("run");
                Ok(Command::Nothing)
            })
            .on_exit(|log: &mut Log| {
                log.entries.push("exit");
                Ok(())
            });

        let mut log = Log::default();
        state.enter(&mut log).unwrap();
        state.run(&mut log).unwrap();
        state.exit(&mut log).unwrap();

        assert_eq!(log.entries, vec!["enter", "run", "exit"]);
    }

    #[test]
    fn rebinding_takes_effect_on_next_invocation() {
        let target = StateId::new(7);
        let mut state: State<Log> = State::new("menu");

        assert_eq!(state.run(&mut Log::default()).unwrap(), Command::Nothing);

        state.set_on_run(move |_| Ok(Command::change_to(target)));
        assert_eq!(
            state.run(&mut Log::default()).unwrap(),
            Command::Change(target)
        );
    }

    #[test]
    fn run_errors_propagate() {
        let mut state: State<Log> =
            State::new("broken").on_run(|_| Err("sensor unplugged".into()));

        let err = state.run(&mut Log::default()).unwrap_err();
        assert_eq!(err.to_string(), "sensor unplugged");
    }

    #[test]
    fn command_constructors_on_state() {
        let state: State<Log> = State::new("idle");
        let target = StateId::new(2);

        assert_eq!(state.nothing(), Command::Nothing);
        assert_eq!(state.change_to(target), Command::Change(target));
    }

    #[test]
    fn state_id_displays_index() {
        assert_eq!(StateId::new(4).to_string(), "#4");
        assert_eq!(StateId::new(4).index(), 4);
    }

    #[test]
    fn state_id_serializes_correctly() {
        let id = StateId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn debug_shows_name() {
        let state: State<Log> = State::new("alarm");
        assert!(format!("{state:?}").contains("alarm"));
    }
}
