//! Transition commands returned by a state's run behavior.

use super::state::StateId;

/// Outcome of one run step of the current state.
///
/// A command is produced fresh by every run invocation and consumed by the
/// [`StateMachine`](crate::driver::StateMachine) in the same loop iteration.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Command;
///
/// assert_eq!(Command::nothing(), Command::Nothing);
/// assert!(Command::back().target().is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Command {
    /// Stay in the current state
    #[default]
    Nothing,

    /// Return to the state that was current before the last change
    Back,

    /// Leave the current state and enter `target`
    Change(StateId),
}

impl Command {
    /// Stay in the current state.
    pub const fn nothing() -> Self {
        Self::Nothing
    }

    /// Return to the previously current state.
    pub const fn back() -> Self {
        Self::Back
    }

    /// Transition to `target`.
    pub const fn change_to(target: StateId) -> Self {
        Self::Change(target)
    }

    /// Transition to an optional target.
    ///
    /// # Panics
    ///
    /// Panics when `target` is `None`. A change without a destination is a
    /// wiring mistake and must not degrade into [`Command::Nothing`].
    #[track_caller]
    pub fn change_to_opt(target: Option<StateId>) -> Self {
        match target {
            Some(target) => Self::Change(target),
            None => panic!("transition requested without a target state"),
        }
    }

    /// Target state of a `Change` command.
    pub fn target(&self) -> Option<StateId> {
        match self {
            Self::Change(target) => Some(*target),
            Self::Nothing | Self::Back => None,
        }
    }

    /// Whether this command leaves the machine where it is.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_nothing() {
        assert_eq!(Command::default(), Command::Nothing);
        assert!(Command::default().is_nothing());
    }

    #[test]
    fn change_carries_target() {
        let target = StateId::new(3);
        let command = Command::change_to(target);

        assert_eq!(command, Command::Change(target));
        assert_eq!(command.target(), Some(target));
        assert!(!command.is_nothing());
    }

    #[test]
    fn back_and_nothing_have_no_target() {
        assert_eq!(Command::back().target(), None);
        assert_eq!(Command::nothing().target(), None);
    }

    #[test]
    fn change_to_opt_accepts_some() {
        let target = StateId::new(1);
        assert_eq!(Command::change_to_opt(Some(target)), Command::Change(target));
    }

    #[test]
    #[should_panic(expected = "without a target state")]
    fn change_to_opt_rejects_missing_target() {
        let _ = Command::change_to_opt(None);
    }
}
