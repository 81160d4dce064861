//! Tickstate: a cooperative state machine core for polled devices
//!
//! Tickstate drives single-threaded, non-blocking device loops. A flat set
//! of states each owns enter, run and exit behaviors; every loop iteration
//! runs the current state once and applies the [`Command`](crate::core::Command)
//! it hands back. Slowly varying inputs (time of day, light level, flags)
//! are turned into edge-triggered callbacks by [`OnChange`](watch::OnChange)
//! detectors, and settings screens are modelled by a clamped
//! [`Menu`](menu::Menu).
//!
//! # Core Concepts
//!
//! - **State**: named node with boxed behaviors over a shared context `C`
//! - **Command**: `Nothing`, `Back` or `Change(target)`, returned by run behaviors
//! - **StateMachine**: owns the state arena and performs one iteration per `run`
//! - **OnChange**: fires a callback when a polled value changes
//! - **Menu**: ordered entries with one active selection
//!
//! Hardware is reached through the traits in [`hal`]; [`sim`] provides
//! in-memory implementations, and [`clock`] wires everything into a
//! bedside alarm clock.
//!
//! # Example
//!
//! ```rust
//! use tickstate::core::{Command, State};
//! use tickstate::driver::{StateMachine, Step};
//!
//! #[derive(Default)]
//! struct Lamp {
//!     presses: u32,
//!     lit: bool,
//! }
//!
//! let mut builder = StateMachine::builder();
//! let off = builder.add_state(State::new("off"));
//! let on = builder.add_state(State::new("on").on_enter(|lamp: &mut Lamp| {
//!     lamp.lit = true;
//!     Ok(())
//! }));
//! builder
//!     .state_mut(off)
//!     .unwrap()
//!     .set_on_run(move |lamp: &mut Lamp| {
//!         if lamp.presses > 0 {
//!             lamp.presses -= 1;
//!             return Ok(Command::change_to(on));
//!         }
//!         Ok(Command::nothing())
//!     });
//!
//! let mut machine = builder.initial(off).build().unwrap();
//! let mut lamp = Lamp { presses: 1, ..Default::default() };
//!
//! machine.start(&mut lamp).unwrap();
//! assert_eq!(machine.run(&mut lamp).unwrap(), Step::Changed { from: off, to: on });
//! assert!(lamp.lit);
//! ```

pub mod builder;
pub mod clock;
pub mod core;
pub mod driver;
pub mod hal;
pub mod menu;
pub mod sim;
pub mod watch;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{BehaviorError, BehaviorResult, Command, State, StateId};
pub use driver::{MachineError, StateMachine, Step};
pub use menu::{Menu, MenuItem};
pub use watch::OnChange;
