//! Reactive helpers for polled values.
//!
//! An [`OnChange`] turns a value that is read every loop iteration into an
//! edge-triggered callback. Detectors are evaluated in a caller-chosen
//! order; since callbacks may update context fields other detectors read,
//! that order is part of the program's behavior.

mod on_change;

pub use on_change::OnChange;
