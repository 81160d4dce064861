//! Edge-triggered change detection over polled values.

use crate::core::BehaviorResult;
use std::fmt;
use tracing::trace;

type Source<T, C> = Box<dyn Fn(&C) -> T>;
type Refresh<C> = Box<dyn FnMut(&mut C) -> BehaviorResult>;
type Callback<T, C> = Box<dyn FnMut(&T, &T, &mut C) -> BehaviorResult>;

/// Fires a callback when a polled value changes.
///
/// The value itself lives in the context `C`; `source` reads it out and the
/// optional `refresh` step pulls a fresh reading from hardware into the
/// context before each comparison. The callback receives
/// `(previous, current)` and the context, so it can update shared state
/// that later detectors in the same pass observe.
///
/// # Example
///
/// ```rust
/// use tickstate::watch::OnChange;
///
/// struct Sensor {
///     reading: u8,
///     changes: Vec<(u8, u8)>,
/// }
///
/// let mut sensor = Sensor { reading: 1, changes: Vec::new() };
/// let mut watch = OnChange::new(
///     &sensor,
///     |s: &Sensor| s.reading,
///     |prev, now, s: &mut Sensor| {
///         s.changes.push((*prev, *now));
///         Ok(())
///     },
/// );
///
/// assert!(!watch.evaluate(&mut sensor).unwrap());
/// sensor.reading = 4;
/// assert!(watch.evaluate(&mut sensor).unwrap());
/// assert_eq!(sensor.changes, vec![(1, 4)]);
/// ```
pub struct OnChange<T, C> {
    last: T,
    source: Source<T, C>,
    refresh: Option<Refresh<C>>,
    on_change: Callback<T, C>,
}

impl<T, C> OnChange<T, C>
where
    T: Clone + PartialEq,
{
    /// Watch the value `source` reads from `ctx`.
    ///
    /// The current value is captured as the baseline, so the first
    /// evaluation fires only if the value moved since construction.
    pub fn new<S, F>(ctx: &C, source: S, on_change: F) -> Self
    where
        S: Fn(&C) -> T + 'static,
        F: FnMut(&T, &T, &mut C) -> BehaviorResult + 'static,
    {
        Self {
            last: source(ctx),
            source: Box::new(source),
            refresh: None,
            on_change: Box::new(on_change),
        }
    }

    /// Pull a fresh reading into the context before every comparison.
    pub fn with_refresh<R>(mut self, refresh: R) -> Self
    where
        R: FnMut(&mut C) -> BehaviorResult + 'static,
    {
        self.refresh = Some(Box::new(refresh));
        self
    }

    /// Value observed at the end of the last evaluation.
    pub fn last(&self) -> &T {
        &self.last
    }

    /// Refresh, compare and fire on change.
    ///
    /// Returns whether the callback fired.
    pub fn evaluate(&mut self, ctx: &mut C) -> BehaviorResult<bool> {
        self.evaluate_forced(ctx, false)
    }

    /// Like [`evaluate`](Self::evaluate), but fires even without a change
    /// when `force` is set.
    ///
    /// Forcing re-applies an effect whose meaning changed elsewhere; an
    /// unchanged value is passed as both previous and current.
    pub fn evaluate_forced(&mut self, ctx: &mut C, force: bool) -> BehaviorResult<bool> {
        if let Some(refresh) = self.refresh.as_mut() {
            refresh(ctx)?;
        }

        let current = (self.source)(ctx);
        if !force && current == self.last {
            return Ok(false);
        }

        trace!(force, "value change detected");
        (self.on_change)(&self.last, &current, ctx)?;
        self.last = current;
        Ok(true)
    }

    /// Fire unconditionally with the stored value as previous and current.
    ///
    /// Used to apply the current value once, e.g. when a state is entered.
    pub fn action(&mut self, ctx: &mut C) -> BehaviorResult {
        (self.on_change)(&self.last, &self.last, ctx)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OnChange<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnChange")
            .field("last", &self.last)
            .field("refresh", &self.refresh.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        value: i32,
        raw: i32,
        refreshes: usize,
        fired: Vec<(i32, i32)>,
    }

    fn watch(probe: &Probe) -> OnChange<i32, Probe> {
        OnChange::new(probe, |p: &Probe| p.value, |prev, now, p: &mut Probe| {
            p.fired.push((*prev, *now));
            Ok(())
        })
    }

    #[test]
    fn fires_only_on_change() {
        let mut probe = Probe::default();
        let mut detector = watch(&probe);

        for value in [0, 0, 5, 5] {
            probe.value = value;
            detector.evaluate(&mut probe).unwrap();
        }

        assert_eq!(probe.fired, vec![(0, 5)]);
        assert_eq!(*detector.last(), 5);
    }

    #[test]
    fn forced_evaluation_fires_with_unchanged_value() {
        let mut probe = Probe {
            value: 3,
            ..Default::default()
        };
        let mut detector = watch(&probe);

        assert!(detector.evaluate_forced(&mut probe, true).unwrap());
        assert_eq!(probe.fired, vec![(3, 3)]);
    }

    #[test]
    fn action_fires_with_stored_value() {
        let mut probe = Probe {
            value: 8,
            ..Default::default()
        };
        let mut detector = watch(&probe);

        probe.value = 9;
        detector.action(&mut probe).unwrap();

        assert_eq!(probe.fired, vec![(8, 8)]);
        assert_eq!(*detector.last(), 8);
    }

    #[test]
    fn refresh_runs_before_comparison() {
        let mut probe = Probe::default();
        let mut detector = watch(&probe).with_refresh(|p: &mut Probe| {
            p.refreshes += 1;
            p.value = p.raw;
            Ok(())
        });

        probe.raw = 7;
        assert!(detector.evaluate(&mut probe).unwrap());
        assert!(!detector.evaluate(&mut probe).unwrap());

        assert_eq!(probe.refreshes, 2);
        assert_eq!(probe.fired, vec![(0, 7)]);
    }

    #[test]
    fn refresh_error_skips_callback() {
        let mut probe = Probe::default();
        let mut detector =
            watch(&probe).with_refresh(|_: &mut Probe| Err("light sensor timeout".into()));

        probe.value = 1;
        assert!(detector.evaluate(&mut probe).is_err());
        assert!(probe.fired.is_empty());
        assert_eq!(*detector.last(), 0);
    }

    #[test]
    fn callback_can_feed_later_detectors() {
        #[derive(Default)]
        struct Chain {
            lux: u32,
            level: u32,
            applied: Vec<u32>,
        }

        let mut chain = Chain::default();
        let mut light = OnChange::new(&chain, |c: &Chain| c.lux, |_, lux, c: &mut Chain| {
            c.level = lux / 10;
            Ok(())
        });
        let mut level = OnChange::new(&chain, |c: &Chain| c.level, |_, level, c: &mut Chain| {
            c.applied.push(*level);
            Ok(())
        });

        chain.lux = 42;
        light.evaluate(&mut chain).unwrap();
        level.evaluate(&mut chain).unwrap();

        assert_eq!(chain.applied, vec![4]);
    }
}
