//! Debounced propagation: coalesce bursts of updates into one downstream
//! invocation after a quiescence window.
//!
//! The controller is a cooperative state machine (Idle -> Scheduled ->
//! Idle), not a timer thread. `schedule` re-arms the deadline and replaces
//! the pending arguments; the host event loop calls `poll` to let an
//! elapsed deadline fire. At most one invocation is ever pending, so rapid
//! input cannot grow a queue. Dropping the controller drops any pending
//! invocation with it.

use crate::obs::{self, StateEvent};
use std::time::{Duration, Instant};

///
/// Clock
///
/// Injected time source so debounce behavior is testable without waiting.
///

pub trait Clock {
    fn now(&self) -> Instant;
}

///
/// SystemClock
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
enum Phase<T> {
    Idle,
    Scheduled { deadline: Instant, args: T },
}

///
/// Debouncer
///
/// The pure scheduling state machine. `schedule` and `cancel` are its only
/// mutations; `poll` returns the pending arguments once the window has
/// elapsed with no further schedules.
///

#[derive(Debug)]
pub struct Debouncer<T, C: Clock = SystemClock> {
    delay: Duration,
    clock: C,
    phase: Phase<T>,
}

impl<T> Debouncer<T, SystemClock> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self::with_clock(delay, SystemClock)
    }
}

impl<T, C: Clock> Debouncer<T, C> {
    #[must_use]
    pub const fn with_clock(delay: Duration, clock: C) -> Self {
        Self {
            delay,
            clock,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self.phase, Phase::Scheduled { .. })
    }

    /// The arguments that will fire when the window elapses, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&T> {
        match &self.phase {
            Phase::Scheduled { args, .. } => Some(args),
            Phase::Idle => None,
        }
    }

    /// Arm (or re-arm) the window. The latest arguments replace any pending
    /// ones; last call wins.
    pub fn schedule(&mut self, args: T) {
        let deadline = self.clock.now() + self.delay;
        self.phase = Phase::Scheduled { deadline, args };
        obs::record(StateEvent::DebounceArmed);
    }

    /// Drop any pending invocation.
    pub fn cancel(&mut self) {
        if self.is_scheduled() {
            self.phase = Phase::Idle;
            obs::record(StateEvent::DebounceCanceled);
        }
    }

    /// Release the pending arguments if the quiescence window has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        match &self.phase {
            Phase::Scheduled { deadline, .. } if self.clock.now() >= *deadline => {
                let Phase::Scheduled { args, .. } = std::mem::replace(&mut self.phase, Phase::Idle)
                else {
                    return None;
                };
                obs::record(StateEvent::DebounceFired);
                Some(args)
            }
            _ => None,
        }
    }
}

///
/// Debounced
///
/// Callback-owning wrapper over `Debouncer`. The callback is swappable at
/// any time; a pending invocation always fires the latest one.
///

pub struct Debounced<T, C: Clock = SystemClock> {
    inner: Debouncer<T, C>,
    callback: Box<dyn FnMut(T)>,
}

impl<T> Debounced<T, SystemClock> {
    #[must_use]
    pub fn new(delay: Duration, callback: impl FnMut(T) + 'static) -> Self {
        Self::with_clock(delay, SystemClock, callback)
    }
}

impl<T, C: Clock> Debounced<T, C> {
    #[must_use]
    pub fn with_clock(delay: Duration, clock: C, callback: impl FnMut(T) + 'static) -> Self {
        Self {
            inner: Debouncer::with_clock(delay, clock),
            callback: Box::new(callback),
        }
    }

    /// Invoke the wrapper: re-arms the window with these arguments.
    pub fn call(&mut self, args: T) {
        self.inner.schedule(args);
    }

    /// Swap in a new callback without disturbing the pending schedule.
    pub fn set_callback(&mut self, callback: impl FnMut(T) + 'static) {
        self.callback = Box::new(callback);
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.inner.is_scheduled()
    }

    /// Fire the callback if the window has elapsed. Returns whether it
    /// fired.
    pub fn poll(&mut self) -> bool {
        if let Some(args) = self.inner.poll() {
            (self.callback)(args);
            true
        } else {
            false
        }
    }
}

impl<T, C: Clock> std::fmt::Debug for Debounced<T, C>
where
    T: std::fmt::Debug,
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}


///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{testing::ManualClock, *};
    use std::{cell::RefCell, rc::Rc};

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn rapid_schedules_coalesce_into_one_fire_with_last_args() {
        let clock = ManualClock::start();
        let mut debouncer = Debouncer::with_clock(DELAY, clock.clone());

        for n in 0..5 {
            debouncer.schedule(n);
            clock.advance(Duration::from_millis(50));
            assert_eq!(debouncer.poll(), None);
        }

        clock.advance(DELAY);
        assert_eq!(debouncer.poll(), Some(4));
        assert_eq!(debouncer.poll(), None);
        assert!(!debouncer.is_scheduled());
    }

    #[test]
    fn nothing_fires_before_the_window_elapses() {
        let clock = ManualClock::start();
        let mut debouncer = Debouncer::with_clock(DELAY, clock.clone());

        debouncer.schedule("pending");
        clock.advance(DELAY - Duration::from_millis(1));
        assert_eq!(debouncer.poll(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(), Some("pending"));
    }

    #[test]
    fn pending_exposes_the_scheduled_arguments() {
        let clock = ManualClock::start();
        let mut debouncer = Debouncer::with_clock(DELAY, clock.clone());

        assert_eq!(debouncer.pending(), None);
        debouncer.schedule("draft");
        assert_eq!(debouncer.pending(), Some(&"draft"));

        clock.advance(DELAY);
        assert_eq!(debouncer.poll(), Some("draft"));
        assert_eq!(debouncer.pending(), None);
    }

    #[test]
    fn cancel_discards_the_pending_invocation() {
        let clock = ManualClock::start();
        let mut debouncer = Debouncer::with_clock(DELAY, clock.clone());

        debouncer.schedule(1);
        debouncer.cancel();
        clock.advance(DELAY * 2);
        assert_eq!(debouncer.poll(), None);

        // Cancel when idle is a no-op.
        debouncer.cancel();
    }

    #[test]
    fn rearm_restarts_the_window() {
        let clock = ManualClock::start();
        let mut debouncer = Debouncer::with_clock(DELAY, clock.clone());

        debouncer.schedule(1);
        clock.advance(Duration::from_millis(299));
        debouncer.schedule(2);
        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.poll(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(), Some(2));
    }

    #[test]
    fn wrapped_callback_receives_the_latest_identity() {
        let clock = ManualClock::start();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let mut debounced = Debounced::with_clock(DELAY, clock.clone(), move |n: u32| {
            sink.borrow_mut().push(("first", n));
        });

        debounced.call(7);

        // The callback changes while an invocation is pending; the pending
        // invocation must use the replacement.
        let sink = seen.clone();
        debounced.set_callback(move |n: u32| {
            sink.borrow_mut().push(("second", n));
        });

        clock.advance(DELAY);
        assert!(debounced.poll());
        assert_eq!(seen.borrow().as_slice(), &[("second", 7)]);
    }

    #[test]
    fn dropping_a_pending_controller_never_fires() {
        let clock = ManualClock::start();
        let fired = Rc::new(RefCell::new(0_u32));

        let sink = fired.clone();
        let mut debounced = Debounced::with_clock(DELAY, clock.clone(), move |(): ()| {
            *sink.borrow_mut() += 1;
        });

        debounced.call(());
        drop(debounced);
        clock.advance(DELAY * 2);
        assert_eq!(*fired.borrow(), 0);
    }
}
