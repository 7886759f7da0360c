//! Observability: ephemeral counters for codec and write activity.
//!
//! Engine logic MUST NOT read counters directly; everything flows through
//! `StateEvent` and `EventSink`. This module is the only bridge between
//! the engine and the thread-local counter state.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static EVENTS: RefCell<EventReport> = RefCell::new(EventReport::default());
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// SliceKind
///
/// The persisted slice an event refers to.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SliceKind {
    Page,
    PerPage,
    Sort,
    Filters,
    JoinOperator,
}

///
/// StateEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateEvent {
    ParseRejected { slice: SliceKind },
    WriteCommitted { slice: SliceKind },
    WriteSuppressed { slice: SliceKind },
    DebounceArmed,
    DebounceFired,
    DebounceCanceled,
}

///
/// EventSink
///
/// Receiver for engine events. The default sink increments the
/// thread-local `EventReport`; tests may install an override.
///

pub trait EventSink {
    fn record(&self, event: StateEvent);
}

///
/// EventReport
///
/// Point-in-time snapshot of the thread-local counters.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub parse_rejected: u64,
    pub write_committed: u64,
    pub write_suppressed: u64,
    pub debounce_armed: u64,
    pub debounce_fired: u64,
    pub debounce_canceled: u64,
}

impl EventReport {
    fn apply(&mut self, event: StateEvent) {
        match event {
            StateEvent::ParseRejected { .. } => self.parse_rejected += 1,
            StateEvent::WriteCommitted { .. } => self.write_committed += 1,
            StateEvent::WriteSuppressed { .. } => self.write_suppressed += 1,
            StateEvent::DebounceArmed => self.debounce_armed += 1,
            StateEvent::DebounceFired => self.debounce_fired += 1,
            StateEvent::DebounceCanceled => self.debounce_canceled += 1,
        }
    }
}

/// Record an event through the override sink, or into the counters.
pub fn record(event: StateEvent) {
    let overridden = SINK_OVERRIDE.with(|cell| {
        if let Some(sink) = cell.borrow().as_ref() {
            sink.record(event);
            true
        } else {
            false
        }
    });

    if !overridden {
        EVENTS.with(|cell| cell.borrow_mut().apply(event));
    }
}

/// Snapshot the thread-local counters.
#[must_use]
pub fn event_report() -> EventReport {
    EVENTS.with(|cell| *cell.borrow())
}

/// Reset the thread-local counters to zero.
pub fn reset_events() {
    EVENTS.with(|cell| *cell.borrow_mut() = EventReport::default());
}

/// Install or clear the sink override. While set, events bypass the
/// thread-local counters entirely.
pub fn set_sink_override(sink: Option<Rc<dyn EventSink>>) {
    SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = sink);
}

///
/// TESTS
///
