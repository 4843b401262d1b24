use parking_lot::{Mutex, const_mutex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// EventState
/// Process-wide, in-memory counters.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

impl EventState {
    const fn new() -> Self {
        Self {
            ops: EventOps::new(),
            entities: BTreeMap::new(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Registry
    pub mapper_hits: u64,
    pub mappers_built: u64,
    pub build_failures: u64,

    // Validation
    pub validation_failures: u64,

    // Session writes
    pub documents_written: u64,
    pub documents_updated: u64,
    pub documents_deleted: u64,
}

impl EventOps {
    const fn new() -> Self {
        Self {
            mapper_hits: 0,
            mappers_built: 0,
            build_failures: 0,
            validation_failures: 0,
            documents_written: 0,
            documents_updated: 0,
            documents_deleted: 0,
        }
    }
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub mapper_hits: u64,
    pub mappers_built: u64,
    pub build_failures: u64,
    pub validation_failures: u64,
    pub documents_written: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

static EVENT_STATE: Mutex<EventState> = const_mutex(EventState::new());

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    f(&EVENT_STATE.lock())
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    f(&mut EVENT_STATE.lock())
}

/// Reset all counters (useful in tests).
pub(crate) fn reset() {
    with_state_mut(|m| *m = EventState::default());
}

/// Snapshot the current counters.
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        entities: m.entities.clone(),
    })
}
