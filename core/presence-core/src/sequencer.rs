//! Last-write-wins ordering for overlapping refreshes.
//!
//! Refreshes are triggered by editor events and may finish out of order (a
//! slow file-size query can hold one back). Each refresh takes a ticket when
//! it is triggered; a finished payload is delivered only if no later ticket
//! has delivered first.

use presence_protocol::PresencePayload;
use std::sync::Mutex;
use tracing::debug;

/// Trigger-time order of a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The payload is now the latest one.
    Delivered(PresencePayload),
    /// A later refresh already delivered; the payload was dropped.
    Stale,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered(_))
    }
}

#[derive(Debug, Default)]
struct SequencerState {
    next_ticket: u64,
    delivered: Option<RefreshTicket>,
    latest: Option<PresencePayload>,
}

/// Hands out refresh tickets and keeps the latest delivered payload.
///
/// Shared between threads by reference; all state sits behind one lock.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    state: Mutex<SequencerState>,
}

impl RefreshSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trigger and returns its ticket.
    pub fn begin(&self) -> RefreshTicket {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let ticket = RefreshTicket(state.next_ticket);
        state.next_ticket += 1;
        ticket
    }

    /// Offers a finished payload. Results older than the last delivery are dropped.
    pub fn complete(&self, ticket: RefreshTicket, payload: PresencePayload) -> Delivery {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.delivered.is_some_and(|delivered| delivered > ticket) {
            debug!(
                ticket = ticket.value(),
                delivered = state.delivered.map(RefreshTicket::value),
                "Dropping stale presence payload"
            );
            return Delivery::Stale;
        }

        state.delivered = Some(ticket);
        state.latest = Some(payload.clone());
        Delivery::Delivered(payload)
    }

    /// The most recently delivered payload.
    pub fn latest(&self) -> Option<PresencePayload> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .latest
            .clone()
    }

    /// Start timestamp of the latest payload, to thread into the next refresh.
    pub fn previous_start(&self) -> Option<i64> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .latest
            .as_ref()
            .and_then(|payload| payload.start_timestamp)
    }

    /// Forgets the latest payload so the next refresh starts a new session.
    /// Ticket ordering is kept.
    pub fn reset(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.latest = None;
    }
}
