//! Single-flight guard for aggregation runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct GateState {
    in_flight: bool,
    epoch: u64,
}

/// Allows at most one aggregation per session at a time and lets a torn
/// down session reject results that arrive late.
#[derive(Debug, Default)]
pub struct AggregationGate {
    state: Mutex<GateState>,
}

impl AggregationGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. `None` while another run is in flight.
    pub fn try_begin(&self) -> Option<Ticket<'_>> {
        let mut state = self.lock();
        if state.in_flight {
            return None;
        }
        state.in_flight = true;
        Some(Ticket {
            gate: self,
            epoch: state.epoch,
        })
    }

    /// End the current epoch. Outstanding tickets become stale and the gate
    /// is free again for a new epoch.
    pub fn teardown(&self) {
        let mut state = self.lock();
        state.epoch += 1;
        state.in_flight = false;
        tracing::debug!(epoch = state.epoch, "aggregation gate torn down");
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of a claimed gate. Dropping it releases the gate, including when the
/// owning future is cancelled.
#[derive(Debug)]
pub struct Ticket<'a> {
    gate: &'a AggregationGate,
    epoch: u64,
}

impl Ticket<'_> {
    /// `false` once the gate has been torn down since this ticket was issued.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.gate.lock().epoch == self.epoch
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let mut state = self.gate.lock();
        // A stale ticket must not release a newer epoch's run.
        if state.epoch == self.epoch {
            state.in_flight = false;
        }
    }
}
