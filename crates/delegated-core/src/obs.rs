//! Observability: ephemeral in-memory counters for store and delegation
//! operations. Counters live on the database and reset with it; nothing
//! here touches storage internals.

use serde::{Deserialize, Serialize};
use std::cell::Cell;

///
/// Metrics
///
/// Per-database operation counters. `Cell` keeps read paths `&self`;
/// the database is single-threaded by construction.
///

#[derive(Debug, Default)]
pub struct Metrics {
    pub(crate) inserts: Cell<u64>,
    pub(crate) updates: Cell<u64>,
    pub(crate) removes: Cell<u64>,
    pub(crate) reads: Cell<u64>,
    pub(crate) rows_scanned: Cell<u64>,

    // Delegation surface
    pub(crate) delegate_loads: Cell<u64>,
    pub(crate) delegate_hits: Cell<u64>,
    pub(crate) delegate_misses: Cell<u64>,
    pub(crate) reverse_scans: Cell<u64>,
}

impl Metrics {
    /// Point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            inserts: self.inserts.get(),
            updates: self.updates.get(),
            removes: self.removes.get(),
            reads: self.reads.get(),
            rows_scanned: self.rows_scanned.get(),
            delegate_loads: self.delegate_loads.get(),
            delegate_hits: self.delegate_hits.get(),
            delegate_misses: self.delegate_misses.get(),
            reverse_scans: self.reverse_scans.get(),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.inserts.set(0);
        self.updates.set(0);
        self.removes.set(0);
        self.reads.set(0);
        self.rows_scanned.set(0);
        self.delegate_loads.set(0);
        self.delegate_hits.set(0);
        self.delegate_misses.set(0);
        self.reverse_scans.set(0);
    }
}

// bump
pub(crate) fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

///
/// MetricsSnapshot
/// Cloneable report of the counters above.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64,
    pub reads: u64,
    pub rows_scanned: u64,
    pub delegate_loads: u64,
    pub delegate_hits: u64,
    pub delegate_misses: u64,
    pub reverse_scans: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_bumps_and_reset_zeroes() {
        let metrics = Metrics::default();
        bump(&metrics.inserts);
        bump(&metrics.inserts);
        bump(&metrics.delegate_loads);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.inserts, 2);
        assert_eq!(snapshot.delegate_loads, 1);
        assert_eq!(snapshot.updates, 0);

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }
}
