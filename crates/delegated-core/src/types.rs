use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

///
/// RecordKey
///
/// Storage primary key for a record row.
///
/// ## Semantics
/// - Keys are allocated by the store, monotonically from 1
/// - `UNSAVED` (zero) marks a transient row that has never been inserted
/// - Explicitly keyed rows are accepted; the allocator skips past them
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct RecordKey(u64);

impl RecordKey {
    /// Sentinel for rows that have never been persisted.
    pub const UNSAVED: Self = Self(0);

    #[must_use]
    pub const fn new(key: u64) -> Self {
        Self(key)
    }

    /// Returns true if this key has not yet been assigned by a store.
    #[must_use]
    pub const fn is_unsaved(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

///
/// Timestamp
///
/// Logical time value handed out by [`Database::now`](crate::db::Database::now).
/// Strictly increasing per database; used for `touch` bookkeeping, not wall
/// time.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    #[must_use]
    pub const fn new(tick: u64) -> Self {
        Self(tick)
    }
}
