//! Module: db
//! Responsibility: the embedded typed record store and the delegation
//! primitives generated code resolves against.
//! Does not own: role metadata (see `model`) or name derivation (derive).

mod scope;
mod table;


pub use scope::{DelegateScope, RoleRef};

use crate::{
    obs::{Metrics, bump},
    reference::DelegateRef,
    traits::{Delegate, Record},
    types::{RecordKey, Timestamp},
};
use std::{
    any::{Any, TypeId},
    cell::Cell,
    collections::HashMap,
};
use table::Table;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Strict store operations only. Lenient reads (`get`, `scan`, delegate
/// accessors) express absence as `None` instead.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("{record} key not found: {key}")]
    NotFound {
        record: &'static str,
        key: RecordKey,
    },

    #[error("{record} key conflict: {key}")]
    KeyConflict {
        record: &'static str,
        key: RecordKey,
    },
}

///
/// Database
///
/// In-memory typed store: one key-ordered table per record type, a
/// strictly increasing logical clock, and operation counters. All
/// operations are synchronous single-record reads and writes; scans are
/// key-ordered.
///

#[derive(Debug, Default)]
pub struct Database {
    tables: HashMap<TypeId, Box<dyn Any>>,
    clock: Cell<u64>,
    metrics: Metrics,
}

impl Database {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the logical clock. Strictly increasing; used
    /// for `touch` bookkeeping, not wall time.
    pub fn now(&self) -> Timestamp {
        let tick = self.clock.get() + 1;
        self.clock.set(tick);

        Timestamp::new(tick)
    }

    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn table<R: Record>(&self) -> Option<&Table<R>> {
        self.tables
            .get(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    fn table_mut<R: Record>(&mut self) -> &mut Table<R> {
        let boxed = self
            .tables
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Box::new(Table::<R>::new()));

        match boxed.downcast_mut() {
            Some(table) => table,
            // one table type per TypeId by construction
            None => unreachable!("table registry key/type mismatch"),
        }
    }

    fn existing_table_mut<R: Record>(&mut self) -> Option<&mut Table<R>> {
        self.tables
            .get_mut(&TypeId::of::<R>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    /// Insert a row, allocating its key if unsaved. Explicit keys are
    /// honored; an occupied slot is a `KeyConflict`.
    pub fn insert<R: Record>(&mut self, row: R) -> Result<RecordKey, StoreError> {
        let key = self.table_mut::<R>().insert(row)?;
        bump(&self.metrics.inserts);

        Ok(key)
    }

    /// Lenient keyed read; absent rows read as `None`.
    #[must_use]
    pub fn get<R: Record>(&self, key: RecordKey) -> Option<&R> {
        bump(&self.metrics.reads);

        self.table::<R>().and_then(|table| table.get(key))
    }

    /// Strict keyed read.
    pub fn fetch<R: Record>(&self, key: RecordKey) -> Result<&R, StoreError> {
        self.get(key).ok_or(StoreError::NotFound {
            record: R::RECORD_NAME,
            key,
        })
    }

    #[must_use]
    pub fn contains<R: Record>(&self, key: RecordKey) -> bool {
        self.table::<R>().is_some_and(|table| table.get(key).is_some())
    }

    /// Replace a persisted row in place.
    pub fn update<R: Record>(&mut self, row: &R) -> Result<(), StoreError> {
        let result = match self.existing_table_mut::<R>() {
            Some(table) => table.update(row),
            None => Err(StoreError::NotFound {
                record: R::RECORD_NAME,
                key: row.key(),
            }),
        };

        if result.is_ok() {
            bump(&self.metrics.updates);
        }

        result
    }

    /// Delete and return a persisted row.
    pub fn remove<R: Record>(&mut self, key: RecordKey) -> Result<R, StoreError> {
        let result = match self.existing_table_mut::<R>() {
            Some(table) => table.remove(key),
            None => Err(StoreError::NotFound {
                record: R::RECORD_NAME,
                key,
            }),
        };

        if result.is_ok() {
            bump(&self.metrics.removes);
        }

        result
    }

    /// Key-ordered scan over every row of `R`.
    pub fn scan<R: Record>(&self) -> impl Iterator<Item = &R> {
        self.table::<R>()
            .into_iter()
            .flat_map(Table::values)
            .inspect(|_| bump(&self.metrics.rows_scanned))
    }

    #[must_use]
    pub fn count<R: Record>(&self) -> usize {
        self.table::<R>().map_or(0, Table::len)
    }

    #[must_use]
    pub fn is_empty<R: Record>(&self) -> bool {
        self.count::<R>() == 0
    }

    // ------------------------------------------------------------------
    // Delegation primitives
    // ------------------------------------------------------------------

    /// The generic narrowing accessor behind every generated per-type
    /// accessor: the delegate row as `D` iff the reference's discriminator
    /// matches. Mismatches and missing rows read as `None`, never as
    /// errors.
    #[must_use]
    pub fn load_delegate<D: Delegate>(&self, reference: &DelegateRef) -> Option<D> {
        bump(&self.metrics.delegate_loads);

        if !reference.points_to::<D>() {
            bump(&self.metrics.delegate_misses);
            return None;
        }

        match self.get::<D>(reference.key()) {
            Some(row) => {
                bump(&self.metrics.delegate_hits);
                Some(row.clone())
            }
            None => {
                bump(&self.metrics.delegate_misses);
                None
            }
        }
    }

    /// Persist a delegate row (insert if unsaved, refresh otherwise) and
    /// return the reference to store on the base record.
    pub fn persist_delegate<D: Delegate>(&mut self, row: D) -> Result<DelegateRef, StoreError> {
        let key = if !row.key().is_unsaved() && self.contains::<D>(row.key()) {
            let key = row.key();
            self.update(&row)?;
            key
        } else {
            self.insert(row)?
        };

        Ok(DelegateRef::new(D::TYPE_NAME, key))
    }

    /// Reverse one-to-one lookup: the first base record whose role
    /// reference points at (`type_name`, `key`).
    #[must_use]
    pub fn reverse_one<E: Record>(
        &self,
        role: RoleRef<E>,
        type_name: &str,
        key: RecordKey,
    ) -> Option<E> {
        bump(&self.metrics.reverse_scans);

        self.scan::<E>()
            .find(|&row| {
                role(row).is_some_and(|r| r.type_name() == type_name && r.key() == key)
            })
            .cloned()
    }

    /// Save changes to a persisted delegate row; when the marker declares
    /// `touch`, the owning record's timestamp is bumped as well.
    pub fn save_delegate<D: Delegate>(
        &mut self,
        row: &D,
        owner_role: RoleRef<D::Owner>,
    ) -> Result<(), StoreError> {
        self.update(row)?;

        if D::TOUCH
            && let Some(mut owner) = self.reverse_one::<D::Owner>(owner_role, D::TYPE_NAME, row.key())
        {
            let now = self.now();
            owner.touch(now);
            self.update(&owner)?;
        }

        Ok(())
    }
}
