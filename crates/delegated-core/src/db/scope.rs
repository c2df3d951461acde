use crate::{db::Database, reference::DelegateRef, traits::Record, types::RecordKey};

///
/// RoleRef
///
/// Accessor contract for a base record's role reference. Generated scopes
/// and reverse lookups receive one of these instead of a trait bound, so a
/// record may carry several independent roles.
///

pub type RoleRef<E> = for<'a> fn(&'a E) -> Option<&'a DelegateRef>;

///
/// DelegateScope
///
/// Typed, declarative discriminator scope for one registered delegate
/// type.
///
/// This scope:
/// - Is purely declarative (no store access until executed)
/// - Filters by exact discriminator equality against the registered name
/// - Executes as a key-ordered scan, so `first` is the lowest-keyed match
///

pub struct DelegateScope<E: Record> {
    type_name: &'static str,
    role: RoleRef<E>,
}

impl<E: Record> DelegateScope<E> {
    #[must_use]
    pub const fn new(type_name: &'static str, role: RoleRef<E>) -> Self {
        Self { type_name, role }
    }

    /// The discriminator this scope filters on.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn matches(&self, row: &E) -> bool {
        (self.role)(row).is_some_and(|r| r.type_name() == self.type_name)
    }

    /// Every matching base record, in key order.
    #[must_use]
    pub fn all(&self, db: &Database) -> Vec<E> {
        db.scan::<E>()
            .filter(|&row| self.matches(row))
            .cloned()
            .collect()
    }

    /// The lowest-keyed matching base record.
    #[must_use]
    pub fn first(&self, db: &Database) -> Option<E> {
        db.scan::<E>().find(|&row| self.matches(row)).cloned()
    }

    #[must_use]
    pub fn count(&self, db: &Database) -> usize {
        db.scan::<E>().filter(|&row| self.matches(row)).count()
    }

    /// Primary keys of every matching base record, in key order.
    #[must_use]
    pub fn keys(&self, db: &Database) -> Vec<RecordKey> {
        db.scan::<E>()
            .filter(|&row| self.matches(row))
            .map(Record::key)
            .collect()
    }
}

impl<E: Record> Clone for DelegateScope<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Record> Copy for DelegateScope<E> {}
