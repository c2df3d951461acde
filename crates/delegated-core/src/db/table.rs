use crate::{db::StoreError, traits::Record, types::RecordKey};
use std::collections::BTreeMap;

///
/// Table
///
/// One key-ordered table of typed rows. Key allocation is monotonic from 1;
/// explicitly keyed inserts are honored and the allocator skips past them.
///

#[derive(Debug)]
pub(super) struct Table<R: Record> {
    rows: BTreeMap<RecordKey, R>,
    next_key: RecordKey,
}

impl<R: Record> Table<R> {
    pub(super) fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_key: RecordKey::new(1),
        }
    }

    pub(super) fn insert(&mut self, mut row: R) -> Result<RecordKey, StoreError> {
        let key = if row.key().is_unsaved() {
            self.next_key
        } else {
            row.key()
        };

        if self.rows.contains_key(&key) {
            return Err(StoreError::KeyConflict {
                record: R::RECORD_NAME,
                key,
            });
        }

        if key >= self.next_key {
            self.next_key = key.next();
        }
        row.set_key(key);
        self.rows.insert(key, row);

        Ok(key)
    }

    pub(super) fn get(&self, key: RecordKey) -> Option<&R> {
        self.rows.get(&key)
    }

    pub(super) fn update(&mut self, row: &R) -> Result<(), StoreError> {
        match self.rows.get_mut(&row.key()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                record: R::RECORD_NAME,
                key: row.key(),
            }),
        }
    }

    pub(super) fn remove(&mut self, key: RecordKey) -> Result<R, StoreError> {
        self.rows.remove(&key).ok_or(StoreError::NotFound {
            record: R::RECORD_NAME,
            key,
        })
    }

    /// Key-ordered iteration.
    pub(super) fn values(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    pub(super) fn len(&self) -> usize {
        self.rows.len()
    }
}
