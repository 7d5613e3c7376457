//! Auto-incrementing in-memory table

use std::collections::BTreeMap;

use parking_lot::RwLock;

/// Rows keyed by a store-assigned `i64`, starting at 1
#[derive(Debug)]
pub(crate) struct Table<T> {
    inner: RwLock<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn get(&self, id: i64) -> Option<T> {
        self.inner.read().rows.get(&id).cloned()
    }

    /// Matching rows in id order
    pub(crate) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub(crate) fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.inner.read().rows.values().any(predicate)
    }

    /// Allocate the next id and store the row built from it
    pub(crate) fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    /// Replace an existing row; returns `false` if the id is unknown
    pub(crate) fn replace(&self, id: i64, row: T) -> bool {
        let mut inner = self.inner.write();
        match inner.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            },
            None => false,
        }
    }

    pub(crate) fn remove(&self, id: i64) -> bool {
        self.inner.write().rows.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.read().rows.len()
    }
}
