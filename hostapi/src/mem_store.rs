//! In-memory world state.
//!
//! `MemStore` implements `WorldState` using a `BTreeMap`, which gives the
//! byte-wise lexicographic key order range scans require. It backs the
//! unit and integration tests and the command-line driver's snapshots.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Bound;

use crate::error::HostError;
use crate::state_store::{KeyValue, StateCursor, WorldState};

/// In-memory world state backed by `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    data: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Create a store pre-populated with data.
    pub fn with_data(data: BTreeMap<String, Vec<u8>>) -> Self {
        Self { data }
    }

    /// Insert a key-value pair, bypassing the `WorldState` interface.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.data.insert(key.into(), value.into());
    }

    /// Remove a key from the store.
    pub fn remove(&mut self, key: &str) {
        self.data.remove(key);
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.data.iter()
    }

    /// Consume the store and return its entries.
    pub fn into_inner(self) -> BTreeMap<String, Vec<u8>> {
        self.data
    }
}

impl WorldState for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), HostError> {
        self.data.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateCursor + 'a>, HostError> {
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start)
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        // BTreeMap::range panics on an inverted range; treat it as empty.
        let inverted = !start.is_empty() && !end.is_empty() && start > end;
        let entries = if inverted {
            None
        } else {
            Some(self.data.range::<str, _>((lower, upper)).peekable())
        };
        Ok(Box::new(MemCursor {
            entries,
            closed: false,
        }))
    }

    fn contains(&self, key: &str) -> Result<bool, HostError> {
        Ok(self.data.contains_key(key))
    }
}

/// Borrowing cursor over a `MemStore` range.
struct MemCursor<'a> {
    entries: Option<Peekable<btree_map::Range<'a, String, Vec<u8>>>>,
    closed: bool,
}

impl StateCursor for MemCursor<'_> {
    fn has_next(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.entries
            .as_mut()
            .is_some_and(|entries| entries.peek().is_some())
    }

    fn next_entry(&mut self) -> Result<KeyValue, HostError> {
        if self.closed {
            return Err(HostError::cursor_closed());
        }
        match self.entries.as_mut().and_then(Iterator::next) {
            Some((key, value)) => Ok(KeyValue::new(key.clone(), value.clone())),
            None => Err(HostError::internal("range scan exhausted")),
        }
    }

    fn close(&mut self) -> Result<(), HostError> {
        if self.closed {
            return Err(HostError::cursor_closed());
        }
        self.closed = true;
        self.entries = None;
        Ok(())
    }
}
