//! World-state backend abstraction.
//!
//! `WorldState` is the durable key-value store the contract runs against:
//! point reads, point writes, and lexicographic range scans. Range scans
//! hand back a `StateCursor` that the caller advances lazily and must
//! close before returning.
//!
//! Implementations:
//! - `MemStore` (this crate): in-memory BTreeMap for tests and the CLI
//! - `FaultyStore` (this crate): failure-injecting wrapper for tests
//! - the peer's ledger database, supplied by the host runtime

use crate::error::HostError;

/// A key-value pair yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Lazily advanced iterator over a key range.
///
/// A cursor holds backend iteration state and must be closed exactly once.
/// After `close`, `has_next` returns false and `next_entry` fails with
/// `ERR_CURSOR_CLOSED`.
pub trait StateCursor {
    /// Returns true if another entry is available.
    fn has_next(&mut self) -> bool;

    /// Advance and return the next entry in ascending key order.
    fn next_entry(&mut self) -> Result<KeyValue, HostError>;

    /// Release backend iteration state.
    fn close(&mut self) -> Result<(), HostError>;
}

/// Abstraction over the durable world state.
///
/// Keys compare as raw UTF-8 bytes. An empty `start` or `end` in
/// `range_scan` leaves that side of the range unbounded.
pub trait WorldState: Send + Sync {
    /// Get the value for a key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HostError>;

    /// Write a value, replacing any existing value under the key.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), HostError>;

    /// Open a cursor over keys in `[start, end)`.
    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateCursor + 'a>, HostError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &str) -> Result<bool, HostError> {
        Ok(self.get(key)?.is_some())
    }
}
