//! Per-invocation transaction context held by the host.
//!
//! `HostContext` combines a mutable borrow of the world state, the size
//! limits, and the write set of one invocation into a single struct that
//! implements `TransactionContext`. It is created fresh for each call and
//! dropped when the call returns.
//!
//! Writes go straight through to the world state. There is no rollback: if
//! an invocation fails half way, the writes it already made stay, and it
//! is up to the host to decide what to do with them.

use std::collections::BTreeMap;

use ledgerstore_primitives::Hash;

use crate::error::HostError;
use crate::state_store::{StateCursor, WorldState};
use crate::traits::TransactionContext;
use crate::types::StoreLimits;

/// Host-side `TransactionContext` over a borrowed world state.
pub struct HostContext<'s, S: WorldState + ?Sized> {
    /// Identifier of this invocation.
    tx_id: String,
    /// Backing world state.
    store: &'s mut S,
    /// Key and value size limits.
    limits: StoreLimits,
    /// Final value written under each key during this invocation.
    write_set: BTreeMap<String, Vec<u8>>,
}

impl<'s, S: WorldState + ?Sized> HostContext<'s, S> {
    /// Create a context for one invocation.
    pub fn new(tx_id: impl Into<String>, store: &'s mut S, limits: StoreLimits) -> Self {
        Self {
            tx_id: tx_id.into(),
            store,
            limits,
            write_set: BTreeMap::new(),
        }
    }

    /// Create a context with default limits.
    pub fn with_defaults(tx_id: impl Into<String>, store: &'s mut S) -> Self {
        Self::new(tx_id, store, StoreLimits::default())
    }

    /// Keys written during this invocation and their final values.
    pub fn write_set(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.write_set
    }

    /// BLAKE3 digest of the write set.
    ///
    /// Each entry contributes `len(key) || key || len(value) || value` with
    /// u64 LE lengths, in ascending key order. Two invocations that leave
    /// the same final values under the same keys produce the same digest,
    /// regardless of write order or intermediate overwrites.
    pub fn write_set_digest(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        for (key, value) in &self.write_set {
            hasher.update(&(key.len() as u64).to_le_bytes());
            hasher.update(key.as_bytes());
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value);
        }
        *hasher.finalize().as_bytes()
    }

    /// Key checks applied to writes. Reads take any key; one that could
    /// never have been written is simply absent.
    fn check_write_key(&self, key: &str) -> Result<(), HostError> {
        if key.is_empty() {
            return Err(HostError::empty_key());
        }
        if key.len() > self.limits.max_key_len {
            return Err(HostError::key_too_large());
        }
        Ok(())
    }
}

impl<S: WorldState + ?Sized> TransactionContext for HostContext<'_, S> {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, HostError> {
        let value = self.store.get(key)?;
        tracing::trace!(tx_id = %self.tx_id, key, found = value.is_some(), "get_state");
        Ok(value)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), HostError> {
        self.check_write_key(key)?;
        if value.len() > self.limits.max_value_len {
            return Err(HostError::value_too_large());
        }
        self.store.put(key, value)?;
        self.write_set.insert(key.to_owned(), value.to_vec());
        tracing::trace!(tx_id = %self.tx_id, key, len = value.len(), "put_state");
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateCursor + '_>, HostError> {
        tracing::trace!(tx_id = %self.tx_id, start, end, "get_state_by_range");
        self.store.range_scan(start, end)
    }
}
