//! Transaction context trait: the capability handed to every contract call.
//!
//! The host runtime creates one context per invocation. It is the only way
//! the contract reaches the world state: there is no global store. Only the
//! methods the contract needs are exposed.

use crate::error::HostError;
use crate::state_store::StateCursor;

/// Per-invocation capability for world-state access.
///
/// Implementations validate keys and values before touching the backend.
/// Isolation and conflict detection across invocations belong to the host.
pub trait TransactionContext {
    /// Identifier of the invocation, for log correlation.
    fn tx_id(&self) -> &str;

    /// Read a value from world state.
    ///
    /// Returns `Ok(None)` if the key does not exist. A backend failure is
    /// an `Err`, never `None`. Write limits do not apply.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, HostError>;

    /// Write a value to world state, replacing any existing value.
    ///
    /// Enforces the empty-key, `max_key_len` and `max_value_len` limits.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), HostError>;

    /// Open a cursor over keys in `[start, end)`.
    ///
    /// The caller must close the cursor before returning.
    fn get_state_by_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn StateCursor + '_>, HostError>;
}
