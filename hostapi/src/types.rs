//! Host-side configuration types for the ledgerstore world state.
//!
//! `StoreLimits` bounds what a single invocation may write. Default values
//! match `MAX_KEY_LEN` / `MAX_VALUE_LEN` from `ledgerstore-primitives`.

use ledgerstore_primitives::{MAX_KEY_LEN, MAX_VALUE_LEN};

/// Size limits enforced by `HostContext` on every key and value.
///
/// The contract cannot exceed them; violations surface as host errors
/// before the backend is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLimits {
    /// Maximum length of a state key in bytes.
    pub max_key_len: usize,
    /// Maximum length of a state value in bytes.
    pub max_value_len: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
        }
    }
}

impl StoreLimits {
    /// Limits that accept any key or value size.
    pub fn unbounded() -> Self {
        Self {
            max_key_len: usize::MAX,
            max_value_len: usize::MAX,
        }
    }
}
