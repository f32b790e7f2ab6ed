//! `ledgerstore-primitives`: shared types for the ledgerstore contract.
//!
//! This crate provides the record types, world-state key layout, JSON
//! record codec, and numeric error codes used by the host API, the
//! contract, and the command-line driver.

pub mod types;
pub mod error;
pub mod record;
pub mod codec;

// Re-export commonly used types at the crate root for convenience.
pub use types::{
    Hash, KEY_PREFIX, LEGACY_RANGE_END, LEGACY_RANGE_START, MAX_KEY_LEN, MAX_VALUE_LEN,
    hash_to_hex, key_index, prefix_successor, record_key, transaction_key,
};
pub use error::{CodecError, ErrorCode};
pub use record::{QueryResult, Record};
pub use codec::{decode_record, decode_record_lenient, encode_query_results, encode_record};
