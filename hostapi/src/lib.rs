//! `ledgerstore-hostapi`: world-state interface for the ledgerstore contract.
//!
//! This crate defines what the contract consumes from its host runtime and
//! provides host-side implementations for tests and local use:
//!
//! - `WorldState` / `StateCursor`: backend storage abstraction
//! - `TransactionContext`: per-invocation capability passed to the contract
//! - `HostContext`: `TransactionContext` with size limits and a write set
//! - `MemStore`: in-memory `WorldState`
//! - `FaultyStore`: failure-injecting `WorldState` wrapper for tests
//! - `StoreLimits`: key and value size limits
//! - `HostError`: host-side error type with `ErrorCode` conversion

pub mod error;
pub mod types;
pub mod state_store;
pub mod mem_store;
pub mod faulty_store;
pub mod traits;
pub mod context;

// Re-export commonly used types at the crate root.
pub use error::HostError;
pub use types::StoreLimits;
pub use state_store::{KeyValue, StateCursor, WorldState};
pub use mem_store::MemStore;
pub use faulty_store::FaultyStore;
pub use traits::TransactionContext;
pub use context::HostContext;
