//! `ledgerstore-contract`: the record-store contract.
//!
//! Stores purchase records (bill id, product id, quantity) as JSON in a
//! key-value world state and exposes four operations: seed, create, point
//! query, and range query.
//!
//! ## Architecture
//!
//! - [`contract::RecordContract`] holds the operations; each takes a
//!   `TransactionContext` and touches state only through it
//! - [`dispatch::Chaincode`] routes a named `Invocation` to an operation and
//!   encodes the `Response`
//! - [`cursor::CursorGuard`] releases range-scan cursors on every path
//! - [`config::ContractConfig`] selects the key prefix, scan bounds, and
//!   decode policy

pub mod config;
pub mod contract;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod validation;

pub use config::{ContractConfig, DecodePolicy, ScanMode};
pub use contract::{seed_records, RecordContract, SEED_RECORDS};
pub use cursor::CursorGuard;
pub use dispatch::{Chaincode, Invocation, Response, Status, EXPORTED_FUNCTIONS};
pub use error::ContractError;
