//! Host-side error types for the ledgerstore world state.
//!
//! `HostError` is the error type returned by every `WorldState`,
//! `StateCursor` and `TransactionContext` method. It wraps `ErrorCode` from
//! `ledgerstore-primitives` for limit violations and provides an `Internal`
//! variant for backend faults (I/O, unavailable peer database, etc.) that
//! the contract reports verbatim.

use ledgerstore_primitives::ErrorCode;
use std::fmt;

/// Host-side error type returned by world-state methods.
///
/// The contract sees the `i32` code via [`to_error_code`](HostError::to_error_code).
/// The `Internal` variant is mapped to `ErrorCode::Internal` but carries a
/// descriptive message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A limit or protocol violation with a stable code.
    Code(ErrorCode),
    /// A backend fault not mapped to a specific code.
    Internal(String),
}

impl HostError {
    /// Convert to the `i32` error code reported to the host runtime.
    pub fn to_error_code(&self) -> i32 {
        match self {
            Self::Code(code) => code.as_i32(),
            Self::Internal(_) => ErrorCode::Internal as i32,
        }
    }

    /// Create a key-too-large error.
    pub fn key_too_large() -> Self {
        Self::Code(ErrorCode::KeyTooLarge)
    }

    /// Create a value-too-large error.
    pub fn value_too_large() -> Self {
        Self::Code(ErrorCode::ValueTooLarge)
    }

    /// Create an empty-key error.
    pub fn empty_key() -> Self {
        Self::Code(ErrorCode::EmptyKey)
    }

    /// Create a cursor-closed error.
    pub fn cursor_closed() -> Self {
        Self::Code(ErrorCode::CursorClosed)
    }

    /// Create a backend fault with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "host error: {}", code),
            Self::Internal(msg) => write!(f, "internal host error: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

impl From<ErrorCode> for HostError {
    fn from(code: ErrorCode) -> Self {
        Self::Code(code)
    }
}
