//! Error codes and codec errors for the ledgerstore contract.
//!
//! `ErrorCode` is the numeric status reported to the host runtime in an
//! invocation response. Its repr values are stable and must not be reused.

use core::fmt;

/// Status codes reported to the host runtime.
///
/// `0` = OK, non-zero = error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    NotFound = 1,
    InvalidEncoding = 2,
    KeyTooLarge = 3,
    ValueTooLarge = 4,
    EmptyKey = 5,
    StorageRead = 6,
    StorageWrite = 7,
    CursorClosed = 8,
    UnknownFunction = 9,
    BadArguments = 10,
    Internal = 11,
}

impl ErrorCode {
    /// Convert from an i32 status code.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::NotFound),
            2 => Some(Self::InvalidEncoding),
            3 => Some(Self::KeyTooLarge),
            4 => Some(Self::ValueTooLarge),
            5 => Some(Self::EmptyKey),
            6 => Some(Self::StorageRead),
            7 => Some(Self::StorageWrite),
            8 => Some(Self::CursorClosed),
            9 => Some(Self::UnknownFunction),
            10 => Some(Self::BadArguments),
            11 => Some(Self::Internal),
            _ => None,
        }
    }

    /// Return the i32 representation of this error code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns true if this is the `Ok` variant.
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "ERR_NOT_FOUND"),
            Self::InvalidEncoding => write!(f, "ERR_INVALID_ENCODING"),
            Self::KeyTooLarge => write!(f, "ERR_KEY_TOO_LARGE"),
            Self::ValueTooLarge => write!(f, "ERR_VALUE_TOO_LARGE"),
            Self::EmptyKey => write!(f, "ERR_EMPTY_KEY"),
            Self::StorageRead => write!(f, "ERR_STORAGE_READ"),
            Self::StorageWrite => write!(f, "ERR_STORAGE_WRITE"),
            Self::CursorClosed => write!(f, "ERR_CURSOR_CLOSED"),
            Self::UnknownFunction => write!(f, "ERR_UNKNOWN_FUNCTION"),
            Self::BadArguments => write!(f, "ERR_BAD_ARGUMENTS"),
            Self::Internal => write!(f, "ERR_INTERNAL"),
        }
    }
}

/// Record encoding or decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The stored bytes are not a JSON document.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The stored JSON is valid but not an object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A known record field holds a non-string value.
    #[error("field `{field}` must be a string, found {found}")]
    FieldType {
        field: &'static str,
        found: &'static str,
    },

    /// Serialization of an outgoing value failed.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

impl CodecError {
    /// All codec failures surface to the host as `InvalidEncoding`.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidEncoding
    }
}
