//! Contract error types.

use ledgerstore_hostapi::HostError;
use ledgerstore_primitives::{CodecError, ErrorCode};

/// Top-level error type for contract operations.
///
/// Backend failures are carried unchanged as the `source`, with the key or
/// range that was being accessed.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The world state failed to read a key.
    #[error("failed to read {key} from world state: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: HostError,
    },

    /// The world state failed to write a key.
    #[error("failed to put {key} to world state: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: HostError,
    },

    /// No value is stored under the key.
    #[error("{0} does not exist")]
    NotFound(String),

    /// Opening or advancing a range scan failed.
    #[error("range scan [{start}, {end}) failed: {source}")]
    RangeScan {
        start: String,
        end: String,
        #[source]
        source: HostError,
    },

    /// A stored value could not be decoded (strict decode policy only).
    #[error("record at {key} is malformed: {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },

    /// An outgoing value could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] CodecError),

    /// The invocation named a function the contract does not export.
    #[error("unknown function {0}")]
    UnknownFunction(String),

    /// The invocation passed the wrong number of arguments.
    #[error("{function} expects {expected} arguments, got {got}")]
    BadArguments {
        function: &'static str,
        expected: usize,
        got: usize,
    },
}

impl ContractError {
    /// Status code reported to the host runtime.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::StorageRead { .. } | Self::RangeScan { .. } => ErrorCode::StorageRead,
            Self::StorageWrite { source, .. } => match source {
                // Limit violations keep their specific code.
                HostError::Code(code) => *code,
                HostError::Internal(_) => ErrorCode::StorageWrite,
            },
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Decode { .. } | Self::Serialization(_) => ErrorCode::InvalidEncoding,
            Self::UnknownFunction(_) => ErrorCode::UnknownFunction,
            Self::BadArguments { .. } => ErrorCode::BadArguments,
        }
    }

    /// Returns true for an absent key, which is an expected outcome rather
    /// than a backend fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ContractError::NotFound("TRANSACTION9".into());
        assert_eq!(err.to_string(), "TRANSACTION9 does not exist");
        assert!(err.is_not_found());
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_storage_errors_keep_context() {
        let err = ContractError::StorageWrite {
            key: "TRANSACTION1".into(),
            source: HostError::internal("disk full"),
        };
        let s = err.to_string();
        assert!(s.contains("TRANSACTION1"));
        assert!(s.contains("disk full"));
        assert_eq!(err.code(), ErrorCode::StorageWrite);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_write_limit_code_preserved() {
        let err = ContractError::StorageWrite {
            key: "k".into(),
            source: HostError::key_too_large(),
        };
        assert_eq!(err.code(), ErrorCode::KeyTooLarge);
    }

    #[test]
    fn test_read_codes() {
        let read = ContractError::StorageRead {
            key: "k".into(),
            source: HostError::internal("io"),
        };
        assert_eq!(read.code(), ErrorCode::StorageRead);

        let scan = ContractError::RangeScan {
            start: "a".into(),
            end: "b".into(),
            source: HostError::internal("io"),
        };
        assert_eq!(scan.code(), ErrorCode::StorageRead);
        assert!(scan.to_string().contains("[a, b)"));
    }

    #[test]
    fn test_argument_codes() {
        let err = ContractError::BadArguments {
            function: "QueryTransaction",
            expected: 1,
            got: 0,
        };
        assert_eq!(err.code(), ErrorCode::BadArguments);
        assert_eq!(
            err.to_string(),
            "QueryTransaction expects 1 arguments, got 0"
        );
        assert_eq!(
            ContractError::UnknownFunction("Nope".into()).code(),
            ErrorCode::UnknownFunction
        );
    }
}
