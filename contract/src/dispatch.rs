//! Name-based invocation routing.
//!
//! The host runtime invokes the contract by function name with a list of
//! string arguments and expects a status code plus an opaque payload back.
//! `Chaincode::invoke` decodes the invocation, runs the matching
//! `RecordContract` operation, and encodes the outcome as a `Response`.
//!
//! ## Exported functions
//!
//! ```text
//! InitLedger            ()                                  -> empty
//! CreateTransaction     (key, id_bill, id_product, quantity) -> empty
//! QueryTransaction      (key)                               -> record JSON
//! QueryAllTransactions  ()                                  -> [{"Key", "Record"}] JSON
//! ```
//!
//! A failed invocation never panics; it produces an error `Response`
//! carrying the `ErrorCode` and the error message.

use ledgerstore_hostapi::TransactionContext;
use ledgerstore_primitives::{encode_query_results, encode_record, ErrorCode};

use crate::contract::RecordContract;
use crate::error::ContractError;
use crate::validation::expect_args;

pub const FN_INIT_LEDGER: &str = "InitLedger";
pub const FN_CREATE_TRANSACTION: &str = "CreateTransaction";
pub const FN_QUERY_TRANSACTION: &str = "QueryTransaction";
pub const FN_QUERY_ALL_TRANSACTIONS: &str = "QueryAllTransactions";

/// Every function the contract exports, in declaration order.
pub const EXPORTED_FUNCTIONS: [&str; 4] = [
    FN_INIT_LEDGER,
    FN_CREATE_TRANSACTION,
    FN_QUERY_TRANSACTION,
    FN_QUERY_ALL_TRANSACTIONS,
];

/// A single contract call as received from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome status of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Error = 1,
}

impl Status {
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of an invocation as returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Whether the invocation succeeded.
    pub status: Status,
    /// `ErrorCode` as i32; `0` on success.
    pub result_code: i32,
    /// Function output. Empty for writes and for errors.
    pub payload: Vec<u8>,
    /// Error message, empty on success.
    pub message: String,
}

impl Response {
    /// A successful response carrying `payload`.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            result_code: ErrorCode::Ok.as_i32(),
            payload,
            message: String::new(),
        }
    }

    /// An error response for `err`.
    pub fn error(err: &ContractError) -> Self {
        Self {
            status: Status::Error,
            result_code: err.code().as_i32(),
            payload: Vec::new(),
            message: err.to_string(),
        }
    }

    /// The result code as an `ErrorCode`, if it is a known code.
    pub fn error_code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i32(self.result_code)
    }
}

/// Host-facing entry point wrapping a `RecordContract`.
#[derive(Debug, Clone, Default)]
pub struct Chaincode {
    contract: RecordContract,
}

impl Chaincode {
    pub fn new(contract: RecordContract) -> Self {
        Self { contract }
    }

    pub fn contract(&self) -> &RecordContract {
        &self.contract
    }

    /// Route `invocation` to the named operation and encode the outcome.
    pub fn invoke(
        &self,
        ctx: &mut dyn TransactionContext,
        invocation: &Invocation,
    ) -> Response {
        match self.route(ctx, invocation) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                if err.is_not_found() {
                    tracing::debug!(function = %invocation.function, error = %err, "invocation failed");
                } else {
                    tracing::warn!(function = %invocation.function, error = %err, "invocation failed");
                }
                Response::error(&err)
            }
        }
    }

    fn route(
        &self,
        ctx: &mut dyn TransactionContext,
        invocation: &Invocation,
    ) -> Result<Vec<u8>, ContractError> {
        let args = invocation.args.as_slice();
        match invocation.function.as_str() {
            FN_INIT_LEDGER => {
                expect_args(FN_INIT_LEDGER, args, 0)?;
                self.contract.init_ledger(ctx)?;
                Ok(Vec::new())
            }
            FN_CREATE_TRANSACTION => {
                let a = expect_args(FN_CREATE_TRANSACTION, args, 4)?;
                self.contract
                    .create_transaction(ctx, &a[0], &a[1], &a[2], &a[3])?;
                Ok(Vec::new())
            }
            FN_QUERY_TRANSACTION => {
                let a = expect_args(FN_QUERY_TRANSACTION, args, 1)?;
                let record = self.contract.query_transaction(ctx, &a[0])?;
                Ok(encode_record(&record)?)
            }
            FN_QUERY_ALL_TRANSACTIONS => {
                expect_args(FN_QUERY_ALL_TRANSACTIONS, args, 0)?;
                let results = self.contract.query_all_transactions(ctx)?;
                Ok(encode_query_results(&results)?)
            }
            other => Err(ContractError::UnknownFunction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerstore_hostapi::{HostContext, MemStore};
    use ledgerstore_primitives::{decode_record, QueryResult, Record};

    fn invoke(store: &mut MemStore, function: &str, args: &[&str]) -> Response {
        let mut ctx = HostContext::with_defaults("tx", store);
        Chaincode::default().invoke(&mut ctx, &Invocation::new(function, args.iter().copied()))
    }

    #[test]
    fn test_init_ledger_response() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "InitLedger", &[]);
        assert!(resp.status.is_ok());
        assert_eq!(resp.result_code, 0);
        assert!(resp.payload.is_empty());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_create_and_query_payload() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "CreateTransaction", &["TRANSACTION5", "b1", "p1", "10"]);
        assert!(resp.status.is_ok());

        let resp = invoke(&mut store, "QueryTransaction", &["TRANSACTION5"]);
        assert!(resp.status.is_ok());
        assert_eq!(decode_record(&resp.payload).unwrap(), Record::new("b1", "p1", "10"));
    }

    #[test]
    fn test_query_all_payload() {
        let mut store = MemStore::new();
        invoke(&mut store, "InitLedger", &[]);
        let resp = invoke(&mut store, "QueryAllTransactions", &[]);
        assert!(resp.status.is_ok());
        let results: Vec<QueryResult> = serde_json::from_slice(&resp.payload).unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[3].key, "TRANSACTION3");
    }

    #[test]
    fn test_query_all_empty_is_empty_array() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "QueryAllTransactions", &[]);
        assert_eq!(resp.payload, b"[]");
    }

    #[test]
    fn test_not_found_response() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "QueryTransaction", &["TRANSACTION9"]);
        assert_eq!(resp.status, Status::Error);
        assert_eq!(resp.error_code(), Some(ErrorCode::NotFound));
        assert_eq!(resp.message, "TRANSACTION9 does not exist");
        assert!(resp.payload.is_empty());
    }

    #[test]
    fn test_unknown_function() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "DeleteTransaction", &["TRANSACTION0"]);
        assert_eq!(resp.error_code(), Some(ErrorCode::UnknownFunction));
        assert!(resp.message.contains("DeleteTransaction"));
    }

    #[test]
    fn test_bad_arity_writes_nothing() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "CreateTransaction", &["TRANSACTION5", "b1", "p1"]);
        assert_eq!(resp.error_code(), Some(ErrorCode::BadArguments));
        assert!(store.is_empty());

        let resp = invoke(&mut store, "InitLedger", &["unexpected"]);
        assert_eq!(resp.error_code(), Some(ErrorCode::BadArguments));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_key_rejected_by_host() {
        let mut store = MemStore::new();
        let resp = invoke(&mut store, "CreateTransaction", &["", "b", "p", "1"]);
        assert_eq!(resp.error_code(), Some(ErrorCode::EmptyKey));
        assert!(store.is_empty());
    }

    #[test]
    fn test_exported_functions_all_route() {
        for function in EXPORTED_FUNCTIONS {
            let mut store = MemStore::new();
            let resp = invoke(&mut store, function, &[]);
            assert_ne!(resp.error_code(), Some(ErrorCode::UnknownFunction), "{function}");
        }
    }
}
