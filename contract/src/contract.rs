//! Record contract: the four ledger operations.
//!
//! `RecordContract` holds only configuration. Every operation receives the
//! invocation's `TransactionContext` and reaches the world state solely
//! through it, so the same contract value can serve any number of
//! invocations against any backend.
//!
//! No operation retries, caches, or rolls back. Failures are returned to
//! the host as soon as they happen.

use ledgerstore_hostapi::TransactionContext;
use ledgerstore_primitives::{
    decode_record, decode_record_lenient, encode_record, record_key, QueryResult, Record,
};

use crate::config::{ContractConfig, DecodePolicy};
use crate::cursor::CursorGuard;
use crate::error::ContractError;

/// Records written by `init_ledger`, in key order.
pub const SEED_RECORDS: [(&str, &str, &str); 4] = [
    ("62c27c668772d1ba23884fa1", "62a60b1f717c6989b0165e55", "2"),
    ("62c27c668772d1ba23884fa1", "62a60b42717c6989b0165e58", "2"),
    ("62c2a2cf9b6915dea0039b5b", "62a61170717c6989b0165e73", "3"),
    ("62c2a3ae9b6915dea0039b5d", "62a611e4717c6989b0165e7a", "3"),
];

/// The seed records as `Record` values.
pub fn seed_records() -> Vec<Record> {
    SEED_RECORDS
        .iter()
        .map(|(bill, product, quantity)| Record::new(*bill, *product, *quantity))
        .collect()
}

/// The record-store contract.
#[derive(Debug, Clone, Default)]
pub struct RecordContract {
    config: ContractConfig,
}

impl RecordContract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Write the seed records under `<prefix>0` .. `<prefix>3`.
    ///
    /// Stops at the first failed write. Records already written stay
    /// written; a partial seed is a possible outcome.
    pub fn init_ledger(&self, ctx: &mut dyn TransactionContext) -> Result<(), ContractError> {
        let _span = tracing::debug_span!("init_ledger", tx_id = %ctx.tx_id()).entered();

        for (index, record) in seed_records().iter().enumerate() {
            let key = record_key(&self.config.key_prefix, index);
            self.put_record(ctx, &key, record)?;
        }
        tracing::info!(count = SEED_RECORDS.len(), "seeded ledger");
        Ok(())
    }

    /// Write a record under `key`, replacing whatever is there.
    ///
    /// `quantity` is stored as given; it is not checked to be a number.
    pub fn create_transaction(
        &self,
        ctx: &mut dyn TransactionContext,
        key: &str,
        id_bill: &str,
        id_product: &str,
        quantity: &str,
    ) -> Result<(), ContractError> {
        let _span = tracing::debug_span!("create_transaction", tx_id = %ctx.tx_id(), key).entered();

        let record = Record::new(id_bill, id_product, quantity);
        self.put_record(ctx, key, &record)
    }

    /// Read the record stored under `key`.
    pub fn query_transaction(
        &self,
        ctx: &dyn TransactionContext,
        key: &str,
    ) -> Result<Record, ContractError> {
        let _span = tracing::debug_span!("query_transaction", tx_id = %ctx.tx_id(), key).entered();

        let bytes = ctx
            .get_state(key)
            .map_err(|source| ContractError::StorageRead {
                key: key.to_string(),
                source,
            })?
            .ok_or_else(|| ContractError::NotFound(key.to_string()))?;
        self.decode(key, &bytes)
    }

    /// Read every record in the configured scan range, in key order.
    ///
    /// If opening the scan, advancing it, or decoding an entry fails, only
    /// the error is returned. The cursor is closed on every path.
    pub fn query_all_transactions(
        &self,
        ctx: &dyn TransactionContext,
    ) -> Result<Vec<QueryResult>, ContractError> {
        let (start, end) = self.config.scan_bounds();
        let _span =
            tracing::debug_span!("query_all_transactions", tx_id = %ctx.tx_id(), %start, %end)
                .entered();

        let scan_error = |source| ContractError::RangeScan {
            start: start.clone(),
            end: end.clone(),
            source,
        };

        let mut cursor = CursorGuard::new(ctx.get_state_by_range(&start, &end).map_err(scan_error)?);
        let mut results = Vec::new();
        while cursor.has_next() {
            let entry = cursor.next_entry().map_err(scan_error)?;
            let record = self.decode(&entry.key, &entry.value)?;
            results.push(QueryResult::new(entry.key, record));
        }
        if let Err(err) = cursor.close() {
            // The results are complete; a failed release does not invalidate them.
            tracing::warn!(error = %err, "failed to close range cursor");
        }

        tracing::debug!(count = results.len(), "range query complete");
        Ok(results)
    }

    fn put_record(
        &self,
        ctx: &mut dyn TransactionContext,
        key: &str,
        record: &Record,
    ) -> Result<(), ContractError> {
        let bytes = encode_record(record)?;
        ctx.put_state(key, &bytes)
            .map_err(|source| ContractError::StorageWrite {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, len = bytes.len(), "wrote record");
        Ok(())
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Result<Record, ContractError> {
        match decode_record(bytes) {
            Ok(record) => Ok(record),
            Err(source) => match self.config.decode_policy {
                DecodePolicy::Strict => Err(ContractError::Decode {
                    key: key.to_string(),
                    source,
                }),
                DecodePolicy::Lenient => {
                    tracing::warn!(key, error = %source, "malformed record, using lenient decode");
                    Ok(decode_record_lenient(bytes))
                }
            },
        }
    }
}
