//! Shared helpers for contract integration tests.

#![allow(dead_code)]

use ledgerstore_contract::{Chaincode, ContractConfig, Invocation, RecordContract, Response};
use ledgerstore_hostapi::{HostContext, MemStore, WorldState};
use ledgerstore_primitives::Record;

/// Fixed transaction id used by every helper.
pub const TX_ID: &str = "tx-test";

/// A store seeded by `InitLedger` with the default configuration.
pub fn seeded_store() -> MemStore {
    let mut store = MemStore::new();
    let mut ctx = HostContext::with_defaults(TX_ID, &mut store);
    RecordContract::default()
        .init_ledger(&mut ctx)
        .expect("seed ledger");
    store
}

/// A store holding `records` under `TRANSACTION<index>` keys.
pub fn store_with(records: &[(&str, Record)]) -> MemStore {
    let mut store = MemStore::new();
    let mut ctx = HostContext::with_defaults(TX_ID, &mut store);
    let contract = RecordContract::default();
    for (key, record) in records {
        contract
            .create_transaction(&mut ctx, key, &record.id_bill, &record.id_product, &record.quantity)
            .expect("create record");
    }
    store
}

/// Run one named invocation against `store` with the given configuration.
pub fn invoke_with<S: WorldState>(
    store: &mut S,
    config: ContractConfig,
    function: &str,
    args: &[&str],
) -> Response {
    let mut ctx = HostContext::with_defaults(TX_ID, store);
    Chaincode::new(RecordContract::new(config))
        .invoke(&mut ctx, &Invocation::new(function, args.iter().copied()))
}

/// Run one named invocation with the default configuration.
pub fn invoke<S: WorldState>(store: &mut S, function: &str, args: &[&str]) -> Response {
    invoke_with(store, ContractConfig::default(), function, args)
}

/// Keys returned by a range query, in order.
pub fn query_all_keys<S: WorldState>(store: &mut S, config: ContractConfig) -> Vec<String> {
    let ctx = HostContext::with_defaults(TX_ID, store);
    RecordContract::new(config)
        .query_all_transactions(&ctx)
        .expect("range query")
        .into_iter()
        .map(|r| r.key)
        .collect()
}
