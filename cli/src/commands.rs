//! Command execution against a snapshot-backed world state.
//!
//! Each command runs as one invocation: a fresh `HostContext` over the
//! loaded `MemStore`. The snapshot is written back only when the command
//! succeeded and wrote something, so a failed command leaves the file as
//! it was.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ledgerstore_contract::{Chaincode, ContractConfig, Invocation, RecordContract, Response, ScanMode};
use ledgerstore_hostapi::{HostContext, MemStore, TransactionContext};
use ledgerstore_primitives::{
    encode_query_results, encode_record, hash_to_hex, key_index, record_key, Hash, Record,
};

use crate::cli::{Cli, Command};
use crate::snapshot;

/// Outcome of one command.
#[derive(Debug)]
pub struct Report {
    /// Text for stdout.
    pub output: Option<String>,
    /// Number of distinct keys written.
    pub writes: usize,
    /// Write-set digest, present when anything was written.
    pub write_set_digest: Option<Hash>,
    /// False when `invoke` got an error response.
    pub success: bool,
}

/// Load the snapshot, run the command, print its output, and save.
///
/// Returns false when an invocation produced an error response.
pub fn run(cli: &Cli) -> Result<bool> {
    let mut store = snapshot::load(&cli.state)?;
    let report = execute(&cli.command, &mut store, cli.contract_config(), &cli.tx_id)?;

    if let Some(output) = &report.output {
        println!("{output}");
    }
    if !report.success {
        tracing::warn!(tx_id = %cli.tx_id, "invocation failed, snapshot left unchanged");
        return Ok(false);
    }
    if let Some(digest) = report.write_set_digest {
        snapshot::save(&cli.state, &store)?;
        tracing::info!(
            tx_id = %cli.tx_id,
            writes = report.writes,
            digest = %hash_to_hex(&digest),
            "committed write set"
        );
    }
    Ok(true)
}

/// Run `command` as a single invocation over `store`.
pub fn execute(
    command: &Command,
    store: &mut MemStore,
    config: ContractConfig,
    tx_id: &str,
) -> Result<Report> {
    let contract = RecordContract::new(config);
    let mut ctx = HostContext::with_defaults(tx_id, store);
    let mut success = true;

    let output = match command {
        Command::Init => {
            contract.init_ledger(&mut ctx)?;
            None
        }
        Command::Create {
            key,
            id_bill,
            id_product,
            quantity,
        } => {
            contract.create_transaction(&mut ctx, key, id_bill, id_product, quantity)?;
            None
        }
        Command::Query { key } => {
            let record = contract.query_transaction(&ctx, key)?;
            Some(utf8(encode_record(&record)?)?)
        }
        Command::QueryAll => {
            let results = contract.query_all_transactions(&ctx)?;
            Some(utf8(encode_query_results(&results)?)?)
        }
        Command::Add { file } => {
            let records = read_batch(file)?;
            let keys = add_batch(&contract, &mut ctx, &records)?;
            Some(serde_json::to_string(&keys)?)
        }
        Command::Invoke { function, args } => {
            let invocation = Invocation::new(function, args.iter().cloned());
            let response = Chaincode::new(contract).invoke(&mut ctx, &invocation);
            success = response.status.is_ok();
            Some(render_response(&response))
        }
    };

    let writes = ctx.write_set().len();
    Ok(Report {
        output,
        writes,
        write_set_digest: (writes > 0).then(|| ctx.write_set_digest()),
        success,
    })
}

/// Create `records` under consecutive keys after the highest existing index.
///
/// The next index comes from a prefix scan whatever the configured scan
/// mode, so keys past the legacy range are never reused. Returns the keys
/// written, in order.
pub fn add_batch(
    contract: &RecordContract,
    ctx: &mut dyn TransactionContext,
    records: &[Record],
) -> Result<Vec<String>> {
    let prefix = contract.config().key_prefix.clone();
    let scanner = RecordContract::new(ContractConfig {
        scan_mode: ScanMode::Prefix,
        ..contract.config().clone()
    });

    let next = scanner
        .query_all_transactions(&*ctx)?
        .iter()
        .filter_map(|result| key_index(&prefix, &result.key))
        .max()
        .map(|max| max.checked_add(1).context("record index overflow"))
        .transpose()?
        .unwrap_or(0);
    let next = usize::try_from(next).context("record index overflow")?;

    let mut keys = Vec::with_capacity(records.len());
    for (offset, record) in records.iter().enumerate() {
        let key = record_key(&prefix, next + offset);
        contract.create_transaction(
            ctx,
            &key,
            &record.id_bill,
            &record.id_product,
            &record.quantity,
        )?;
        keys.push(key);
    }
    tracing::info!(count = keys.len(), first = next, "added batch");
    Ok(keys)
}

/// Read a JSON array of records. Missing fields decode as empty strings.
pub fn read_batch(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("batch file {} is not a JSON array of records", path.display()))
}

fn render_response(response: &Response) -> String {
    serde_json::json!({
        "status": response.status.to_string(),
        "result_code": response.result_code,
        "message": response.message,
        "payload": String::from_utf8_lossy(&response.payload),
    })
    .to_string()
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).context("encoded output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ledgerstore_primitives::QueryResult;
    use tempfile::TempDir;

    fn exec(store: &mut MemStore, command: Command) -> Report {
        execute(&command, store, ContractConfig::default(), "test").unwrap()
    }

    fn seeded() -> MemStore {
        let mut store = MemStore::new();
        exec(&mut store, Command::Init);
        store
    }

    #[test]
    fn test_init_reports_writes() {
        let mut store = MemStore::new();
        let report = exec(&mut store, Command::Init);
        assert!(report.success);
        assert_eq!(report.writes, 4);
        assert!(report.write_set_digest.is_some());
        assert!(report.output.is_none());
    }

    #[test]
    fn test_query_prints_record_json() {
        let mut store = MemStore::new();
        exec(
            &mut store,
            Command::Create {
                key: "TRANSACTION5".into(),
                id_bill: "b1".into(),
                id_product: "p1".into(),
                quantity: "10".into(),
            },
        );
        let report = exec(&mut store, Command::Query { key: "TRANSACTION5".into() });
        assert_eq!(
            report.output.as_deref(),
            Some(r#"{"id_bill":"b1","id_product":"p1","quantity":"10"}"#)
        );
        assert_eq!(report.writes, 0);
        assert!(report.write_set_digest.is_none());
    }

    #[test]
    fn test_query_missing_is_error() {
        let mut store = MemStore::new();
        let err = execute(
            &Command::Query { key: "TRANSACTION0".into() },
            &mut store,
            ContractConfig::default(),
            "test",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "TRANSACTION0 does not exist");
    }

    #[test]
    fn test_add_batch_continues_after_highest_index() {
        let mut store = seeded();
        let mut ctx = HostContext::with_defaults("test", &mut store);
        ctx.put_state("TRANSACTION7", br#"{"id_bill":"x"}"#).unwrap();

        let records = vec![Record::new("b1", "p1", "1"), Record::new("b2", "p2", "2")];
        let keys = add_batch(&RecordContract::default(), &mut ctx, &records).unwrap();
        assert_eq!(keys, vec!["TRANSACTION8", "TRANSACTION9"]);
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_add_batch_on_empty_store_starts_at_zero() {
        let mut store = MemStore::new();
        let mut ctx = HostContext::with_defaults("test", &mut store);
        let keys = add_batch(&RecordContract::default(), &mut ctx, &[Record::default()]).unwrap();
        assert_eq!(keys, vec!["TRANSACTION0"]);
    }

    #[test]
    fn test_add_batch_ignores_legacy_scan_limit() {
        let mut store = MemStore::new();
        store.insert("TRANSACTION999", b"{}".to_vec());
        let contract = RecordContract::new(ContractConfig::legacy());
        let mut ctx = HostContext::with_defaults("test", &mut store);
        let keys = add_batch(&contract, &mut ctx, &[Record::default()]).unwrap();
        assert_eq!(keys, vec!["TRANSACTION1000"]);
    }

    #[test]
    fn test_add_from_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("batch.json");
        fs::write(
            &file,
            r#"[{"id_bill":"b1","id_product":"p1","quantity":"3"},{"id_bill":"b2"}]"#,
        )
        .unwrap();

        let mut store = seeded();
        let report = exec(&mut store, Command::Add { file });
        assert_eq!(report.output.as_deref(), Some(r#"["TRANSACTION4","TRANSACTION5"]"#));
        assert_eq!(report.writes, 2);
    }

    #[test]
    fn test_read_batch_rejects_object() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("batch.json");
        fs::write(&file, r#"{"id_bill":"b1"}"#).unwrap();
        assert!(read_batch(&file).is_err());
    }

    #[test]
    fn test_invoke_error_response() {
        let mut store = MemStore::new();
        let report = exec(
            &mut store,
            Command::Invoke {
                function: "QueryTransaction".into(),
                args: vec!["TRANSACTION0".into()],
            },
        );
        assert!(!report.success);
        let rendered: serde_json::Value =
            serde_json::from_str(report.output.as_deref().unwrap()).unwrap();
        assert_eq!(rendered["status"], "ERROR");
        assert_eq!(rendered["result_code"], 1);
        assert_eq!(rendered["message"], "TRANSACTION0 does not exist");
    }

    #[test]
    fn test_run_persists_snapshot() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");
        let state_arg = state.to_str().unwrap();

        let init = Cli::try_parse_from(["ledgerstore", "--state", state_arg, "init"]).unwrap();
        assert!(run(&init).unwrap());
        assert!(state.exists());

        let mut store = snapshot::load(&state).unwrap();
        let report = exec(&mut store, Command::QueryAll);
        let results: Vec<QueryResult> =
            serde_json::from_str(report.output.as_deref().unwrap()).unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_run_read_only_does_not_create_snapshot() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");
        let cli = Cli::try_parse_from([
            "ledgerstore",
            "--state",
            state.to_str().unwrap(),
            "query-all",
        ])
        .unwrap();
        assert!(run(&cli).unwrap());
        assert!(!state.exists());
    }

    #[test]
    fn test_run_failed_invoke_keeps_snapshot() {
        let dir = TempDir::new().unwrap();
        let state = dir.path().join("state.json");
        let cli = Cli::try_parse_from([
            "ledgerstore",
            "--state",
            state.to_str().unwrap(),
            "invoke",
            "CreateTransaction",
            "k",
        ])
        .unwrap();
        assert!(!run(&cli).unwrap());
        assert!(!state.exists());
    }
}
