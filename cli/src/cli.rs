//! Command-line argument definitions.
//!
//! ```text
//! ledgerstore [--state FILE] [--scan prefix|legacy] [--strict] [--tx-id ID] <command>
//!
//!   init                                 seed the ledger
//!   create KEY BILL PRODUCT QUANTITY     create or replace a record
//!   query KEY                            read one record
//!   query-all                            read every record in the scan range
//!   add --file BATCH.json                create records under the next free keys
//!   invoke FUNCTION [ARGS...]            raw named invocation
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ledgerstore_contract::{ContractConfig, DecodePolicy, ScanMode};

/// Default world-state snapshot location.
pub const DEFAULT_STATE_FILE: &str = "./ledgerstore-state.json";

/// ledgerstore - purchase record ledger over a key-value world state
#[derive(Parser, Debug)]
#[command(name = "ledgerstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// World-state snapshot file, created on first write
    #[arg(long, global = true, default_value = DEFAULT_STATE_FILE)]
    pub state: PathBuf,

    /// Range used by query-all
    #[arg(long, global = true, value_enum, default_value_t = ScanArg::Prefix)]
    pub scan: ScanArg,

    /// Fail on malformed stored records instead of returning empty fields
    #[arg(long, global = true)]
    pub strict: bool,

    /// Transaction id attached to log output
    #[arg(long, global = true, default_value = "cli")]
    pub tx_id: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    /// Every key starting with TRANSACTION
    Prefix,
    /// The fixed lexicographic range [TRANSACTION0, TRANSACTION999)
    Legacy,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Seed the ledger with the sample records
    Init,

    /// Create or replace the record stored under KEY
    Create {
        key: String,
        id_bill: String,
        id_product: String,
        quantity: String,
    },

    /// Print the record stored under KEY
    Query { key: String },

    /// Print every record in the scan range
    QueryAll,

    /// Create each record of a JSON array under the next free keys
    Add {
        /// JSON file holding an array of records
        #[arg(long)]
        file: PathBuf,
    },

    /// Invoke a contract function by name and print the response
    Invoke {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Cli {
    /// Contract configuration selected by the global flags.
    pub fn contract_config(&self) -> ContractConfig {
        ContractConfig {
            scan_mode: match self.scan {
                ScanArg::Prefix => ScanMode::Prefix,
                ScanArg::Legacy => ScanMode::LegacyRange,
            },
            decode_policy: if self.strict {
                DecodePolicy::Strict
            } else {
                DecodePolicy::Lenient
            },
            ..ContractConfig::default()
        }
    }
}
