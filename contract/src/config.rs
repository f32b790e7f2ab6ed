//! Contract configuration.

use ledgerstore_primitives::{prefix_successor, KEY_PREFIX, LEGACY_RANGE_END, LEGACY_RANGE_START};

/// How `query_all_transactions` bounds its range scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Every key starting with the configured prefix.
    #[default]
    Prefix,
    /// The fixed range `["TRANSACTION0", "TRANSACTION999")`.
    ///
    /// Compares lexicographically, so it skips `TRANSACTION999` and admits
    /// `TRANSACTION1000`. Kept for output compatibility with ledgers queried
    /// by older deployments. Ignores `key_prefix`.
    LegacyRange,
}

/// What to do with stored bytes that are not a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Decode to an empty record and log a warning.
    #[default]
    Lenient,
    /// Fail the operation with `ContractError::Decode`.
    Strict,
}

/// Configuration for the record contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Prefix for seeded keys and for prefix scans.
    pub key_prefix: String,
    /// Range scan bounds used by `query_all_transactions`.
    pub scan_mode: ScanMode,
    /// Handling of malformed stored records.
    pub decode_policy: DecodePolicy,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            key_prefix: KEY_PREFIX.to_string(),
            scan_mode: ScanMode::Prefix,
            decode_policy: DecodePolicy::Lenient,
        }
    }
}

impl ContractConfig {
    /// Configuration that reproduces the legacy scan bounds exactly.
    pub fn legacy() -> Self {
        Self {
            scan_mode: ScanMode::LegacyRange,
            ..Self::default()
        }
    }

    /// Start and exclusive end of the range scan. An empty end is unbounded.
    pub fn scan_bounds(&self) -> (String, String) {
        match self.scan_mode {
            ScanMode::Prefix => (
                self.key_prefix.clone(),
                prefix_successor(&self.key_prefix).unwrap_or_default(),
            ),
            ScanMode::LegacyRange => (LEGACY_RANGE_START.to_string(), LEGACY_RANGE_END.to_string()),
        }
    }
}
