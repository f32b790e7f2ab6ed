//! Key layout and size constants for the ledgerstore world state.
//!
//! Records live under string keys of the form `<prefix><index>`, e.g.
//! `TRANSACTION0`. Keys are compared as raw bytes, so ordering is
//! lexicographic rather than numeric (`TRANSACTION10` < `TRANSACTION2`).

/// Key prefix shared by every transaction record.
pub const KEY_PREFIX: &str = "TRANSACTION";

/// Inclusive start of the legacy fixed-bound range scan.
pub const LEGACY_RANGE_START: &str = "TRANSACTION0";

/// Exclusive end of the legacy fixed-bound range scan.
///
/// Lexicographically `TRANSACTION1000` sorts before this bound but
/// `TRANSACTION999` itself is excluded, so the legacy scan neither covers
/// exactly the first thousand indices nor all keys under the prefix.
pub const LEGACY_RANGE_END: &str = "TRANSACTION999";

/// Maximum key length accepted by the host context, in bytes.
pub const MAX_KEY_LEN: usize = 256;

/// Maximum value length accepted by the host context, in bytes.
pub const MAX_VALUE_LEN: usize = 65_536; // 64 KiB

/// 32-byte digest, used for write-set hashes.
pub type Hash = [u8; 32];

/// Convert a `Hash` to a hex string for display purposes.
pub fn hash_to_hex(hash: &Hash) -> String {
    use core::fmt::Write;
    let mut s = String::with_capacity(66);
    s.push_str("0x");
    for byte in hash {
        let _ = write!(s, "{:02x}", byte);
    }
    s
}

/// Build the key for the record at `index` under `prefix`.
pub fn record_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Build the default-prefix key for the record at `index`.
pub fn transaction_key(index: usize) -> String {
    record_key(KEY_PREFIX, index)
}

/// Parse the numeric suffix of a key under `prefix`.
///
/// Returns `None` when the key does not start with `prefix` or the rest is
/// not a plain decimal number.
pub fn key_index(prefix: &str, key: &str) -> Option<u64> {
    let suffix = key.strip_prefix(prefix)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Compute an exclusive upper bound for every key starting with `prefix`.
///
/// The last character is replaced by its successor code point; characters
/// with no successor are dropped first. UTF-8 byte order matches code point
/// order, so the bound holds for the byte-wise key comparison the world
/// state uses. Returns `None` when no bound exists (empty prefix), meaning
/// the scan is unbounded above.
pub fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        let mut next = last as u32 + 1;
        // Skip the surrogate gap, which has no `char` representation.
        if (0xD800..=0xDFFF).contains(&next) {
            next = 0xE000;
        }
        if let Some(bumped) = char::from_u32(next) {
            chars.push(bumped);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_key() {
        assert_eq!(transaction_key(0), "TRANSACTION0");
        assert_eq!(transaction_key(42), "TRANSACTION42");
        assert_eq!(record_key("BILL", 7), "BILL7");
    }

    #[test]
    fn test_hash_to_hex() {
        let mut hash = [0u8; 32];
        hash[0] = 0xab;
        hash[31] = 0x01;
        let hex = hash_to_hex(&hash);
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0xab00"));
        assert!(hex.ends_with("01"));
    }

    #[test]
    fn test_key_index() {
        assert_eq!(key_index(KEY_PREFIX, "TRANSACTION0"), Some(0));
        assert_eq!(key_index(KEY_PREFIX, "TRANSACTION1000"), Some(1000));
        assert_eq!(key_index(KEY_PREFIX, "TRANSACTION"), None);
        assert_eq!(key_index(KEY_PREFIX, "TRANSACTIONx1"), None);
        assert_eq!(key_index(KEY_PREFIX, "TRANSACTION-1"), None);
        assert_eq!(key_index(KEY_PREFIX, "OTHER1"), None);
    }

    #[test]
    fn test_prefix_successor() {
        assert_eq!(prefix_successor("TRANSACTION").as_deref(), Some("TRANSACTIOO"));
        assert_eq!(prefix_successor("a").as_deref(), Some("b"));
        assert_eq!(prefix_successor("a\u{D7FF}").as_deref(), Some("a\u{E000}"));
        assert_eq!(prefix_successor("a\u{10FFFF}").as_deref(), Some("b"));
        assert_eq!(prefix_successor(""), None);
    }

    #[test]
    fn test_prefix_successor_bounds_prefix() {
        let end = prefix_successor(KEY_PREFIX).unwrap();
        for key in ["TRANSACTION", "TRANSACTION0", "TRANSACTION999", "TRANSACTION1000"] {
            assert!(key < end.as_str(), "{key} should sort before bound");
        }
        assert!("TRANSACTIOO" >= end.as_str());
    }

    #[test]
    fn test_legacy_bounds_are_lexicographic() {
        // The legacy end bound excludes index 999 but admits 1000.
        assert!("TRANSACTION999" >= LEGACY_RANGE_END);
        assert!("TRANSACTION1000" < LEGACY_RANGE_END);
        assert!("TRANSACTION0" >= LEGACY_RANGE_START);
    }
}
