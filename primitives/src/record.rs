//! Record types stored in and returned from the world state.
//!
//! A `Record` is the value written under a transaction key. `QueryResult`
//! pairs a key with its decoded record and only exists as range-query
//! output. Both serialize to JSON with the field names that existing ledger
//! data was written with, so they must not be renamed.

use serde::{Deserialize, Serialize};

/// A single bill line: which product, on which bill, in what quantity.
///
/// `quantity` is kept as text and never validated as a number. Records are
/// replaced whole on overwrite; there is no partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Bill identifier.
    #[serde(default)]
    pub id_bill: String,
    /// Product identifier.
    #[serde(default)]
    pub id_product: String,
    /// Quantity, string-encoded.
    #[serde(default)]
    pub quantity: String,
}

impl Record {
    /// Create a record from its three fields.
    pub fn new(
        id_bill: impl Into<String>,
        id_product: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            id_bill: id_bill.into(),
            id_product: id_product.into(),
            quantity: quantity.into(),
        }
    }

    /// Returns true if every field is empty.
    ///
    /// This is what a lenient decode of malformed bytes produces.
    pub fn is_empty(&self) -> bool {
        self.id_bill.is_empty() && self.id_product.is_empty() && self.quantity.is_empty()
    }
}

/// A storage key paired with the record decoded from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// World-state key the record was read from.
    #[serde(rename = "Key")]
    pub key: String,
    /// Decoded record.
    #[serde(rename = "Record")]
    pub record: Record,
}

impl QueryResult {
    pub fn new(key: impl Into<String>, record: Record) -> Self {
        Self {
            key: key.into(),
            record,
        }
    }
}
