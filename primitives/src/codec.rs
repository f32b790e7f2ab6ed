//! JSON encoding for records stored in the world state.
//!
//! Stored values are JSON objects with the fields `id_bill`, `id_product`
//! and `quantity`, in that order. Existing ledger data was written with
//! HTML-safe escaping (`<`, `>`, `&`, U+2028 and U+2029 as `\uXXXX`), so
//! encoding reproduces it byte for byte.
//!
//! Decoding comes in two flavours:
//! - [`decode_record`] rejects anything that is not an object whose known
//!   fields are strings (or `null`).
//! - [`decode_record_lenient`] never fails. Malformed bytes yield an empty
//!   record and ill-typed fields are left empty. Callers that read from the
//!   ledger use this by default, which hides corrupt data from the caller.
//!
//! Both follow Go's `encoding/json`, which wrote the existing data:
//! - field names match case-insensitively and the last matching member in
//!   the document wins, duplicates included
//! - invalid UTF-8 is replaced with U+FFFD rather than failing the record
//! - unknown fields are ignored and `null` leaves a field empty

use std::fmt;
use std::io;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::error::CodecError;
use crate::record::{QueryResult, Record};

const FIELD_ID_BILL: &str = "id_bill";
const FIELD_ID_PRODUCT: &str = "id_product";
const FIELD_QUANTITY: &str = "quantity";

/// Compact JSON formatter that escapes HTML-sensitive characters.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CodecError::Serialize(e.to_string()))?;
    Ok(buf)
}

/// Encode a record for storage.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, CodecError> {
    to_json(record)
}

/// Encode range-query output as a JSON array of `{"Key", "Record"}` objects.
pub fn encode_query_results(results: &[QueryResult]) -> Result<Vec<u8>, CodecError> {
    to_json(results)
}

/// Decode a stored record, rejecting malformed input.
pub fn decode_record(bytes: &[u8]) -> Result<Record, CodecError> {
    let document = parse_document(bytes).map_err(|e| CodecError::MalformedJson(e.to_string()))?;
    let members = match document {
        Document::Object(members) => members,
        Document::Other(found) => return Err(CodecError::NotAnObject(found)),
    };

    let mut record = Record::default();
    for (field, slot) in [
        (FIELD_ID_BILL, &mut record.id_bill),
        (FIELD_ID_PRODUCT, &mut record.id_product),
        (FIELD_QUANTITY, &mut record.quantity),
    ] {
        match lookup_field(&members, field) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => *slot = s.clone(),
            Some(other) => {
                return Err(CodecError::FieldType {
                    field,
                    found: json_type(other),
                })
            }
        }
    }
    Ok(record)
}

/// Decode a stored record, never failing.
///
/// Input that is not a JSON object yields `Record::default()`. Fields that
/// hold a non-string value are left empty while the remaining fields are
/// still filled in.
pub fn decode_record_lenient(bytes: &[u8]) -> Record {
    let members = match parse_document(bytes) {
        Ok(Document::Object(members)) => members,
        _ => return Record::default(),
    };

    let field = |name: &str| match lookup_field(&members, name) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    Record {
        id_bill: field(FIELD_ID_BILL),
        id_product: field(FIELD_ID_PRODUCT),
        quantity: field(FIELD_QUANTITY),
    }
}

/// Parse stored bytes. Invalid UTF-8 sequences become U+FFFD first.
fn parse_document(bytes: &[u8]) -> Result<Document, serde_json::Error> {
    serde_json::from_str(&String::from_utf8_lossy(bytes))
}

/// Find the last member whose name matches `name` ignoring ASCII case.
///
/// Record field names contain no `k` or `s`, so ASCII folding agrees with
/// Go's `encoding/json` name matching for them.
fn lookup_field<'a>(members: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    members
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

/// A top-level JSON value with object members kept in document order,
/// duplicates included.
enum Document {
    Object(Vec<(String, Value)>),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut members = Vec::new();
        while let Some(member) = map.next_entry::<String, Value>()? {
            members.push(member);
        }
        Ok(Document::Object(members))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Document::Other("array"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Document, E> {
        Ok(Document::Other("bool"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Document, E> {
        Ok(Document::Other("number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Document, E> {
        Ok(Document::Other("number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Document, E> {
        Ok(Document::Other("number"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Document, E> {
        Ok(Document::Other("string"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Other("null"))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
