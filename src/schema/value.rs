//! Filtered output values
//!
//! Validation produces a fresh [`Document`] rather than mutating its input.
//! Most entries are plain JSON, but the named coercions can produce values
//! with no JSON representation (identifier references, timestamps, compiled
//! patterns), so the output value is a closed sum over those kinds.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Error returned when a string is not a canonical identifier reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier reference: expected 24 hex digits, got {0:?}")]
pub struct ParseObjectIdError(pub String);

/// Opaque 12-byte identifier reference, rendered as 24 lowercase hex digits.
///
/// Used for datastore foreign-key fields. Parsing accepts either hex case;
/// the canonical rendering is lowercase, so parsing a canonical rendering
/// round-trips to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Constructs an identifier from raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parses the canonical 24-hex-digit form.
    pub fn parse_str(s: &str) -> Result<Self, ParseObjectIdError> {
        s.parse()
    }

    /// Returns the raw bytes.
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Returns the canonical lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(24);
        for byte in &self.0 {
            out.push(hex_digit(byte >> 4));
            out.push(hex_digit(byte & 0x0f));
        }
        out
    }
}

fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'a' + nibble - 10) as char,
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.as_bytes();
        if raw.len() != 24 {
            return Err(ParseObjectIdError(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, pair) in raw.chunks(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or_else(|| ParseObjectIdError(s.to_string()))?;
            let lo = hex_value(pair[1]).ok_or_else(|| ParseObjectIdError(s.to_string()))?;
            bytes[i] = (hi << 4) | lo;
        }

        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// A single filtered output value.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Plain JSON (passthroughs, defaults, numeric/string coercions)
    Json(Value),
    /// Identifier reference produced by the id-reference coercion
    Id(ObjectId),
    /// Timestamp produced by the date coercion
    Timestamp(DateTime<Utc>),
    /// Case-insensitive pattern produced by the regex coercion
    Pattern(Regex),
    /// Nested validated sub-object
    Object(Document),
}

impl FieldValue {
    /// Returns the inner JSON value, if this entry is plain JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the inner string, if this entry is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    /// Returns the inner number, if this entry is a JSON number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    /// Returns the nested document, if this entry is a validated sub-object.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            FieldValue::Object(doc) => Some(doc),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            (FieldValue::Id(a), FieldValue::Id(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
            // Patterns are built from escaped input with a fixed flag set,
            // so source equality is value equality
            (FieldValue::Pattern(a), FieldValue::Pattern(b)) => a.as_str() == b.as_str(),
            (FieldValue::Object(a), FieldValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl From<ObjectId> for FieldValue {
    fn from(id: ObjectId) -> Self {
        FieldValue::Id(id)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

/// Filtered output mapping, in insertion order.
///
/// Keys are unique; the validator treats any collision as fatal before an
/// entry is ever overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, FieldValue)>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is populated.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl IntoIterator for Document {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
