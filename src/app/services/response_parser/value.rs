//! Loosely typed field values and the intermediate response record
//!
//! A [`RawRecord`] is the result of zipping a response header line to a data
//! line. Keys are the field names exactly as the server emitted them
//! (casing and spacing preserved); values are scalars coerced by the
//! parsers. Records exist only at the parsing boundary: the record builders
//! consume them and the typed domain records never expose them again.

use crate::{Error, Result};

/// A scalar value from a PUMAPI response field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain text (quotes already stripped)
    Text(String),
    /// Coerced from the literal tokens `true` / `false`
    Bool(bool),
    /// Coerced from a numeric-looking token
    Number(f64),
    /// The literal token `n/a`
    Missing,
}

impl FieldValue {
    /// Text content, if this is a text field
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean field
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric content, if this is a numeric field
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether this field held the `n/a` marker
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Missing => write!(f, "n/a"),
        }
    }
}

/// An ordered mapping of server field names to loosely typed values
///
/// Field order follows the header line of the response. Lookups are linear,
/// which is fine for the handful of fields PUMAPI responses carry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    /// Zip header names and values into a record
    ///
    /// The longer side is truncated to the shorter one; the parsers have
    /// already logged any mismatch before calling this.
    pub fn from_pairs(header: Vec<String>, values: Vec<FieldValue>) -> Self {
        Self {
            fields: header.into_iter().zip(values).collect(),
        }
    }

    /// Look up a field by its exact server name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Text content of a field, if present and textual
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    /// Boolean content of a field, if present and boolean
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    /// Numeric content of a field, if present and numeric
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_f64)
    }

    /// Text content of a required field
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| Error::malformed_response(format!("missing text field '{}'", key)))
    }

    /// Integer content of a required field
    ///
    /// Accepts both numeric fields and text fields holding an integer, since
    /// quoting on the wire decides which of the two the parser produced.
    pub fn require_i32(&self, key: &str) -> Result<i32> {
        let value = self
            .get(key)
            .ok_or_else(|| Error::malformed_response(format!("missing field '{}'", key)))?;
        match value {
            FieldValue::Number(number) => Ok(*number as i32),
            FieldValue::Text(text) => text.trim().parse::<i32>().map_err(|err| {
                Error::malformed_response(format!(
                    "field '{}' is not an integer: '{}' ({})",
                    key, text, err
                ))
            }),
            other => Err(Error::malformed_response(format!(
                "field '{}' is not an integer: {:?}",
                key, other
            ))),
        }
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (name, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}
