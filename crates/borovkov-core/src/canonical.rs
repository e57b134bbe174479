//! Canonical payload encoding for deterministic signing.
//!
//! Every structured payload (post, action, rotation) is turned into one byte
//! string before it is signed. Verifiers rebuild the same bytes from the same
//! fields, so the layout is pinned per [`ProtocolVersion`].
//!
//! Rules for `1.0.0`, a JSON object layout:
//! - Object keys sorted by code point, at every nesting level
//! - `", "` between members and `": "` between key and value
//! - ASCII-only output: `"` `\` and control characters escaped, everything
//!   outside printable ASCII written as `\uXXXX` (UTF-16 units, lowercase hex)
//! - Integers in decimal; floats in shortest round-trip form, with an explicit
//!   exponent sign and at least two exponent digits (`1e+16`, `1e-05`)
//!
//! **This encoding is FROZEN.** Changing it breaks every existing signature;
//! new layouts are added as new versions.

use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Fingerprint;

/// Free-form action metadata.
pub type Metadata = Map<String, Value>;

/// A canonicalization rule set, named by the `protocol_version` tag it writes
/// into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    /// Sorted-key JSON with `", "` / `": "` separators and ASCII escaping.
    #[default]
    V1,
}

impl ProtocolVersion {
    /// The version new records are signed under.
    pub const CURRENT: Self = Self::V1;

    /// The tag written into records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1.0.0",
        }
    }

    /// Look up the rule set for a tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "1.0.0" => Some(Self::V1),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnsupportedVersion(s.to_string()))
    }
}

/// Payload field names.
mod keys {
    pub const ACTION: &str = "action";
    pub const CONTENT: &str = "content";
    pub const METADATA: &str = "metadata";
    pub const NEW_IDENTITY: &str = "new_identity";
    pub const OLD_IDENTITY: &str = "old_identity";
    pub const TARGET: &str = "target";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TITLE: &str = "title";
}

/// Canonical fields of a signed post. The timestamp is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostPayload<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

impl PostPayload<'_> {
    /// Encode to canonical bytes.
    pub fn canonical_bytes(&self, version: ProtocolVersion) -> Vec<u8> {
        canonicalize(
            version,
            &[
                (keys::CONTENT, Value::from(self.content)),
                (keys::TITLE, Value::from(self.title)),
            ],
        )
    }
}

/// Canonical fields of a signed action. The timestamp is signed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionPayload<'a> {
    pub action: &'a str,
    pub target: &'a str,
    /// Absent metadata encodes as an empty object.
    pub metadata: Option<&'a Metadata>,
    pub timestamp: i64,
}

impl ActionPayload<'_> {
    /// Encode to canonical bytes.
    pub fn canonical_bytes(&self, version: ProtocolVersion) -> Vec<u8> {
        let metadata = self.metadata.cloned().unwrap_or_default();
        canonicalize(
            version,
            &[
                (keys::ACTION, Value::from(self.action)),
                (keys::METADATA, Value::Object(metadata)),
                (keys::TARGET, Value::from(self.target)),
                (keys::TIMESTAMP, Value::from(self.timestamp)),
            ],
        )
    }
}

/// Canonical fields of a key rotation: both fingerprints as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPayload<'a> {
    pub old_identity: &'a Fingerprint,
    pub new_identity: &'a Fingerprint,
}

impl RotationPayload<'_> {
    /// Encode to canonical bytes.
    pub fn canonical_bytes(&self, version: ProtocolVersion) -> Vec<u8> {
        canonicalize(
            version,
            &[
                (keys::NEW_IDENTITY, Value::from(self.new_identity.to_hex())),
                (keys::OLD_IDENTITY, Value::from(self.old_identity.to_hex())),
            ],
        )
    }
}

/// Encode a set of named fields under the given rule set.
///
/// The order of `fields` does not matter; the rule set fixes it.
pub fn canonicalize(version: ProtocolVersion, fields: &[(&str, Value)]) -> Vec<u8> {
    match version {
        ProtocolVersion::V1 => {
            let mut buf = String::new();
            let entries: Vec<(&str, &Value)> = fields.iter().map(|(k, v)| (*k, v)).collect();
            encode_object(&mut buf, entries);
            buf.into_bytes()
        }
    }
}

/// Encode a JSON value.
fn encode_value(buf: &mut String, value: &Value) {
    match value {
        Value::Null => buf.push_str("null"),
        Value::Bool(true) => buf.push_str("true"),
        Value::Bool(false) => buf.push_str("false"),
        Value::Number(n) => encode_number(buf, n),
        Value::String(s) => encode_string(buf, s),
        Value::Array(items) => {
            buf.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push_str(", ");
                }
                encode_value(buf, item);
            }
            buf.push(']');
        }
        Value::Object(map) => {
            encode_object(buf, map.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }
    }
}

/// Encode an object with keys sorted by code point.
///
/// `str` ordering compares UTF-8 bytes, which matches code point order.
fn encode_object(buf: &mut String, mut entries: Vec<(&str, &Value)>) {
    entries.sort_by(|a, b| a.0.cmp(b.0));

    buf.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        encode_string(buf, key);
        buf.push_str(": ");
        encode_value(buf, value);
    }
    buf.push('}');
}

/// Encode a number: integers in decimal, floats in shortest form.
fn encode_number(buf: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        buf.push_str(&i.to_string());
    } else if let Some(u) = n.as_u64() {
        buf.push_str(&u.to_string());
    } else if let Some(f) = n.as_f64() {
        encode_float(buf, f);
    }
}

/// Encode a finite float.
///
/// `{:?}` already yields the shortest round-trip digits and switches to
/// exponent form below 1e-4 and from 1e16 on; only the exponent spelling
/// differs (`1e16` becomes `1e+16`, `1e-5` becomes `1e-05`).
fn encode_float(buf: &mut String, f: f64) {
    let repr = format!("{:?}", f);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            buf.push_str(mantissa);
            buf.push('e');
            buf.push(sign);
            if digits.len() < 2 {
                buf.push('0');
            }
            buf.push_str(digits);
        }
        None => buf.push_str(&repr),
    }
}

/// Encode a string with ASCII-only escaping.
fn encode_string(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{08}' => buf.push_str("\\b"),
            '\u{0c}' => buf.push_str("\\f"),
            ' '..='~' => buf.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    buf.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
    }
    buf.push('"');
}
