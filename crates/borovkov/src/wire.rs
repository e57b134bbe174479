//! JSON wire form of records.
//!
//! Decoding treats input as untrusted: every required field is checked for
//! presence and shape, and failures name the field. A record with an unknown
//! `protocol_version` still decodes; verification is what fails closed on it.

use serde::Serialize;
use serde_json::{Map, Value};

use borovkov_core::{
    Digest, Fingerprint, RecordKind, RecordSignature, RotationRecord, SignedRecord,
};

use crate::error::{Error, Result};

mod fields {
    pub const IDENTITY: &str = "identity";
    pub const TIMESTAMP: &str = "timestamp";
    pub const PROTOCOL_VERSION: &str = "protocol_version";
    pub const OLD_IDENTITY: &str = "old_identity";
    pub const NEW_IDENTITY: &str = "new_identity";
    pub const ROTATION_SIGNATURE: &str = "rotation_signature";
    pub const ROTATED_AT: &str = "rotated_at";
}

/// Decode a post or action record from JSON text.
pub fn signed_record_from_json(input: &str) -> Result<SignedRecord> {
    let value: Value = serde_json::from_str(input)?;
    signed_record_from_value(&value)
}

/// Decode a post or action record from a parsed JSON value.
///
/// Exactly one of `signature` and `action_signature` must be present.
pub fn signed_record_from_value(value: &Value) -> Result<SignedRecord> {
    let obj = as_object(value)?;

    let post = RecordKind::Post.signature_field();
    let action = RecordKind::Action.signature_field();
    let signature = match (obj.contains_key(post), obj.contains_key(action)) {
        (true, false) => RecordSignature::Post(digest_field(obj, post)?),
        (false, true) => RecordSignature::Action(digest_field(obj, action)?),
        (true, true) => {
            return Err(Error::malformed(post, "both signature fields present"));
        }
        (false, false) => return Err(Error::malformed(post, "missing")),
    };

    Ok(SignedRecord {
        identity: fingerprint_field(obj, fields::IDENTITY)?,
        signature,
        timestamp: int_field(obj, fields::TIMESTAMP)?,
        protocol_version: str_field(obj, fields::PROTOCOL_VERSION)?.to_string(),
    })
}

/// Decode a rotation record from JSON text.
pub fn rotation_record_from_json(input: &str) -> Result<RotationRecord> {
    let value: Value = serde_json::from_str(input)?;
    rotation_record_from_value(&value)
}

/// Decode a rotation record from a parsed JSON value.
pub fn rotation_record_from_value(value: &Value) -> Result<RotationRecord> {
    let obj = as_object(value)?;
    Ok(RotationRecord {
        old_identity: fingerprint_field(obj, fields::OLD_IDENTITY)?,
        new_identity: fingerprint_field(obj, fields::NEW_IDENTITY)?,
        rotation_signature: digest_field(obj, fields::ROTATION_SIGNATURE)?,
        rotated_at: int_field(obj, fields::ROTATED_AT)?,
        protocol_version: str_field(obj, fields::PROTOCOL_VERSION)?.to_string(),
    })
}

/// Render a record as compact JSON.
pub fn to_json<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Render a record as indented JSON.
pub fn to_json_pretty<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::malformed("record", "expected a JSON object"))
}

fn str_field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a str> {
    obj.get(name)
        .ok_or_else(|| Error::malformed(name, "missing"))?
        .as_str()
        .ok_or_else(|| Error::malformed(name, "expected a string"))
}

fn int_field(obj: &Map<String, Value>, name: &'static str) -> Result<i64> {
    obj.get(name)
        .ok_or_else(|| Error::malformed(name, "missing"))?
        .as_i64()
        .ok_or_else(|| Error::malformed(name, "expected an integer"))
}

fn digest_field(obj: &Map<String, Value>, name: &'static str) -> Result<Digest> {
    let hex = str_field(obj, name)?;
    Digest::from_hex(hex).map_err(|e| Error::malformed(name, e.to_string()))
}

fn fingerprint_field(obj: &Map<String, Value>, name: &'static str) -> Result<Fingerprint> {
    digest_field(obj, name).map(Fingerprint::from_digest)
}
