//! Records: immutable values produced at signing time.
//!
//! A record carries the signer's fingerprint, a signature over a canonical
//! payload, a timestamp and the protocol version whose rules produced the
//! payload bytes. The payload itself is not stored; verifiers rebuild it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::ProtocolVersion;
use crate::crypto::Digest;
use crate::types::Fingerprint;

/// What a [`SignedRecord`] attests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A titled post. The timestamp is outside the signed payload.
    Post,
    /// An action on a target. The timestamp is inside the signed payload.
    Action,
}

impl RecordKind {
    /// Wire name of the signature field for this kind.
    pub const fn signature_field(self) -> &'static str {
        match self {
            Self::Post => "signature",
            Self::Action => "action_signature",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => f.write_str("post"),
            Self::Action => f.write_str("action"),
        }
    }
}

/// The signature of a record, keyed on the wire by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSignature {
    #[serde(rename = "signature")]
    Post(Digest),
    #[serde(rename = "action_signature")]
    Action(Digest),
}

impl RecordSignature {
    /// The record kind.
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Post(_) => RecordKind::Post,
            Self::Action(_) => RecordKind::Action,
        }
    }

    /// The signature digest.
    pub const fn digest(&self) -> &Digest {
        match self {
            Self::Post(d) | Self::Action(d) => d,
        }
    }
}

/// A signed post or action.
///
/// Wire field order: `identity`, `signature` or `action_signature`,
/// `timestamp`, `protocol_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRecord {
    /// Fingerprint of the signer at creation time.
    pub identity: Fingerprint,

    /// HMAC over the canonical payload.
    #[serde(flatten)]
    pub signature: RecordSignature,

    /// Creation time, Unix seconds. Signed for actions only.
    pub timestamp: i64,

    /// Tag of the canonicalization rules used for the payload.
    pub protocol_version: String,
}

impl SignedRecord {
    /// Assemble a record.
    pub fn new(
        identity: Fingerprint,
        signature: RecordSignature,
        timestamp: i64,
        version: ProtocolVersion,
    ) -> Self {
        Self {
            identity,
            signature,
            timestamp,
            protocol_version: version.as_str().to_string(),
        }
    }

    /// The record kind.
    pub fn kind(&self) -> RecordKind {
        self.signature.kind()
    }

    /// The signature digest.
    pub fn digest(&self) -> &Digest {
        self.signature.digest()
    }

    /// The rule set named by `protocol_version`, if this build knows it.
    pub fn version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::parse(&self.protocol_version)
    }

    /// Check if this is a post.
    pub fn is_post(&self) -> bool {
        self.kind() == RecordKind::Post
    }

    /// Check if this is an action.
    pub fn is_action(&self) -> bool {
        self.kind() == RecordKind::Action
    }
}

/// A signed announcement that one identity hands over to another.
///
/// Signed with the OLD seed, which proves the holder of the old seed
/// authorized the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationRecord {
    pub old_identity: Fingerprint,
    pub new_identity: Fingerprint,
    pub rotation_signature: Digest,
    /// Unix seconds. Not signed.
    pub rotated_at: i64,
    pub protocol_version: String,
}

impl RotationRecord {
    /// The rule set named by `protocol_version`, if this build knows it.
    pub fn version(&self) -> Option<ProtocolVersion> {
        ProtocolVersion::parse(&self.protocol_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_record() -> SignedRecord {
        SignedRecord::new(
            Fingerprint::from_bytes([0x11; 32]),
            RecordSignature::Post(Digest::from_bytes([0x22; 32])),
            1736870400,
            ProtocolVersion::V1,
        )
    }

    #[test]
    fn test_record_kind_field_names() {
        assert_eq!(RecordKind::Post.signature_field(), "signature");
        assert_eq!(RecordKind::Action.signature_field(), "action_signature");
        assert_eq!(RecordKind::Action.to_string(), "action");
    }

    #[test]
    fn test_post_record_wire_layout() {
        let json = serde_json::to_string(&post_record()).unwrap();
        assert_eq!(
            json,
            format!(
                r#"{{"identity":"{}","signature":"{}","timestamp":1736870400,"protocol_version":"1.0.0"}}"#,
                "11".repeat(32),
                "22".repeat(32)
            )
        );
    }

    #[test]
    fn test_action_record_wire_layout() {
        let mut record = post_record();
        record.signature = RecordSignature::Action(Digest::from_bytes([0x33; 32]));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["action_signature"], "33".repeat(32));
        assert!(value.get("signature").is_none());
        assert!(record.is_action());
        assert!(!record.is_post());
    }

    #[test]
    fn test_signed_record_decodes() {
        let record = post_record();
        let json = serde_json::to_string(&record).unwrap();
        let decoded: SignedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.version(), Some(ProtocolVersion::V1));
    }

    #[test]
    fn test_unknown_version_still_decodes() {
        let mut record = post_record();
        record.protocol_version = "9.9.9".into();
        let json = serde_json::to_string(&record).unwrap();
        let decoded: SignedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.version(), None);
    }

    #[test]
    fn test_rotation_record_wire_layout() {
        let record = RotationRecord {
            old_identity: Fingerprint::from_bytes([0x01; 32]),
            new_identity: Fingerprint::from_bytes([0x02; 32]),
            rotation_signature: Digest::from_bytes([0x03; 32]),
            rotated_at: 42,
            protocol_version: ProtocolVersion::V1.to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["old_identity"], "01".repeat(32));
        assert_eq!(value["new_identity"], "02".repeat(32));
        assert_eq!(value["rotation_signature"], "03".repeat(32));
        assert_eq!(value["rotated_at"], 42);
        assert_eq!(value["protocol_version"], "1.0.0");
    }
}
