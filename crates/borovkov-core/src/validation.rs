//! Record verification: rebuild the canonical payload and compare signatures.
//!
//! The `check_*` functions name the reason a record fails. Everything exposed
//! as a plain verifier collapses those reasons into `false`, so it is safe to
//! run on attacker-controlled input.

use crate::canonical::{ActionPayload, Metadata, PostPayload, ProtocolVersion, RotationPayload};
use crate::error::VerificationError;
use crate::identity::Identity;
use crate::record::{RecordSignature, RotationRecord, SignedRecord};
use crate::types::Fingerprint;

type Result<T> = std::result::Result<T, VerificationError>;

/// Resolve the rule set a record was signed under.
fn rules_for(tag: &str) -> Result<ProtocolVersion> {
    ProtocolVersion::parse(tag).ok_or_else(|| VerificationError::UnsupportedVersion(tag.into()))
}

/// Verify a post record.
///
/// Checks, in order:
/// - Protocol version is known
/// - Record is a post
/// - Record identity is this identity's fingerprint
/// - Signature over `{content, title}`
pub fn check_post(
    identity: &Identity,
    record: &SignedRecord,
    title: &str,
    content: &str,
) -> Result<()> {
    let version = rules_for(&record.protocol_version)?;

    let RecordSignature::Post(signature) = &record.signature else {
        return Err(VerificationError::WrongKind);
    };

    if record.identity != identity.identity_hash() {
        return Err(VerificationError::IdentityMismatch);
    }

    let message = PostPayload { title, content }.canonical_bytes(version);
    identity.signer().verify_digest(&message, signature)
}

/// Verify an action record.
///
/// The record's `timestamp` is rebuilt into the payload, so a record whose
/// timestamp was altered after signing fails.
pub fn check_action(
    identity: &Identity,
    record: &SignedRecord,
    action: &str,
    target: &str,
    metadata: Option<&Metadata>,
) -> Result<()> {
    let version = rules_for(&record.protocol_version)?;

    let RecordSignature::Action(signature) = &record.signature else {
        return Err(VerificationError::WrongKind);
    };

    if record.identity != identity.identity_hash() {
        return Err(VerificationError::IdentityMismatch);
    }

    let message = ActionPayload {
        action,
        target,
        metadata,
        timestamp: record.timestamp,
    }
    .canonical_bytes(version);
    identity.signer().verify_digest(&message, signature)
}

/// Verify a rotation record against the identity of its old seed.
pub fn check_rotation_record(identity: &Identity, record: &RotationRecord) -> Result<()> {
    let version = rules_for(&record.protocol_version)?;

    if record.old_identity != identity.identity_hash() {
        return Err(VerificationError::IdentityMismatch);
    }

    let message = RotationPayload {
        old_identity: &record.old_identity,
        new_identity: &record.new_identity,
    }
    .canonical_bytes(version);
    identity
        .signer()
        .verify_digest(&message, &record.rotation_signature)
}

/// Verify a rotation announcement given as hex strings, under the current
/// protocol version.
///
/// Rebuilds an identity from `old_seed`, requires its fingerprint to equal
/// `old_identity`, then checks `rotation_sig` over both fingerprints.
pub fn check_rotation(
    old_identity: &str,
    new_identity: &str,
    rotation_sig: &str,
    old_seed: &str,
) -> Result<()> {
    let old =
        Fingerprint::from_hex(old_identity).map_err(|_| VerificationError::MalformedIdentity)?;
    let new =
        Fingerprint::from_hex(new_identity).map_err(|_| VerificationError::MalformedIdentity)?;

    let identity = Identity::new(old_seed)?;
    if identity.identity_hash() != old {
        return Err(VerificationError::IdentityMismatch);
    }

    let message = RotationPayload {
        old_identity: &old,
        new_identity: &new,
    }
    .canonical_bytes(ProtocolVersion::CURRENT);
    identity.signer().verify_hex(&message, rotation_sig)
}

/// Verify a rotation announcement. Never fails loudly: any fault is `false`.
///
/// A seed below the minimum length, malformed hex, a seed that does not
/// produce `old_identity`, or a bad signature all yield `false`.
pub fn verify_rotation(
    old_identity: &str,
    new_identity: &str,
    rotation_sig: &str,
    old_seed: &str,
) -> bool {
    match check_rotation(old_identity, new_identity, rotation_sig, old_seed) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(reason = %e, "rotation rejected");
            false
        }
    }
}
