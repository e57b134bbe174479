//! Identity: one actor's signing capability.
//!
//! An [`Identity`] is built once from a seed and is immutable afterwards.
//! It can be shared across threads; no call mutates it.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::canonical::{ActionPayload, Metadata, PostPayload, ProtocolVersion, RotationPayload};
use crate::crypto::{Digest, Seed, Signer, MIN_SEED_LEN};
use crate::error::{Result, VerificationError};
use crate::record::{RecordKind, RecordSignature, RotationRecord, SignedRecord};
use crate::types::{Fingerprint, IDENTITY_MARKER};
use crate::validation;

/// Policy for constructing identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Minimum seed length (characters for text seeds).
    pub min_seed_len: usize,
    /// Canonicalization rules for newly signed records.
    pub protocol_version: ProtocolVersion,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            min_seed_len: MIN_SEED_LEN,
            protocol_version: ProtocolVersion::CURRENT,
        }
    }
}

/// An actor's signing identity.
///
/// Holds the keyed signer and the fingerprint derived from it. `Debug` shows
/// the fingerprint only.
#[derive(Clone)]
pub struct Identity {
    signer: Signer,
    fingerprint: Fingerprint,
    config: IdentityConfig,
}

impl Identity {
    /// Create from a text seed with the default policy.
    pub fn new(seed: &str) -> Result<Self> {
        Self::from_seed(&Seed::new(seed))
    }

    /// Create from a seed with the default policy.
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        Self::with_config(seed, IdentityConfig::default())
    }

    /// Create from a seed with an explicit policy.
    pub fn with_config(seed: &Seed, config: IdentityConfig) -> Result<Self> {
        seed.check_len(config.min_seed_len)?;
        let signer = Signer::new(seed)?;
        let fingerprint = Fingerprint(signer.sign(IDENTITY_MARKER.as_bytes()));
        Ok(Self {
            signer,
            fingerprint,
            config,
        })
    }

    /// The policy this identity was built with.
    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    /// The rule set new records are signed under.
    pub fn protocol_version(&self) -> ProtocolVersion {
        self.config.protocol_version
    }

    pub(crate) fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Sign raw content. Deterministic for a given seed and content.
    pub fn sign(&self, content: impl AsRef<[u8]>) -> Digest {
        self.signer.sign(content.as_ref())
    }

    /// Verify a hex signature over raw content.
    ///
    /// Returns `false` for a mismatch and for malformed hex alike.
    pub fn verify(&self, content: impl AsRef<[u8]>, signature: &str) -> bool {
        match self.signer.verify_hex(content.as_ref(), signature) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    identity = %self.fingerprint.short(),
                    reason = %e,
                    "signature rejected"
                );
                false
            }
        }
    }

    /// The public fingerprint: `sign("I exist")`.
    pub fn identity_hash(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Sign a post, stamped with the current time.
    ///
    /// The timestamp is NOT covered by the signature: two posts with the same
    /// title and content carry the same signature. A system clock set before
    /// the Unix epoch stamps `0`.
    pub fn sign_post(&self, title: &str, content: &str) -> SignedRecord {
        self.sign_post_at(title, content, now_secs())
    }

    /// Sign a post with an explicit timestamp.
    pub fn sign_post_at(&self, title: &str, content: &str, timestamp: i64) -> SignedRecord {
        let version = self.protocol_version();
        let message = PostPayload { title, content }.canonical_bytes(version);
        let signature = RecordSignature::Post(self.signer.sign(&message));
        tracing::trace!(
            identity = %self.fingerprint.short(),
            kind = %RecordKind::Post,
            "signed record"
        );
        SignedRecord::new(self.fingerprint, signature, timestamp, version)
    }

    /// Sign an action, stamped with the current time.
    ///
    /// The clock is read once: the same value is signed inside the payload and
    /// written as the record timestamp. A system clock set before the Unix
    /// epoch stamps `0`.
    pub fn sign_action(
        &self,
        action: &str,
        target: &str,
        metadata: Option<&Metadata>,
    ) -> SignedRecord {
        self.sign_action_at(action, target, metadata, now_secs())
    }

    /// Sign an action with an explicit timestamp.
    pub fn sign_action_at(
        &self,
        action: &str,
        target: &str,
        metadata: Option<&Metadata>,
        timestamp: i64,
    ) -> SignedRecord {
        let version = self.protocol_version();
        let message = ActionPayload {
            action,
            target,
            metadata,
            timestamp,
        }
        .canonical_bytes(version);
        let signature = RecordSignature::Action(self.signer.sign(&message));
        tracing::trace!(
            identity = %self.fingerprint.short(),
            kind = %RecordKind::Action,
            "signed record"
        );
        SignedRecord::new(self.fingerprint, signature, timestamp, version)
    }

    /// Announce a rotation to the identity of `new_seed`, signed with this seed.
    ///
    /// Fails with `InvalidSeed` if `new_seed` breaks this identity's policy.
    pub fn sign_rotation(&self, new_seed: &str) -> Result<RotationRecord> {
        self.sign_rotation_at(&Seed::new(new_seed), now_secs())
    }

    /// Announce a rotation with an explicit timestamp.
    pub fn sign_rotation_at(&self, new_seed: &Seed, rotated_at: i64) -> Result<RotationRecord> {
        let successor = Identity::with_config(new_seed, self.config)?;
        Ok(self.rotation_to(&successor.identity_hash(), rotated_at))
    }

    /// Announce a rotation to a known fingerprint.
    pub fn rotation_to(&self, new_identity: &Fingerprint, rotated_at: i64) -> RotationRecord {
        let version = self.protocol_version();
        let message = RotationPayload {
            old_identity: &self.fingerprint,
            new_identity,
        }
        .canonical_bytes(version);
        tracing::trace!(
            old = %self.fingerprint.short(),
            new = %new_identity.short(),
            "signed rotation"
        );
        RotationRecord {
            old_identity: self.fingerprint,
            new_identity: *new_identity,
            rotation_signature: self.signer.sign(&message),
            rotated_at,
            protocol_version: version.as_str().to_string(),
        }
    }

    /// Verify a post record against its title and content.
    pub fn verify_post(&self, record: &SignedRecord, title: &str, content: &str) -> bool {
        self.report(validation::check_post(self, record, title, content), "post")
    }

    /// Verify an action record against its fields.
    ///
    /// The record's `timestamp` is the one rebuilt into the payload.
    pub fn verify_action(
        &self,
        record: &SignedRecord,
        action: &str,
        target: &str,
        metadata: Option<&Metadata>,
    ) -> bool {
        self.report(
            validation::check_action(self, record, action, target, metadata),
            "action",
        )
    }

    /// Verify that this identity signed a rotation record.
    pub fn verify_rotation_record(&self, record: &RotationRecord) -> bool {
        self.report(validation::check_rotation_record(self, record), "rotation")
    }

    fn report(&self, outcome: std::result::Result<(), VerificationError>, what: &str) -> bool {
        match outcome {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    identity = %self.fingerprint.short(),
                    reason = %e,
                    "{} rejected",
                    what
                );
                false
            }
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:?})", self.fingerprint)
    }
}

/// Current time in Unix seconds.
pub(crate) fn now_secs() -> i64 {
    unix_secs(SystemTime::now())
}

/// Seconds since the Unix epoch; a clock set before the epoch yields `0`.
fn unix_secs(now: SystemTime) -> i64 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => {
            tracing::warn!(
                behind_secs = e.duration().as_secs(),
                "system clock is before the Unix epoch, stamping 0"
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    const KIRILL_ID: &str = "a9a8ee0a2d1759fdb8adf5cef303edbf9fc1bb2a21270ad187c43ee99ff629dc";

    #[test]
    fn test_known_identity() {
        let identity = Identity::new("KirillBorovkov").unwrap();
        assert_eq!(identity.identity_hash().to_hex(), KIRILL_ID);
    }

    #[test]
    fn test_known_signature() {
        let identity = Identity::new("KirillBorovkov").unwrap();
        let sig = identity.sign("I am KirillBorovkov");
        assert_eq!(
            sig.to_hex(),
            "cf09b4bfc0ef002dbdec3bc1610753e7fa55b708f39d39d00de5cc2cf1c04239"
        );
        assert!(identity.verify("I am KirillBorovkov", &sig.to_hex()));
    }

    #[test]
    fn test_identity_hash_deterministic() {
        let a = Identity::new("TestAgent").unwrap();
        let b = Identity::new("TestAgent").unwrap();
        assert_eq!(a.identity_hash(), b.identity_hash());
        assert_eq!(a.identity_hash(), Fingerprint(a.sign(IDENTITY_MARKER)));
    }

    #[test]
    fn test_identity_hash_unique() {
        let a = Identity::new("Agent1").unwrap();
        let b = Identity::new("Agent2").unwrap();
        assert_ne!(a.identity_hash(), b.identity_hash());
    }

    #[test]
    fn test_seed_minimum_length() {
        assert_eq!(
            Identity::new("").unwrap_err(),
            CoreError::InvalidSeed { min: 3, actual: 0 }
        );
        assert_eq!(
            Identity::new("ab").unwrap_err(),
            CoreError::InvalidSeed { min: 3, actual: 2 }
        );
        assert!(Identity::new("abc").is_ok());
    }

    #[test]
    fn test_custom_minimum_length() {
        let config = IdentityConfig {
            min_seed_len: 8,
            ..IdentityConfig::default()
        };
        assert!(Identity::with_config(&Seed::new("short"), config).is_err());
        assert!(Identity::with_config(&Seed::new("long enough"), config).is_ok());
    }

    #[test]
    fn test_empty_content_is_signable() {
        let identity = Identity::new("KirillBorovkov").unwrap();
        let sig = identity.sign("");
        assert_eq!(
            sig.to_hex(),
            "f24dbc61e8f963fb08d67a95ada25ccbd8494258b89d078522ab167bab163b80"
        );
        assert!(identity.verify("", &sig.to_hex()));
    }

    #[test]
    fn test_binary_content_is_signable() {
        let identity = Identity::new("TestAgent").unwrap();
        let content: Vec<u8> = (0u8..=255).collect();
        let sig = identity.sign(&content);
        assert!(identity.verify(&content, &sig.to_hex()));
    }

    #[test]
    fn test_verify_rejects_wrong_content_and_seed() {
        let a = Identity::new("Agent1").unwrap();
        let b = Identity::new("Agent2").unwrap();
        let sig = a.sign("hello").to_hex();

        assert!(!a.verify("world", &sig));
        assert!(!b.verify("hello", &sig));
        assert!(!a.verify("hello", &"0".repeat(64)));
    }

    #[test]
    fn test_verify_malformed_is_false() {
        let identity = Identity::new("TestAgent").unwrap();
        let sig = identity.sign("hello").to_hex();

        assert!(!identity.verify("hello", ""));
        assert!(!identity.verify("hello", "xyz"));
        assert!(!identity.verify("hello", &sig[..63]));
        assert!(!identity.verify("hello", &format!("{sig}0")));
        assert!(!identity.verify("hello", &sig.to_uppercase()));
    }

    #[test]
    fn test_sign_post() {
        let identity = Identity::new("TestAgent").unwrap();
        let record = identity.sign_post("Title", "Content");

        assert_eq!(record.identity, identity.identity_hash());
        assert!(record.is_post());
        assert_eq!(record.protocol_version, "1.0.0");
        assert!(record.timestamp > 0);
        assert!(identity.verify(
            r#"{"content": "Content", "title": "Title"}"#,
            &record.digest().to_hex()
        ));
        assert!(identity.verify_post(&record, "Title", "Content"));
        assert!(!identity.verify_post(&record, "Title", "Other"));
    }

    #[test]
    fn test_post_timestamp_not_signed() {
        let identity = Identity::new("TestAgent").unwrap();
        let early = identity.sign_post_at("Title", "Content", 1);
        let late = identity.sign_post_at("Title", "Content", 2);
        assert_eq!(early.signature, late.signature);
    }

    #[test]
    fn test_known_post_signature() {
        let identity = Identity::new("KirillBorovkov").unwrap();
        let record = identity.sign_post_at("Test", "Content", 0);
        assert_eq!(
            record.digest().to_hex(),
            "ae5a111b598bc5ae5d2bbd9aa489fe13e1de6e01336b67af9adcaec78951f7b9"
        );
    }

    #[test]
    fn test_sign_action() {
        let identity = Identity::new("TestAgent").unwrap();
        let metadata = json!({"text": "hello"});
        let record = identity.sign_action("comment", "post123", metadata.as_object());

        assert_eq!(record.identity, identity.identity_hash());
        assert!(record.is_action());
        assert!(identity.verify_action(&record, "comment", "post123", metadata.as_object()));
        assert!(!identity.verify_action(&record, "comment", "post123", None));
    }

    #[test]
    fn test_action_timestamp_is_signed() {
        let identity = Identity::new("TestAgent").unwrap();
        let early = identity.sign_action_at("comment", "t", None, 1);
        let late = identity.sign_action_at("comment", "t", None, 2);
        assert_ne!(early.signature, late.signature);

        let mut shifted = early.clone();
        shifted.timestamp = 2;
        assert!(!identity.verify_action(&shifted, "comment", "t", None));
    }

    #[test]
    fn test_known_action_signature() {
        let identity = Identity::new("KirillBorovkov").unwrap();
        let metadata = json!({"text": "hello", "n": 3, "f": 1.5, "z": [1, null, true]});
        let record =
            identity.sign_action_at("comment", "post123", metadata.as_object(), 1736870400);
        assert_eq!(
            record.digest().to_hex(),
            "5d2a6ade8fdda2cbeaef532026f9a9624413e310e5f4fb16325d8942977b5f77"
        );
    }

    #[test]
    fn test_sign_rotation() {
        let old = Identity::new("OldSeed").unwrap();
        let new = Identity::new("NewSeed").unwrap();
        let rotation = old.sign_rotation("NewSeed").unwrap();

        assert_eq!(rotation.old_identity, old.identity_hash());
        assert_eq!(rotation.new_identity, new.identity_hash());
        assert_eq!(
            rotation.rotation_signature.to_hex(),
            "e66a6fb17363a0a3581d00b6a5a2786087b734a4c75111b83e3361c6f2b35bbe"
        );
        assert!(old.verify_rotation_record(&rotation));
        assert!(!new.verify_rotation_record(&rotation));
    }

    #[test]
    fn test_sign_rotation_rejects_short_seed() {
        let old = Identity::new("OldSeed").unwrap();
        assert!(matches!(
            old.sign_rotation("no"),
            Err(CoreError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_debug_hides_seed() {
        let identity = Identity::new("super-secret-seed").unwrap();
        let debug = format!("{:?}", identity);
        assert!(debug.starts_with("Identity(Fingerprint("));
        assert!(!debug.contains("super-secret-seed"));
    }

    #[test]
    fn test_clock_before_epoch_stamps_zero() {
        let before = UNIX_EPOCH - std::time::Duration::from_secs(3600);
        assert_eq!(unix_secs(before), 0);
        assert_eq!(unix_secs(UNIX_EPOCH), 0);
        assert_eq!(
            unix_secs(UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000)),
            1_700_000_000
        );
    }

    #[test]
    fn test_identity_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Identity>();
    }
}
