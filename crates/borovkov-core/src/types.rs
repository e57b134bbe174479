//! Strong type definitions for the Borovkov protocol.
//!
//! Public identifiers are newtypes so a fingerprint cannot be passed where a
//! signature is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Digest;

/// Literal signed under a seed to produce its public fingerprint.
pub const IDENTITY_MARKER: &str = "I exist";

/// A public identity fingerprint: HMAC(seed, [`IDENTITY_MARKER`]).
///
/// Safe to share. Two identities built from the same seed have equal
/// fingerprints; the seed cannot be recovered from one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub Digest);

impl Fingerprint {
    /// Wrap a digest.
    pub const fn from_digest(digest: Digest) -> Self {
        Self(digest)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Digest::from_bytes(bytes))
    }

    /// The underlying digest.
    pub const fn as_digest(&self) -> &Digest {
        &self.0
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Convert to lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Parse from a lowercase 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Digest::from_hex(s).map(Self)
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> String {
        self.to_hex()[..16].to_string()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}...)", self.short())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<Digest> for Fingerprint {
    fn from(digest: Digest) -> Self {
        Self(digest)
    }
}
