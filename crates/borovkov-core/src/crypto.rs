//! Cryptographic primitives for the Borovkov protocol.
//!
//! Wraps HMAC-SHA256 keyed by the actor's seed with strong types. Digests are
//! compared in constant time over their decoded bytes, never as hex strings.

use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{CoreError, Result, VerificationError};

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 output in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// Minimum seed length accepted by the reference policy.
pub const MIN_SEED_LEN: usize = 3;

/// A 32-byte HMAC-SHA256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Convert to lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a lowercase hex string of exactly 64 characters.
    ///
    /// Uppercase digits are rejected so that every digest has exactly one
    /// accepted spelling.
    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        if let Some((index, c)) = s
            .char_indices()
            .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index });
        }
        let mut arr = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }

    /// Constant-time equality.
    pub fn ct_eq(&self, other: &Digest) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Secret seed material owned by one actor.
///
/// The bytes are wiped on drop. `Debug` never prints them.
#[derive(Clone)]
pub struct Seed {
    bytes: Zeroizing<Vec<u8>>,
    /// Policy length: characters for text seeds, bytes for raw seeds.
    len: usize,
}

impl Seed {
    /// Create from a text seed. Length is counted in characters.
    pub fn new(seed: &str) -> Self {
        Self {
            bytes: Zeroizing::new(seed.as_bytes().to_vec()),
            len: seed.chars().count(),
        }
    }

    /// Create from raw bytes. Length is counted in bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            bytes: Zeroizing::new(bytes),
            len,
        }
    }

    /// Generate a fresh random seed: 32 random bytes, hex-encoded.
    pub fn generate() -> Self {
        let mut raw = Zeroizing::new([0u8; 32]);
        rand::thread_rng().fill_bytes(&mut raw[..]);
        let encoded = Zeroizing::new(hex::encode(&raw[..]));
        Self::new(&encoded)
    }

    /// Policy length of the seed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the seed is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The raw secret bytes. Callers own storage of this value.
    pub fn expose_secret(&self) -> &[u8] {
        &self.bytes
    }

    /// Check the seed against a minimum length.
    pub fn check_len(&self, min: usize) -> Result<()> {
        if self.len < min {
            return Err(CoreError::InvalidSeed {
                min,
                actual: self.len,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<{} redacted>)", self.len)
    }
}

/// HMAC-SHA256 signer keyed by a seed.
///
/// Holds the keyed MAC state; each signature clones it and feeds the message.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Key a signer with the given seed.
    pub fn new(seed: &Seed) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(seed.expose_secret())
            .map_err(|e| CoreError::Encoding(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Digest {
        let mut mac = self.mac.clone();
        mac.update(message);
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        Digest(out)
    }

    /// Verify a hex signature over a message.
    ///
    /// The hex is decoded first; the digests are then compared in constant time.
    pub fn verify_hex(
        &self,
        message: &[u8],
        signature: &str,
    ) -> std::result::Result<(), VerificationError> {
        let claimed =
            Digest::from_hex(signature).map_err(|_| VerificationError::MalformedSignature)?;
        self.verify_digest(message, &claimed)
    }

    /// Verify a decoded signature over a message.
    pub fn verify_digest(
        &self,
        message: &[u8],
        signature: &Digest,
    ) -> std::result::Result<(), VerificationError> {
        if self.sign(message).ct_eq(signature) {
            Ok(())
        } else {
            Err(VerificationError::SignatureMismatch)
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signer(<keyed>)")
    }
}
