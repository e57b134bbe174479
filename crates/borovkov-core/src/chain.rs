//! Chain attribution: does every record in a sequence carry one identity?
//!
//! This checks attribution only. It does not re-verify each record's own
//! signature; callers needing integrity run the per-record verifiers too.

use serde_json::Value;

use crate::error::Result;
use crate::identity::Identity;
use crate::record::{RotationRecord, SignedRecord};
use crate::types::Fingerprint;

/// Anything that claims to have been produced by an identity.
pub trait Attributed {
    /// The claimed fingerprint, or `None` if the value carries none.
    fn claimed_identity(&self) -> Option<Fingerprint>;
}

impl Attributed for SignedRecord {
    fn claimed_identity(&self) -> Option<Fingerprint> {
        Some(self.identity)
    }
}

impl Attributed for RotationRecord {
    /// A rotation is attributed to the identity that signed it, the old one.
    fn claimed_identity(&self) -> Option<Fingerprint> {
        Some(self.old_identity)
    }
}

/// Raw records decoded from untrusted JSON: the `identity` string field.
impl Attributed for Value {
    fn claimed_identity(&self) -> Option<Fingerprint> {
        self.get("identity")?
            .as_str()
            .and_then(|s| Fingerprint::from_hex(s).ok())
    }
}

impl<T: Attributed + ?Sized> Attributed for &T {
    fn claimed_identity(&self) -> Option<Fingerprint> {
        (**self).claimed_identity()
    }
}

impl Identity {
    /// Index of the first record not attributed to this identity.
    pub fn chain_break<'a, R, I>(&self, records: I) -> Option<usize>
    where
        R: Attributed + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let expected = self.identity_hash();
        records
            .into_iter()
            .position(|record| record.claimed_identity() != Some(expected))
    }

    /// Whether every record is attributed to this identity.
    ///
    /// An empty sequence is vacuously attributed: `true`.
    pub fn verify_chain<'a, R, I>(&self, records: I) -> bool
    where
        R: Attributed + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        match self.chain_break(records) {
            None => true,
            Some(index) => {
                tracing::debug!(
                    identity = %self.identity_hash().short(),
                    index,
                    "chain record attributed to another identity"
                );
                false
            }
        }
    }
}

/// Check that every record was produced by the identity of `seed`.
///
/// A seed below the minimum length is a construction error and is returned
/// as `InvalidSeed`. An empty sequence yields `Ok(true)`.
pub fn verify_chain<'a, R, I>(records: I, seed: &str) -> Result<bool>
where
    R: Attributed + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let identity = Identity::new(seed)?;
    Ok(identity.verify_chain(records))
}
