//! # Borovkov Core
//!
//! Pure primitives for the Borovkov protocol: keyed identities, canonical
//! payloads, signed records and chain attribution.
//!
//! This crate contains no I/O, no storage, no networking. Every operation is
//! a synchronous computation over in-memory bytes, and an [`Identity`] may be
//! shared across threads freely.
//!
//! ## Key Types
//!
//! - [`Identity`] - An actor's signing capability, built once from a [`Seed`]
//! - [`Fingerprint`] - Public identity hash, `HMAC(seed, "I exist")`
//! - [`SignedRecord`] - A signed post or action
//! - [`RotationRecord`] - A signed handover from one identity to another
//!
//! ## Error model
//!
//! Construction faults are errors ([`CoreError::InvalidSeed`]). Verification
//! of untrusted input is a `bool`; the `check_*` functions in [`validation`]
//! report the reason.
//!
//! ## Canonicalization
//!
//! Payloads are encoded per [`ProtocolVersion`]. See the [`canonical`] module.

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{
    canonicalize, ActionPayload, Metadata, PostPayload, ProtocolVersion, RotationPayload,
};
pub use chain::{verify_chain, Attributed};
pub use crypto::{Digest, Seed, Signer, DIGEST_HEX_LEN, DIGEST_LEN, MIN_SEED_LEN};
pub use error::{CoreError, VerificationError};
pub use identity::{Identity, IdentityConfig};
pub use record::{RecordKind, RecordSignature, RotationRecord, SignedRecord};
pub use types::{Fingerprint, IDENTITY_MARKER};
pub use validation::{
    check_action, check_post, check_rotation, check_rotation_record, verify_rotation,
};
