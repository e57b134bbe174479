//! # Borovkov
//!
//! Keyed identity signing for autonomous agents: a stable public identity,
//! signed posts and actions, verifiable rotations, and chain attribution.
//!
//! ## Overview
//!
//! An actor holds a secret seed. From it the protocol derives:
//!
//! - **Identity hash**: a public fingerprint, `HMAC-SHA256(seed, "I exist")`
//! - **Signatures**: `HMAC-SHA256(seed, canonical payload)`, 64 hex characters
//! - **Records**: posts and actions carrying identity, signature and timestamp
//! - **Rotations**: an old identity signing over its successor's fingerprint
//!
//! Verification needs the seed. This is a symmetric scheme: anyone able to
//! verify is able to sign.
//!
//! ## Usage
//!
//! ```rust
//! use borovkov::{verify_chain, Identity};
//!
//! let identity = Identity::new("my-agent-seed").unwrap();
//!
//! let post = identity.sign_post("Hello", "First post");
//! assert!(identity.verify_post(&post, "Hello", "First post"));
//!
//! let like = identity.sign_action("upvote", "post/42", None);
//! assert!(verify_chain([&post, &like], "my-agent-seed").unwrap());
//!
//! let json = borovkov::wire::to_json(&post).unwrap();
//! let decoded = borovkov::wire::signed_record_from_json(&json).unwrap();
//! assert_eq!(decoded, post);
//! ```
//!
//! ## Re-exports
//!
//! - `borovkov::core` - Core primitives (Identity, Digest, records, canonicalization)

pub mod error;
pub mod wire;

// Re-export component crates
pub use borovkov_core as core;

// Re-export main types for convenience
pub use error::{Error, Result};

// Re-export commonly used core types
pub use borovkov_core::{
    verify_chain, verify_rotation, Attributed, CoreError, Digest, Fingerprint, Identity,
    IdentityConfig, Metadata, ProtocolVersion, RecordKind, RecordSignature, RotationRecord, Seed,
    SignedRecord, VerificationError,
};
