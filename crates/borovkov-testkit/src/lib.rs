//! # Borovkov Testkit
//!
//! Testing utilities for the Borovkov protocol.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known identities and signatures for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use borovkov_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, signature) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, signature);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use borovkov_testkit::generators::{post_from_params, PostParams};
//!
//! proptest! {
//!     #[test]
//!     fn post_verifies(params: PostParams) {
//!         let (identity, record) = post_from_params(&params);
//!         prop_assert!(identity.verify_post(&record, &params.title, &params.content));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use borovkov_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed("my-agent");
//! let record = fixture.make_post("Title", "Content");
//! assert_eq!(record.identity, fixture.fingerprint());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{action_from_params, post_from_params, ActionParams, PostParams};
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector, VectorInput};
