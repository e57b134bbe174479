//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use borovkov_core::{Fingerprint, Identity, Metadata, RotationRecord, Seed, SignedRecord};

/// A test fixture holding one identity and the seed it was built from.
pub struct TestFixture {
    pub seed: Seed,
    pub identity: Identity,
}

impl TestFixture {
    /// Create a new test fixture with a random seed.
    pub fn new() -> Self {
        Self::from_seed(Seed::generate())
    }

    /// Create with a deterministic text seed.
    ///
    /// Panics if the seed is shorter than the minimum length.
    pub fn with_seed(seed: &str) -> Self {
        Self::from_seed(Seed::new(seed))
    }

    fn from_seed(seed: Seed) -> Self {
        let identity = Identity::from_seed(&seed).expect("fixture seed is valid");
        Self { seed, identity }
    }

    /// The fixture identity's fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        self.identity.identity_hash()
    }

    /// Create a post record.
    pub fn make_post(&self, title: &str, content: &str) -> SignedRecord {
        self.identity.sign_post(title, content)
    }

    /// Create an action record.
    pub fn make_action(
        &self,
        action: &str,
        target: &str,
        metadata: Option<&Metadata>,
    ) -> SignedRecord {
        self.identity.sign_action(action, target, metadata)
    }

    /// Create `count` posts numbered from 1.
    pub fn make_history(&self, count: usize) -> Vec<SignedRecord> {
        (1..=count)
            .map(|i| self.make_post(&format!("Post {}", i), &format!("Body {}", i)))
            .collect()
    }

    /// Rotate to another fixture's identity.
    pub fn make_rotation(&self, successor: &TestFixture) -> RotationRecord {
        self.identity.rotation_to(&successor.fingerprint(), 0)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::with_seed(&format!("party-{}", i)))
        .collect()
}
