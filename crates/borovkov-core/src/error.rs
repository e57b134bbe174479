//! Error types for the Borovkov core.

use thiserror::Error;

/// Errors raised while constructing identities or encoding payloads.
///
/// These are caller faults, such as a seed that breaks policy. Verification never returns them; see [`VerificationError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("identity seed must be at least {min} characters, got {actual}")]
    InvalidSeed { min: usize, actual: usize },

    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Reasons a signature or record fails verification.
///
/// Public verifiers collapse all of these into `false`; the `check_*`
/// functions return them so audit tooling can tell the cases apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("signature is not a 64-character hex digest")]
    MalformedSignature,

    #[error("identity is not a 64-character hex fingerprint")]
    MalformedIdentity,

    #[error("signature does not match the payload")]
    SignatureMismatch,

    #[error("record identity does not match the claimed seed")]
    IdentityMismatch,

    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),

    #[error("record kind does not match the verifier")]
    WrongKind,

    #[error("invalid verifying seed")]
    InvalidSeed,
}

impl From<CoreError> for VerificationError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSeed { .. } => VerificationError::InvalidSeed,
            CoreError::UnsupportedVersion(v) => VerificationError::UnsupportedVersion(v),
            CoreError::Encoding(_) => {
                VerificationError::MalformedSignature
            }
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
