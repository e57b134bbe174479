//! Golden test vectors for cross-implementation verification.
//!
//! Every value below was produced by an independent implementation of the
//! "1.0.0" rules. A port of the protocol must reproduce each identity and
//! signature byte for byte.

use serde_json::{json, Value};

use borovkov_core::{Digest, Fingerprint, Identity, Seed};

/// What a vector signs.
#[derive(Debug, Clone)]
pub enum VectorInput {
    /// Raw content passed straight to `sign`.
    Raw(&'static str),
    /// A post; the timestamp is irrelevant to the signature.
    Post {
        title: &'static str,
        content: &'static str,
    },
    /// An action. `metadata` builds the JSON object, `None` signs as `{}`.
    Action {
        action: &'static str,
        target: &'static str,
        metadata: Option<fn() -> Value>,
        timestamp: i64,
    },
    /// A rotation from the vector's seed to `new_seed`.
    Rotation { new_seed: &'static str },
}

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Text seed of the signing identity.
    pub seed: &'static str,
    /// Signed input.
    pub input: VectorInput,
    /// Expected fingerprint of `seed` (hex).
    pub expected_identity: &'static str,
    /// Expected signature over the input (hex).
    pub expected_signature: &'static str,
}

const KIRILL: &str = "KirillBorovkov";
const KIRILL_ID: &str = "a9a8ee0a2d1759fdb8adf5cef303edbf9fc1bb2a21270ad187c43ee99ff629dc";

fn comment_metadata() -> Value {
    json!({"text": "hello", "n": 3, "f": 1.5, "z": [1, null, true]})
}

fn empty_metadata() -> Value {
    json!({})
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "identity claim",
            seed: KIRILL,
            input: VectorInput::Raw("I am KirillBorovkov"),
            expected_identity: KIRILL_ID,
            expected_signature: "cf09b4bfc0ef002dbdec3bc1610753e7fa55b708f39d39d00de5cc2cf1c04239",
        },
        GoldenVector {
            name: "greeting",
            seed: KIRILL,
            input: VectorInput::Raw("Hello, Moltbook!"),
            expected_identity: KIRILL_ID,
            expected_signature: "8b9d16d7c5fbbca66677990e7fb1f2c518778b44de2c4d94200ddb78b7497c7d",
        },
        GoldenVector {
            name: "empty content",
            seed: KIRILL,
            input: VectorInput::Raw(""),
            expected_identity: KIRILL_ID,
            expected_signature: "f24dbc61e8f963fb08d67a95ada25ccbd8494258b89d078522ab167bab163b80",
        },
        GoldenVector {
            name: "minimum length seed",
            seed: "abc",
            input: VectorInput::Raw("I exist"),
            expected_identity: "155425ffad956ec4587dc4871ce255e776fafb22d89e416714e41bfbc0524f40",
            expected_signature: "155425ffad956ec4587dc4871ce255e776fafb22d89e416714e41bfbc0524f40",
        },
        GoldenVector {
            name: "post",
            seed: KIRILL,
            input: VectorInput::Post {
                title: "Test",
                content: "Content",
            },
            expected_identity: KIRILL_ID,
            expected_signature: "ae5a111b598bc5ae5d2bbd9aa489fe13e1de6e01336b67af9adcaec78951f7b9",
        },
        GoldenVector {
            name: "empty post",
            seed: KIRILL,
            input: VectorInput::Post {
                title: "",
                content: "",
            },
            expected_identity: KIRILL_ID,
            expected_signature: "06f05d898355aa8ae429058ca8194b16f885f2aac2b62bbcbb68fa3637467936",
        },
        GoldenVector {
            name: "post with escapes and non-ASCII",
            seed: KIRILL,
            input: VectorInput::Post {
                title: "Привет",
                content: "line1\nline2 \"q\" \\ 😀 \x7f",
            },
            expected_identity: KIRILL_ID,
            expected_signature: "e764986ac424e6174fcb88912710e31df8841f691311ca9e52833abff96106fc",
        },
        GoldenVector {
            name: "action with nested metadata",
            seed: KIRILL,
            input: VectorInput::Action {
                action: "comment",
                target: "post123",
                metadata: Some(comment_metadata),
                timestamp: 1736870400,
            },
            expected_identity: KIRILL_ID,
            expected_signature: "5d2a6ade8fdda2cbeaef532026f9a9624413e310e5f4fb16325d8942977b5f77",
        },
        GoldenVector {
            name: "action with empty metadata",
            seed: KIRILL,
            input: VectorInput::Action {
                action: "upvote",
                target: "post/42",
                metadata: Some(empty_metadata),
                timestamp: 1700000000,
            },
            expected_identity: KIRILL_ID,
            expected_signature: "36c453d7a326167cd97d6cc45436451a4635031879757aaca43266a2437d07fd",
        },
        GoldenVector {
            name: "action without metadata",
            seed: KIRILL,
            input: VectorInput::Action {
                action: "upvote",
                target: "post/42",
                metadata: None,
                timestamp: 1700000000,
            },
            expected_identity: KIRILL_ID,
            expected_signature: "36c453d7a326167cd97d6cc45436451a4635031879757aaca43266a2437d07fd",
        },
        GoldenVector {
            name: "rotation",
            seed: "OldSeed",
            input: VectorInput::Rotation {
                new_seed: "NewSeed",
            },
            expected_identity: "7750f2963f49e3134b6ec6ad6e0b10ef15a15496a0ed52b5955605291d340457",
            expected_signature: "e66a6fb17363a0a3581d00b6a5a2786087b734a4c75111b83e3361c6f2b35bbe",
        },
    ]
}

/// Fingerprint of the successor seed in the rotation vector.
pub const ROTATION_NEW_IDENTITY: &str =
    "42d866d327c1febd4a202d46448e7879a619847270b3f50e318b97f0a65f0dfe";

/// Sign a vector's input with its seed.
///
/// Returns the fingerprint and the signature. Vector seeds are all valid, so
/// an error here means the implementation rejects a seed it must accept.
pub fn compute_vector(
    vector: &GoldenVector,
) -> borovkov_core::error::Result<(Fingerprint, Digest)> {
    let identity = Identity::new(vector.seed)?;

    let signature = match &vector.input {
        VectorInput::Raw(content) => identity.sign(content),
        VectorInput::Post { title, content } => {
            *identity.sign_post_at(title, content, 0).digest()
        }
        VectorInput::Action {
            action,
            target,
            metadata,
            timestamp,
        } => {
            let metadata = metadata.map(|build| build());
            let metadata = metadata.as_ref().and_then(Value::as_object);
            *identity
                .sign_action_at(action, target, metadata, *timestamp)
                .digest()
        }
        VectorInput::Rotation { new_seed } => {
            identity
                .sign_rotation_at(&Seed::new(new_seed), 0)?
                .rotation_signature
        }
    };

    Ok((identity.identity_hash(), signature))
}

/// Check every golden vector.
///
/// Each entry is `(name, matches, computed signature hex)`. A vector whose
/// seed is rejected reports `false` with an empty signature.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match compute_vector(v) {
            Ok((identity, signature)) => {
                let hex = signature.to_hex();
                let matches =
                    identity.to_hex() == v.expected_identity && hex == v.expected_signature;
                (v.name.to_string(), matches, hex)
            }
            Err(_) => (v.name.to_string(), false, String::new()),
        })
        .collect()
}
