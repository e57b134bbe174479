//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use borovkov_core::{Identity, Metadata, SignedRecord};

/// Generate a valid text seed: printable, at least the minimum length.
pub fn seed() -> impl Strategy<Value = String> {
    "[ -~]{3,40}".prop_map(String::from)
}

/// Generate a seed that is too short to build an identity.
pub fn short_seed() -> impl Strategy<Value = String> {
    ".{0,2}".prop_map(String::from)
}

/// Generate a ready identity.
pub fn identity() -> impl Strategy<Value = Identity> {
    seed().prop_filter_map("seed rejected", |s| Identity::new(&s).ok())
}

/// Generate arbitrary text, including non-ASCII and control characters.
pub fn text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_len).prop_map(|c| c.into_iter().collect())
}

/// Generate content bytes of specified max length.
pub fn content(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a reasonable Unix timestamp in seconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800
}

/// Generate a JSON value of bounded depth.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12)
            .prop_filter_map("non-finite", |f| Number::from_f64(f).map(Value::Number)),
        text(16).prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(text(8), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate an action metadata object.
pub fn metadata() -> impl Strategy<Value = Metadata> {
    prop::collection::btree_map(text(8), json_value(), 0..6)
        .prop_map(|m| m.into_iter().collect::<Map<String, Value>>())
}

/// Parameters for generating a post.
#[derive(Debug, Clone)]
pub struct PostParams {
    pub seed: String,
    pub title: String,
    pub content: String,
    pub timestamp: i64,
}

impl Arbitrary for PostParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (seed(), text(64), text(256), timestamp())
            .prop_map(|(seed, title, content, timestamp)| PostParams {
                seed,
                title,
                content,
                timestamp,
            })
            .boxed()
    }
}

/// Parameters for generating an action.
#[derive(Debug, Clone)]
pub struct ActionParams {
    pub seed: String,
    pub action: String,
    pub target: String,
    pub metadata: Option<Metadata>,
    pub timestamp: i64,
}

impl Arbitrary for ActionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            seed(),
            "[a-z_]{1,16}",
            text(32),
            proptest::option::of(metadata()),
            timestamp(),
        )
            .prop_map(|(seed, action, target, metadata, timestamp)| ActionParams {
                seed,
                action,
                target,
                metadata,
                timestamp,
            })
            .boxed()
    }
}

/// Sign a post from parameters.
///
/// Seeds from [`seed`] always satisfy the minimum length.
pub fn post_from_params(params: &PostParams) -> (Identity, SignedRecord) {
    let identity = Identity::new(&params.seed).expect("generated seed is valid");
    let record = identity.sign_post_at(&params.title, &params.content, params.timestamp);
    (identity, record)
}

/// Sign an action from parameters.
pub fn action_from_params(params: &ActionParams) -> (Identity, SignedRecord) {
    let identity = Identity::new(&params.seed).expect("generated seed is valid");
    let record = identity.sign_action_at(
        &params.action,
        &params.target,
        params.metadata.as_ref(),
        params.timestamp,
    );
    (identity, record)
}

/// Flip one hex character of a signature, keeping it well-formed.
pub fn flip_hex_char(signature: &str, index: usize) -> String {
    let mut chars: Vec<char> = signature.chars().collect();
    let i = index % chars.len().max(1);
    if let Some(c) = chars.get_mut(i) {
        *c = if *c == '0' { '1' } else { '0' };
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use borovkov_core::{verify_chain, CoreError};

    proptest! {
        #[test]
        fn test_sign_deterministic(seed in seed(), content in content(256)) {
            let a = Identity::new(&seed).unwrap();
            let b = Identity::new(&seed).unwrap();

            prop_assert_eq!(a.identity_hash(), b.identity_hash());
            prop_assert_eq!(a.sign(&content), b.sign(&content));
        }

        #[test]
        fn test_sign_then_verify(identity in identity(), content in content(256)) {
            let sig = identity.sign(&content).to_hex();

            prop_assert_eq!(sig.len(), 64);
            prop_assert!(identity.verify(&content, &sig));
        }

        #[test]
        fn test_tampered_signature_rejected(
            seed in seed(),
            content in content(64),
            index in 0usize..64,
        ) {
            let identity = Identity::new(&seed).unwrap();
            let sig = identity.sign(&content).to_hex();
            let tampered = flip_hex_char(&sig, index);

            prop_assert_ne!(&tampered, &sig);
            prop_assert!(!identity.verify(&content, &tampered));
        }

        #[test]
        fn test_malformed_signature_rejected(seed in seed(), junk in "[^0-9a-f]{0,80}") {
            let identity = Identity::new(&seed).unwrap();
            prop_assert!(!identity.verify("content", &junk));
        }

        #[test]
        fn test_different_seeds_different_identities(a in seed(), b in seed()) {
            prop_assume!(a != b);
            let a = Identity::new(&a).unwrap();
            let b = Identity::new(&b).unwrap();
            prop_assert_ne!(a.identity_hash(), b.identity_hash());
        }

        #[test]
        fn test_short_seed_rejected(seed in short_seed()) {
            let is_invalid = matches!(Identity::new(&seed), Err(CoreError::InvalidSeed { .. }));
            prop_assert!(is_invalid);
        }

        #[test]
        fn test_post_round_trip(params: PostParams) {
            let (identity, record) = post_from_params(&params);
            prop_assert!(identity.verify_post(&record, &params.title, &params.content));
        }

        #[test]
        fn test_post_tampered_content(params: PostParams, extra in "[a-z]{1,8}") {
            let (identity, record) = post_from_params(&params);
            let altered = format!("{}{}", params.content, extra);
            prop_assert!(!identity.verify_post(&record, &params.title, &altered));
        }

        #[test]
        fn test_action_round_trip(params: ActionParams) {
            let (identity, record) = action_from_params(&params);
            prop_assert_eq!(record.timestamp, params.timestamp);
            prop_assert!(identity.verify_action(
                &record,
                &params.action,
                &params.target,
                params.metadata.as_ref(),
            ));
        }

        #[test]
        fn test_action_shifted_timestamp(params: ActionParams, delta in 1i64..1000) {
            let (identity, mut record) = action_from_params(&params);
            record.timestamp += delta;
            prop_assert!(!identity.verify_action(
                &record,
                &params.action,
                &params.target,
                params.metadata.as_ref(),
            ));
        }

        #[test]
        fn test_chain_attribution(
            seed in seed(),
            posts in prop::collection::vec((text(16), text(32)), 0..8),
        ) {
            let identity = Identity::new(&seed).unwrap();
            let records: Vec<_> = posts
                .iter()
                .map(|(title, content)| identity.sign_post_at(title, content, 0))
                .collect();

            prop_assert!(verify_chain(&records, &seed).unwrap());
        }
    }

    #[test]
    fn test_flip_hex_char() {
        assert_eq!(flip_hex_char("00ab", 0), "10ab");
        assert_eq!(flip_hex_char("00ab", 2), "000b");
        assert_eq!(flip_hex_char("00ab", 6), "000b");
    }
}
