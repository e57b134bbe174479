// Signing & verification benchmarks for the Borovkov protocol.
//
// Covers identity construction, raw signing and verification, action signing
// with metadata, and chain attribution at various lengths.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use borovkov::{verify_chain, Identity};

const SEED: &str = "bench-agent-seed";

fn bench_identity_new(c: &mut Criterion) {
    c.bench_function("hmac/identity_new", |b| {
        b.iter(|| Identity::new(black_box(SEED)).unwrap());
    });
}

fn bench_sign(c: &mut Criterion) {
    let identity = Identity::new(SEED).unwrap();
    let message = b"I am the bench agent; nonce=42";

    c.bench_function("hmac/sign", |b| {
        b.iter(|| identity.sign(black_box(message)));
    });
}

fn bench_verify(c: &mut Criterion) {
    let identity = Identity::new(SEED).unwrap();
    let message = b"I am the bench agent; nonce=42";
    let signature = identity.sign(message).to_hex();

    c.bench_function("hmac/verify", |b| {
        b.iter(|| identity.verify(black_box(message), &signature));
    });
}

fn bench_sign_action(c: &mut Criterion) {
    let identity = Identity::new(SEED).unwrap();
    let metadata = json!({
        "text": "great post",
        "score": 4.5,
        "tags": ["rust", "hmac"],
        "reply_to": null,
    });

    c.bench_function("hmac/sign_action", |b| {
        b.iter(|| {
            identity.sign_action_at("comment", "post/42", metadata.as_object(), 1_700_000_000)
        });
    });
}

fn bench_verify_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac/verify_chain");
    let identity = Identity::new(SEED).unwrap();

    for size in [10, 100, 1000] {
        let records: Vec<_> = (0..size)
            .map(|i| identity.sign_post_at(&format!("post-{:04}", i), "body", i as i64))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| verify_chain(records, SEED).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_identity_new,
    bench_sign,
    bench_verify,
    bench_sign_action,
    bench_verify_chain,
);
criterion_main!(benches);
