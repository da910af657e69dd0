use lattice_enclave::config::NONCE_LEN;
use lattice_enclave::rng::{GeneratorState, StreamGenerator};

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_expand(c: &mut Criterion) {
    c.bench_function("shake256 seed expansion", |b| {
        b.iter(|| GeneratorState::expand(black_box(&[0u8; 32]), None))
    });
}

pub fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream generator");

    let mut rng = StreamGenerator::from_seed(&[0u8; 32], None);
    group.throughput(Throughput::Bytes(NONCE_LEN as u64));
    group.bench_function("40 byte nonce", |b| {
        let mut nonce = [0u8; NONCE_LEN];
        b.iter(|| rng.fill_bytes(black_box(&mut nonce)))
    });

    let mut rng = StreamGenerator::from_seed(&[0u8; 32], None);
    group.throughput(Throughput::Bytes(4096));
    group.bench_function("4 KiB", |b| {
        let mut buf = [0u8; 4096];
        b.iter(|| rng.fill_bytes(black_box(&mut buf)))
    });

    group.finish();
}

criterion_group!(benches, bench_expand, bench_stream);
criterion_main!(benches);
