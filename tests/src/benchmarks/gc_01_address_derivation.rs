//! # GC-01 Address Derivation Benchmarks
//!
//! Every transaction derives one or two addresses, each a SHA-512 of a
//! short string. Tracks the cost per derivation as ids grow.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use gc_01_address_derivation::AddressDeriver;
use rand::distributions::Alphanumeric;
use rand::Rng;

fn random_id(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Device and telemetry address derivation.
pub fn bench_address_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gc-01-address-derivation");
    let deriver = AddressDeriver::new("GardenContract");

    for len in [8, 64, 512] {
        let device_id = random_id(len);
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("device_address", len), &device_id, |b, id| {
            b.iter(|| black_box(deriver.device_address(black_box(id))))
        });

        group.bench_with_input(
            BenchmarkId::new("telemetry_address", len),
            &device_id,
            |b, id| {
                b.iter(|| {
                    black_box(deriver.telemetry_address(black_box(id), "2025-06-01T00:00:00Z"))
                })
            },
        );
    }

    group.bench_function("namespace_prefix", |b| {
        b.iter(|| black_box(gc_01_address_derivation::namespace_prefix(black_box("GardenContract"))))
    });

    group.finish();
}
