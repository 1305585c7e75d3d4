//! # GC-02 State Transition Benchmarks
//!
//! Full processor path: payload decode, lock, read, validate, canonical
//! encode, commit. Telemetry is the hot path, so it is measured against a
//! state already holding many devices.

use crate::fixtures::{request, timestamp, K1};
use criterion::{black_box, BatchSize, BenchmarkId, Criterion, Throughput};
use gc_02_state_transition::prelude::*;

fn populated(devices: usize) -> (GardenProcessor, InMemoryState) {
    let processor = GardenProcessor::new(ContractConfig::default()).unwrap();
    let state = InMemoryState::new();
    for i in 0..devices {
        processor
            .apply(&request(&Command::register(format!("dev-{i}"), "t0"), K1), &state)
            .unwrap();
    }
    (processor, state)
}

/// Registration and telemetry through the processor.
pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("gc-02-state-transition");
    group.throughput(Throughput::Elements(1));

    group.bench_function("register_device", |b| {
        b.iter_batched(
            || {
                (
                    GardenProcessor::new(ContractConfig::default()).unwrap(),
                    InMemoryState::new(),
                    request(&Command::register("dev-new", "t0"), K1),
                )
            },
            |(processor, state, req)| black_box(processor.apply(&req, &state).is_ok()),
            BatchSize::SmallInput,
        )
    });

    for devices in [1, 1_000] {
        let (processor, state) = populated(devices);
        let mut n = 0usize;
        group.bench_with_input(
            BenchmarkId::new("send_telemetry", devices),
            &devices,
            |b, &devices| {
                b.iter(|| {
                    n += 1;
                    let device_id = format!("dev-{}", n % devices);
                    let req = request(
                        &Command::telemetry(device_id, 24.0, (n % 100) as f64, timestamp(n)),
                        K1,
                    );
                    black_box(processor.apply(&req, &state).is_ok())
                })
            },
        );
    }

    group.finish();
}

/// Canonical record encoding on its own.
pub fn bench_canonical_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("gc-02-canonical-encoding");
    let mut device = DeviceRecord::register(
        "dev-1",
        Some("Greenhouse Bed A".to_string()),
        K1,
        Some("t0".to_string()),
    );
    let telemetry = TelemetryRecord::new("dev-1", 26.0, 22.0, "t1", PumpStatus::On);
    device.record_reading(&telemetry);

    group.bench_function("device_record", |b| b.iter(|| black_box(device.encode())));
    group.bench_function("telemetry_record", |b| b.iter(|| black_box(telemetry.encode())));
    group.finish();
}
