mod common;

use std::time::{Duration, Instant};

use bridgeflow::prelude::*;
use common::aggregate_batch;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark join completion across varying key cardinality
fn bench_join_completion(c: &mut Criterion) {
    let mut group = c.benchmark_group("join_completion");

    for bridges in [10, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(bridges),
            &bridges,
            |b, &bridges| {
                b.iter_batched(
                    || {
                        (
                            JoinBuffer::new(Duration::from_secs(240)),
                            aggregate_batch(bridges, 10),
                            Instant::now(),
                        )
                    },
                    |(mut buffer, aggregates, now)| {
                        let mut emitted = 0usize;
                        for aggregate in aggregates {
                            if buffer.add(aggregate, now).is_some() {
                                emitted += 1;
                            }
                        }
                        black_box(emitted)
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark sweeping a buffer full of incomplete slots
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");

    group.bench_function("10k_orphaned_slots", |b| {
        b.iter_batched(
            || {
                let mut buffer = JoinBuffer::new(Duration::from_secs(240));
                let start = Instant::now();
                // Temperature-only aggregates: none of these ever complete
                for mut aggregate in aggregate_batch(1_000, 10) {
                    aggregate.kind = StreamKind::Temperature;
                    buffer.add(aggregate, start);
                }
                (buffer, start)
            },
            |(mut buffer, start)| {
                black_box(buffer.sweep(start + Duration::from_secs(300)).len())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_join_completion, bench_sweep);
criterion_main!(benches);
