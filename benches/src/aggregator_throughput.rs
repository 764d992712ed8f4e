mod common;

use bridgeflow::prelude::*;
use common::event_batch;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Benchmark ingest throughput for in-order events on one stream
fn bench_ingest_in_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_in_order");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    (
                        WindowAggregator::new(StreamKind::Temperature, &PipelineConfig::default()),
                        event_batch(StreamKind::Temperature, 16, count),
                    )
                },
                |(mut aggregator, events)| {
                    for event in events {
                        black_box(aggregator.ingest(event).ok());
                    }
                    black_box(aggregator.poll_finalized())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark ingest with a fraction of events arriving out of order
fn bench_ingest_out_of_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_out_of_order");

    group.bench_function("10k_events_shuffled_pairs", |b| {
        b.iter_batched(
            || {
                let mut events = event_batch(StreamKind::Vibration, 16, 10_000);
                // Swap adjacent pairs: out of order but within lateness
                for pair in events.chunks_mut(2) {
                    pair.reverse();
                }
                (
                    WindowAggregator::new(StreamKind::Vibration, &PipelineConfig::default()),
                    events,
                )
            },
            |(mut aggregator, events)| {
                for event in events {
                    black_box(aggregator.ingest(event).ok());
                }
                black_box(aggregator.poll_finalized())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_ingest_in_order, bench_ingest_out_of_order);
criterion_main!(benches);
