mod common;

use bridgeflow::prelude::*;
use common::event_batch;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::stream;

/// Benchmark the full three-stream pipeline over in-memory sources
fn bench_pipeline(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("pipeline_end_to_end");
    group.sample_size(20);

    for count in [1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.to_async(&runtime).iter(|| async move {
                let make = |kind| {
                    stream::iter(
                        event_batch(kind, 16, count)
                            .into_iter()
                            .map(Ok::<_, IoError>)
                            .collect::<Vec<_>>(),
                    )
                };
                let mut sink = MemorySink::new();
                Pipeline::new(PipelineConfig::default(), SilentSkip)
                    .with_stream(StreamKind::Temperature, make(StreamKind::Temperature))
                    .with_stream(StreamKind::Vibration, make(StreamKind::Vibration))
                    .with_stream(StreamKind::Tilt, make(StreamKind::Tilt))
                    .run(&mut sink)
                    .await
                    .expect("pipeline run");
                sink.into_records().len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
