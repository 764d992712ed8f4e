//! Replay a synthetic morning of bridge telemetry through the pipeline
//! and print the joined metrics CSV to stdout.
//!
//! Run with: `cargo run --example replay`

use bridgeflow::prelude::*;
use futures::stream;

const MIN: i64 = 60_000;

fn minutes(m: i64) -> Timestamp {
    Timestamp::parse_rfc3339("2024-03-01T08:00:00Z")
        .expect("valid base time")
        .saturating_add(std::time::Duration::from_millis((m * MIN) as u64))
}

fn telemetry(kind: StreamKind) -> Vec<Result<SensorEvent, IoError>> {
    let bridges = ["BR-001", "BR-002"];
    let mut events = Vec::new();
    for m in 0..45 {
        for (i, bridge) in bridges.iter().enumerate() {
            // Each bridge reports every 2-3 minutes, slightly out of phase
            if (m + i as i64) % (2 + i as i64) != 0 {
                continue;
            }
            let value = match kind {
                StreamKind::Temperature => 18.0 + (m % 7) as f64 * 0.8,
                StreamKind::Vibration => 0.2 + (m % 5) as f64 * 0.07,
                StreamKind::Tilt => 0.9 + (m % 4) as f64 * 0.15,
            };
            let mut event = SensorEvent::new(*bridge, kind, minutes(m), value);
            if kind == StreamKind::Temperature {
                event = match i {
                    0 => event.with_info("Golden Gate", "San Francisco"),
                    _ => event.with_info("Tower Bridge", "London"),
                };
            }
            events.push(Ok(event));
        }
    }
    events
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut sink = CsvMetricsWriter::from_tokio(tokio::io::stdout());
    let summary = Pipeline::new(PipelineConfig::default(), SkipErrors)
        .with_stream(StreamKind::Temperature, stream::iter(telemetry(StreamKind::Temperature)))
        .with_stream(StreamKind::Vibration, stream::iter(telemetry(StreamKind::Vibration)))
        .with_stream(StreamKind::Tilt, stream::iter(telemetry(StreamKind::Tilt)))
        .run(&mut sink)
        .await?;

    eprintln!(
        "emitted {} records, discarded {} incomplete slots",
        summary.records_emitted, summary.slots_discarded
    );
    Ok(())
}
