use bridgeflow::prelude::*;

pub const MIN: i64 = 60_000;

/// Events for one stream: `count` readings spread over `count` minutes,
/// cycling across `bridges` bridge ids
pub fn event_batch(kind: StreamKind, bridges: usize, count: usize) -> Vec<SensorEvent> {
    (0..count)
        .map(|i| {
            SensorEvent::new(
                format!("BR-{:03}", i % bridges),
                kind,
                Timestamp::from_millis(i as i64 * MIN / 10),
                20.0 + (i % 17) as f64 * 0.5,
            )
        })
        .collect()
}

/// Finalized aggregates for `bridges` bridges over `windows` windows on
/// every stream, interleaved by window
pub fn aggregate_batch(bridges: usize, windows: usize) -> Vec<FinalizedAggregate> {
    let mut out = Vec::with_capacity(bridges * windows * 3);
    for w in 0..windows {
        let start = Timestamp::from_millis(w as i64 * 10 * MIN);
        let end = Timestamp::from_millis((w as i64 + 1) * 10 * MIN);
        for b in 0..bridges {
            let key = WindowKey {
                window_start: start,
                window_end: end,
                bridge_id: format!("BR-{:03}", b),
            };
            for kind in StreamKind::ALL {
                out.push(FinalizedAggregate {
                    kind,
                    key: key.clone(),
                    value: 1.0 + b as f64,
                    info: None,
                });
            }
        }
    }
    out
}
