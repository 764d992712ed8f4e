use std::time::Duration;

use crate::domain::{StreamKind, Timestamp};

/// Per-stream watermark state
///
/// The watermark for a stream is the maximum event time observed so far
/// minus the allowed lateness. It never regresses: observing an older
/// event time leaves `max_seen` untouched. Each worker owns its own
/// tracker, so `&mut self` suffices and no interior mutability is needed.
#[derive(Debug)]
pub struct WatermarkTracker {
    allowed_lateness: Duration,
    max_seen: [Option<Timestamp>; StreamKind::COUNT],
}

impl WatermarkTracker {
    /// Create a tracker with the given allowed lateness per stream
    pub fn new(allowed_lateness: Duration) -> Self {
        Self {
            allowed_lateness,
            max_seen: [None; StreamKind::COUNT],
        }
    }

    /// Record an observed event time and return the stream's new watermark
    pub fn observe(&mut self, kind: StreamKind, event_time: Timestamp) -> Timestamp {
        let slot = &mut self.max_seen[kind.index()];
        let max = match *slot {
            Some(seen) => seen.max(event_time),
            None => event_time,
        };
        *slot = Some(max);
        max.saturating_sub(self.allowed_lateness)
    }

    /// Current watermark for a stream, or None before its first event
    pub fn current(&self, kind: StreamKind) -> Option<Timestamp> {
        self.max_seen[kind.index()].map(|max| max.saturating_sub(self.allowed_lateness))
    }
}
