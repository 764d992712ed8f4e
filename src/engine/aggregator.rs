use std::collections::BTreeMap;
use std::mem;
use std::time::Duration;

use tracing::{debug, trace};

use super::watermark::WatermarkTracker;
use crate::domain::{
    Accumulator, FinalizedAggregate, SensorEvent, StreamKind, ValidationError, WindowKey,
};
use crate::streaming::PipelineConfig;

/// Counters exposed by a per-stream aggregator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorStats {
    pub events_accepted: u64,
    pub late_dropped: u64,
    pub windows_finalized: u64,
}

/// Per-stream tumbling-window aggregator
///
/// Owns one incremental accumulator per (bridge, window) bucket for a
/// single stream kind. New events either update an open accumulator or
/// are dropped as late; whenever the stream's watermark advances past a
/// window's end, that window is finalized, queued for the join stage,
/// and its accumulator discarded. Finalization is driven entirely by
/// ingest-time watermark advancement; there is no timer.
#[derive(Debug)]
pub struct WindowAggregator {
    kind: StreamKind,
    window_size: Duration,
    rounding_precision: u32,
    watermarks: WatermarkTracker,
    open: BTreeMap<WindowKey, Accumulator>,
    ready: Vec<FinalizedAggregate>,
    stats: AggregatorStats,
}

impl WindowAggregator {
    /// Create an aggregator for one stream kind
    pub fn new(kind: StreamKind, config: &PipelineConfig) -> Self {
        Self {
            kind,
            window_size: config.window_size,
            rounding_precision: config.rounding_precision,
            watermarks: WatermarkTracker::new(config.allowed_lateness),
            open: BTreeMap::new(),
            ready: Vec::new(),
            stats: AggregatorStats::default(),
        }
    }

    /// Ingest one event
    ///
    /// Malformed events are rejected with a `ValidationError` and leave
    /// all state untouched. Late events (older than the stream's current
    /// watermark) are dropped silently and counted; the watermark has
    /// already promised no further updates to windows ending before it.
    pub fn ingest(&mut self, event: SensorEvent) -> Result<(), ValidationError> {
        event.validate()?;
        if event.kind != self.kind {
            return Err(ValidationError::StreamMismatch {
                expected: self.kind,
                actual: event.kind,
            });
        }

        // Late check against the watermark as it stood before this
        // event: an event never rejects itself by advancing it.
        if let Some(watermark) = self.watermarks.current(self.kind)
            && event.event_time < watermark
        {
            debug!(
                stream = %self.kind,
                bridge_id = %event.bridge_id,
                event_time = %event.event_time,
                watermark = %watermark,
                "Dropping late event"
            );
            self.stats.late_dropped += 1;
            return Ok(());
        }

        let watermark = self.watermarks.observe(self.kind, event.event_time);
        let key = WindowKey::for_event(&event.bridge_id, event.event_time, self.window_size);
        match self.open.get_mut(&key) {
            Some(accumulator) => accumulator.update(&event),
            None => {
                trace!(stream = %self.kind, window = %key, "Opening window");
                self.open.insert(key, Accumulator::seed(&event));
            }
        }
        self.stats.events_accepted += 1;

        self.finalize_up_to(watermark);
        Ok(())
    }

    /// Drain aggregates whose windows have closed since the last poll
    pub fn poll_finalized(&mut self) -> Vec<FinalizedAggregate> {
        mem::take(&mut self.ready)
    }

    /// Counters for accepted, late-dropped, and finalized totals
    pub fn stats(&self) -> AggregatorStats {
        self.stats
    }

    /// Number of still-open windows
    pub fn open_windows(&self) -> usize {
        self.open.len()
    }

    /// Close every open window whose end the watermark has passed
    ///
    /// Keys sort by window start first and all windows share one size,
    /// so the closable set is always a prefix of the map.
    fn finalize_up_to(&mut self, watermark: crate::domain::Timestamp) {
        while self
            .open
            .first_key_value()
            .is_some_and(|(key, _)| key.window_end <= watermark)
        {
            if let Some((key, accumulator)) = self.open.pop_first() {
                let (value, info) = accumulator.finish(self.rounding_precision);
                debug!(
                    stream = %self.kind,
                    window = %key,
                    value,
                    "Finalizing window"
                );
                self.stats.windows_finalized += 1;
                self.ready.push(FinalizedAggregate {
                    kind: self.kind,
                    key,
                    value,
                    info,
                });
            }
        }
    }
}
