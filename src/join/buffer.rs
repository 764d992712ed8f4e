use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::domain::{BridgeInfo, BridgeMetrics, FinalizedAggregate, StreamKind, WindowKey};

/// Partial join state for one (bridge, window) key
///
/// One value slot per stream kind plus the passthrough fields carried by
/// the temperature aggregate. `first_seen_at` is processing time and
/// only drives garbage collection.
#[derive(Debug)]
struct JoinSlot {
    values: [Option<f64>; StreamKind::COUNT],
    info: Option<BridgeInfo>,
    first_seen_at: Instant,
}

impl JoinSlot {
    fn new(now: Instant) -> Self {
        Self {
            values: [None; StreamKind::COUNT],
            info: None,
            first_seen_at: now,
        }
    }

    fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    fn missing(&self) -> Vec<StreamKind> {
        StreamKind::ALL
            .into_iter()
            .filter(|kind| self.values[kind.index()].is_none())
            .collect()
    }
}

/// A join slot dropped by `sweep` before all three streams reported
#[derive(Debug)]
pub struct ExpiredSlot {
    pub key: WindowKey,
    pub missing: Vec<StreamKind>,
    pub age: Duration,
}

/// Counters exposed by the join buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub records_completed: u64,
    pub duplicates_replaced: u64,
    pub slots_expired: u64,
}

/// Inner-join buffer aligning the three per-stream window aggregates
///
/// Holds finalized aggregates keyed by (bridge, window) until all three
/// streams have reported that key, then emits the combined record and
/// drops the slot. Slots that never complete are swept after a grace
/// period so a silent sensor cannot grow the buffer without bound.
#[derive(Debug)]
pub struct JoinBuffer {
    grace_period: Duration,
    slots: HashMap<WindowKey, JoinSlot>,
    stats: JoinStats,
}

impl JoinBuffer {
    /// Create a buffer that expires incomplete slots after `grace_period`
    pub fn new(grace_period: Duration) -> Self {
        Self {
            grace_period,
            slots: HashMap::new(),
            stats: JoinStats::default(),
        }
    }

    /// Insert one finalized aggregate; returns the joined record if this
    /// completes its key
    ///
    /// The aggregator emits at most one aggregate per (stream, key), so a
    /// duplicate side is an upstream contract violation: the latest value
    /// wins and a warning is logged, never corrupting other slots.
    pub fn add(&mut self, aggregate: FinalizedAggregate, now: Instant) -> Option<BridgeMetrics> {
        let slot = self
            .slots
            .entry(aggregate.key.clone())
            .or_insert_with(|| JoinSlot::new(now));

        let cell = &mut slot.values[aggregate.kind.index()];
        if cell.is_some() {
            warn!(
                stream = %aggregate.kind,
                window = %aggregate.key,
                "Duplicate finalized aggregate; keeping latest value"
            );
            self.stats.duplicates_replaced += 1;
        }
        *cell = Some(aggregate.value);
        if aggregate.info.is_some() {
            slot.info = aggregate.info;
        }

        if !slot.is_complete() {
            return None;
        }

        let key = aggregate.key;
        let slot = self.slots.remove(&key)?;
        self.stats.records_completed += 1;
        let (name, location) = match slot.info {
            Some(info) => (Some(info.name), Some(info.location)),
            None => (None, None),
        };
        Some(BridgeMetrics {
            bridge_id: key.bridge_id,
            name,
            location,
            window_start: key.window_start,
            window_end: key.window_end,
            avg_temperature: slot.values[StreamKind::Temperature.index()].unwrap_or_default(),
            max_vibration: slot.values[StreamKind::Vibration.index()].unwrap_or_default(),
            max_tilt_angle: slot.values[StreamKind::Tilt.index()].unwrap_or_default(),
        })
    }

    /// Drop slots older than the grace period that never completed
    pub fn sweep(&mut self, now: Instant) -> Vec<ExpiredSlot> {
        let grace = self.grace_period;
        let mut expired = Vec::new();
        self.slots.retain(|key, slot| {
            let age = now.saturating_duration_since(slot.first_seen_at);
            if age < grace {
                return true;
            }
            expired.push(ExpiredSlot {
                key: key.clone(),
                missing: slot.missing(),
                age,
            });
            false
        });
        self.stats.slots_expired += expired.len() as u64;
        expired
    }

    /// Number of incomplete slots currently buffered
    pub fn open_slots(&self) -> usize {
        self.slots.len()
    }

    /// Completion, duplicate, and expiry counters
    pub fn stats(&self) -> JoinStats {
        self.stats
    }
}
