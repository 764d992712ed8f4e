use super::event::{Aggregation, BridgeInfo, SensorEvent, StreamKind};
use super::window::WindowKey;

/// Incremental per-window state for one (stream, bridge, window) bucket
///
/// Seeded from the first event of the bucket and mutated only until
/// finalization; `finish` consumes it, so a finalized accumulator can
/// never be updated again.
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    Average {
        sum: f64,
        count: u64,
        info: Option<BridgeInfo>,
    },
    Max {
        max: f64,
    },
}

impl Accumulator {
    /// Create an accumulator from the first event of a window
    pub fn seed(event: &SensorEvent) -> Self {
        match event.kind.aggregation() {
            Aggregation::Average => Accumulator::Average {
                sum: event.value,
                count: 1,
                info: event.info.clone(),
            },
            Aggregation::Max => Accumulator::Max { max: event.value },
        }
    }

    /// Fold another event into the accumulator
    pub fn update(&mut self, event: &SensorEvent) {
        match self {
            Accumulator::Average { sum, count, info } => {
                *sum += event.value;
                *count += 1;
                if info.is_none() {
                    *info = event.info.clone();
                }
            }
            Accumulator::Max { max } => {
                if event.value > *max {
                    *max = event.value;
                }
            }
        }
    }

    /// Close the accumulator and compute its final value
    ///
    /// Averages are rounded half-away-from-zero to `precision` decimal
    /// digits; max values are emitted unrounded.
    pub fn finish(self, precision: u32) -> (f64, Option<BridgeInfo>) {
        match self {
            Accumulator::Average { sum, count, info } => {
                // count >= 1: accumulators only exist after a first event
                (round_to(sum / count as f64, precision), info)
            }
            Accumulator::Max { max } => (max, None),
        }
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Immutable result of closing one window on one stream
///
/// Produced exactly once per (stream, window key) when that stream's
/// watermark passes the window's end.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedAggregate {
    pub kind: StreamKind,
    pub key: WindowKey,
    pub value: f64,
    pub info: Option<BridgeInfo>,
}
