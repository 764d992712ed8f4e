use std::fmt;

use super::error::ValidationError;
use super::time::Timestamp;

/// The three independent sensor streams feeding the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Temperature,
    Vibration,
    Tilt,
}

/// How a stream's readings are reduced within a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Average,
    Max,
}

impl StreamKind {
    /// All stream kinds, in slot order
    pub const ALL: [StreamKind; 3] = [
        StreamKind::Temperature,
        StreamKind::Vibration,
        StreamKind::Tilt,
    ];

    /// Number of stream kinds
    pub const COUNT: usize = 3;

    /// Stable index into per-kind slot arrays
    pub fn index(self) -> usize {
        match self {
            StreamKind::Temperature => 0,
            StreamKind::Vibration => 1,
            StreamKind::Tilt => 2,
        }
    }

    /// Name of the value column in this stream's CSV schema
    pub fn value_column(self) -> &'static str {
        match self {
            StreamKind::Temperature => "temperature",
            StreamKind::Vibration => "vibration",
            StreamKind::Tilt => "tilt_angle",
        }
    }

    /// The reduction applied to this stream's readings within a window
    pub fn aggregation(self) -> Aggregation {
        match self {
            StreamKind::Temperature => Aggregation::Average,
            StreamKind::Vibration | StreamKind::Tilt => Aggregation::Max,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Temperature => "temperature",
            StreamKind::Vibration => "vibration",
            StreamKind::Tilt => "tilt",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive bridge fields carried only by the temperature stream
///
/// Passed through unchanged from input to the joined output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeInfo {
    pub name: String,
    pub location: String,
}

/// A single sensor reading, immutable once received
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    pub bridge_id: String,
    pub kind: StreamKind,
    pub event_time: Timestamp,
    pub value: f64,
    pub info: Option<BridgeInfo>,
}

impl SensorEvent {
    /// Create an event without passthrough info (vibration and tilt streams)
    pub fn new(bridge_id: impl Into<String>, kind: StreamKind, event_time: Timestamp, value: f64) -> Self {
        Self {
            bridge_id: bridge_id.into(),
            kind,
            event_time,
            value,
            info: None,
        }
    }

    /// Attach bridge name/location passthrough fields
    pub fn with_info(mut self, name: impl Into<String>, location: impl Into<String>) -> Self {
        self.info = Some(BridgeInfo {
            name: name.into(),
            location: location.into(),
        });
        self
    }

    /// Reject events that cannot be aggregated
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bridge_id.trim().is_empty() {
            return Err(ValidationError::BlankBridgeId);
        }
        if !self.value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                kind: self.kind,
                value: self.value,
            });
        }
        Ok(())
    }
}
