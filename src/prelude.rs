//! Prelude module for convenient imports
//!
//! Import everything you need with: `use bridgeflow::prelude::*;`

// Domain types
pub use crate::domain::{
    Accumulator, BridgeInfo, BridgeMetrics, FinalizedAggregate, SensorEvent, StreamKind,
    Timestamp, ValidationError, WindowKey,
};

// Engine types
pub use crate::engine::{AggregatorStats, WatermarkTracker, WindowAggregator};

// Join types
pub use crate::join::{ExpiredSlot, JoinBuffer, JoinStats};

// IO types
pub use crate::io::{CsvEventStream, CsvMetricsWriter, IoError, RawSensorRow};

// Streaming types
pub use crate::streaming::{
    AbortOnError, ConfigError, ErrorPolicy, MemorySink, MetricsSink, Pipeline, PipelineConfig,
    PipelineError, PipelineSummary, SilentSkip, SkipErrors, WorkerReport,
};

// App types
pub use crate::app::{AppError, CliApp};
