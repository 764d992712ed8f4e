pub mod aggregate;
pub mod error;
pub mod event;
pub mod record;
pub mod time;
pub mod window;

// Re-export commonly used types
pub use aggregate::{Accumulator, FinalizedAggregate};
pub use error::ValidationError;
pub use event::{Aggregation, BridgeInfo, SensorEvent, StreamKind};
pub use record::BridgeMetrics;
pub use time::Timestamp;
pub use window::{WindowKey, window_bounds};
