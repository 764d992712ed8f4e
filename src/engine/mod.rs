pub mod aggregator;
pub mod watermark;

// Re-export commonly used types
pub use aggregator::{AggregatorStats, WindowAggregator};
pub use watermark::WatermarkTracker;
