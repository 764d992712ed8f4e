pub mod config;
pub mod error;
pub mod pipeline;
pub mod sink;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{AbortOnError, ConfigError, ErrorPolicy, PipelineError, SilentSkip, SkipErrors};
pub use pipeline::{EventStream, Pipeline, PipelineSummary, WorkerReport};
pub use sink::{MemorySink, MetricsSink};
