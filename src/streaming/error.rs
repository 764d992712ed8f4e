use thiserror::Error;
use tracing::warn;

use crate::domain::{StreamKind, ValidationError};
use crate::io::IoError;

/// Invalid pipeline configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Window size must be non-zero")]
    ZeroWindowSize,

    #[error("Join grace period must be non-zero; set one explicitly when allowed lateness is zero")]
    ZeroGracePeriod,

    #[error("Sweep interval must be non-zero")]
    ZeroSweepInterval,

    #[error("Rounding precision {0} exceeds the supported maximum of 12")]
    PrecisionTooLarge(u32),

    #[error("Channel capacity must be non-zero")]
    ZeroChannelCapacity,
}

/// Failures that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No {0} stream attached")]
    MissingStream(StreamKind),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(IoError),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Policy for handling per-event errors during stream processing
///
/// Return true to continue processing, false to abort the pipeline.
pub trait ErrorPolicy: Send + Sync {
    /// Handle a source error (CSV parsing, reading)
    fn handle_io_error(&self, error: IoError) -> bool;

    /// Handle a rejected event (malformed fields)
    fn handle_validation_error(&self, error: ValidationError) -> bool;
}

/// Log each error and continue processing
pub struct SkipErrors;

impl ErrorPolicy for SkipErrors {
    fn handle_io_error(&self, error: IoError) -> bool {
        warn!(%error, "Source error (skipping)");
        true
    }

    fn handle_validation_error(&self, error: ValidationError) -> bool {
        warn!(%error, "Rejected event (skipping)");
        true
    }
}

/// Abort the pipeline on the first error
pub struct AbortOnError;

impl ErrorPolicy for AbortOnError {
    fn handle_io_error(&self, error: IoError) -> bool {
        warn!(%error, "Source error (aborting)");
        false
    }

    fn handle_validation_error(&self, error: ValidationError) -> bool {
        warn!(%error, "Rejected event (aborting)");
        false
    }
}

/// Skip errors without logging
pub struct SilentSkip;

impl ErrorPolicy for SilentSkip {
    fn handle_io_error(&self, _error: IoError) -> bool {
        true
    }

    fn handle_validation_error(&self, _error: ValidationError) -> bool {
        true
    }
}
