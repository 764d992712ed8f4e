use std::time::Duration;

use super::error::ConfigError;

/// Tuning knobs for the windowing and join pipeline
///
/// Defaults match the reference deployment: 10-minute tumbling windows,
/// 2 minutes of allowed lateness per stream, and a join grace period of
/// twice the lateness.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fixed tumbling window size
    pub window_size: Duration,
    /// How far a stream's watermark lags its max observed event time
    pub allowed_lateness: Duration,
    /// How long an incomplete join slot may wait before being swept;
    /// None means 2x allowed_lateness
    pub join_grace_period: Option<Duration>,
    /// Decimal digits for the averaged value (max values stay unrounded)
    pub rounding_precision: u32,
    /// How often the join task sweeps for expired slots; None means half
    /// the grace period
    pub sweep_interval: Option<Duration>,
    /// Capacity of the finalized-aggregate channel between workers and
    /// the join task
    pub channel_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: Duration::from_secs(600),
            allowed_lateness: Duration::from_secs(120),
            join_grace_period: None,
            rounding_precision: 2,
            sweep_interval: None,
            channel_capacity: 1024,
        }
    }
}

impl PipelineConfig {
    pub fn with_window_size(mut self, window_size: Duration) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_allowed_lateness(mut self, allowed_lateness: Duration) -> Self {
        self.allowed_lateness = allowed_lateness;
        self
    }

    pub fn with_join_grace_period(mut self, grace: Duration) -> Self {
        self.join_grace_period = Some(grace);
        self
    }

    pub fn with_rounding_precision(mut self, digits: u32) -> Self {
        self.rounding_precision = digits;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Effective grace period for incomplete join slots
    pub fn grace_period(&self) -> Duration {
        self.join_grace_period.unwrap_or(self.allowed_lateness * 2)
    }

    /// Effective sweep interval for the join task
    pub fn sweep_every(&self) -> Duration {
        self.sweep_interval.unwrap_or(self.grace_period() / 2)
    }

    /// Check the configuration is internally consistent
    ///
    /// Zero allowed lateness is fine on its own, but then an explicit
    /// join grace period must be set or every slot would expire on the
    /// first sweep.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size.is_zero() {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.grace_period().is_zero() {
            return Err(ConfigError::ZeroGracePeriod);
        }
        if self.sweep_every().is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if self.rounding_precision > 12 {
            return Err(ConfigError::PrecisionTooLarge(self.rounding_precision));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }
}
