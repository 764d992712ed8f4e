use async_trait::async_trait;

use crate::domain::BridgeMetrics;
use crate::io::IoError;

/// Destination for joined metrics records
#[async_trait]
pub trait MetricsSink: Send {
    /// Push one completed record
    async fn emit(&mut self, record: &BridgeMetrics) -> Result<(), IoError>;

    /// Flush any buffered output
    async fn flush(&mut self) -> Result<(), IoError>;
}

/// Collecting sink for tests, benches, and demos
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<BridgeMetrics>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted so far
    pub fn records(&self) -> &[BridgeMetrics] {
        &self.records
    }

    /// Consume the sink and take its records
    pub fn into_records(self) -> Vec<BridgeMetrics> {
        self.records
    }
}

#[async_trait]
impl MetricsSink for MemorySink {
    async fn emit(&mut self, record: &BridgeMetrics) -> Result<(), IoError> {
        self.records.push(record.clone());
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
