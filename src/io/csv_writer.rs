use csv_async::AsyncSerializer;
use futures::io::AsyncWrite;
use tokio::io::AsyncWrite as TokioAsyncWrite;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use super::error::IoError;
use crate::domain::BridgeMetrics;
use crate::streaming::MetricsSink;

/// Metrics sink that serializes joined records as CSV
///
/// The header row is written with the first record; an empty run
/// produces an empty output.
pub struct CsvMetricsWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    inner: AsyncSerializer<W>,
}

impl<W> CsvMetricsWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Create a CSV writer over a futures-io writer
    pub fn new(writer: W) -> Self {
        Self {
            inner: AsyncSerializer::from_writer(writer),
        }
    }
}

impl<W> CsvMetricsWriter<Compat<W>>
where
    W: TokioAsyncWrite + Unpin + Send,
{
    /// Create a CSV writer over a tokio writer (stdout, files)
    pub fn from_tokio(writer: W) -> Self {
        Self::new(writer.compat_write())
    }
}

#[async_trait::async_trait]
impl<W> MetricsSink for CsvMetricsWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&mut self, record: &BridgeMetrics) -> Result<(), IoError> {
        self.inner.serialize(record).await?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), IoError> {
        self.inner.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use futures::io::Cursor;

    fn record(bridge: &str, avg: f64) -> BridgeMetrics {
        BridgeMetrics {
            bridge_id: bridge.to_string(),
            name: Some("Golden Gate".to_string()),
            location: Some("San Francisco".to_string()),
            window_start: Timestamp::from_millis(0),
            window_end: Timestamp::from_millis(600_000),
            avg_temperature: avg,
            max_vibration: 0.4,
            max_tilt_angle: 1.2,
        }
    }

    #[tokio::test]
    async fn writes_header_and_rows() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = CsvMetricsWriter::new(&mut buffer);
            writer.emit(&record("BR-001", 22.0)).await.unwrap();
            writer.emit(&record("BR-002", 19.5)).await.unwrap();
            writer.flush().await.unwrap();
        }

        let output = String::from_utf8(buffer.into_inner()).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "bridge_id,name,location,window_start,window_end,avg_temperature,max_vibration,max_tilt_angle"
        );
        assert_eq!(
            lines.next().unwrap(),
            "BR-001,Golden Gate,San Francisco,1970-01-01T00:00:00Z,1970-01-01T00:10:00Z,22.0,0.4,1.2"
        );
        assert!(lines.next().unwrap().starts_with("BR-002,"));
    }

    #[tokio::test]
    async fn empty_run_writes_nothing() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = CsvMetricsWriter::new(&mut buffer);
            writer.flush().await.unwrap();
        }
        assert!(buffer.into_inner().is_empty());
    }
}
