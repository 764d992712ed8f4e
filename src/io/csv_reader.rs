use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::{Stream, StreamExt};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;

use super::error::IoError;
use super::parse::RawSensorRow;
use crate::domain::{SensorEvent, StreamKind};

/// Async stream of sensor events from one per-stream CSV export
///
/// Each of the three input files carries exactly one stream kind; rows
/// that fail to parse yield `Err` items and the stream continues.
pub struct CsvEventStream {
    inner: Pin<Box<dyn Stream<Item = Result<SensorEvent, IoError>> + Send>>,
}

impl CsvEventStream {
    /// Create an event stream for `kind` from an async reader
    pub fn new<R>(kind: StreamKind, reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let csv_reader = AsyncReaderBuilder::new()
            .trim(csv_async::Trim::All)
            .flexible(true)
            .create_deserializer(reader);

        let stream = csv_reader.into_deserialize::<RawSensorRow>().map(move |result| {
            result.map_err(IoError::from).and_then(|raw| raw.parse(kind))
        });

        Self {
            inner: Box::pin(stream),
        }
    }

    /// Create an event stream for `kind` from a file path
    pub async fn from_file(kind: StreamKind, path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path.as_ref()).await?;
        Ok(Self::new(kind, file.compat()))
    }
}

impl Stream for CsvEventStream {
    type Item = Result<SensorEvent, IoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
