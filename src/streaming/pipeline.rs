use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::config::PipelineConfig;
use super::error::{ErrorPolicy, PipelineError};
use super::sink::MetricsSink;
use crate::domain::{FinalizedAggregate, SensorEvent, StreamKind};
use crate::engine::{AggregatorStats, WindowAggregator};
use crate::io::IoError;
use crate::join::{JoinBuffer, JoinStats};

/// Type alias for a boxed sensor event stream
pub type EventStream = Pin<Box<dyn Stream<Item = Result<SensorEvent, IoError>> + Send>>;

/// Per-worker outcome of one pipeline run
#[derive(Debug)]
pub struct WorkerReport {
    pub kind: StreamKind,
    pub stats: AggregatorStats,
    pub io_errors: u64,
    pub validation_errors: u64,
}

/// Outcome of one pipeline run
#[derive(Debug)]
pub struct PipelineSummary {
    pub workers: Vec<WorkerReport>,
    pub records_emitted: u64,
    pub join: JoinStats,
    /// Join slots still open when the run ended; discarded, never emitted
    pub slots_discarded: u64,
    pub cancelled: bool,
}

/// The full windowing and join dataflow
///
/// One worker task per stream kind exclusively owns that stream's
/// watermark tracker and accumulators; finalized aggregates flow over a
/// bounded channel into a single join task that owns the join buffer and
/// the sink. Message passing is the only cross-stream coupling, so no
/// state is ever locked.
pub struct Pipeline<P>
where
    P: ErrorPolicy + 'static,
{
    config: PipelineConfig,
    error_policy: Arc<P>,
    streams: [Option<EventStream>; StreamKind::COUNT],
    cancel: CancellationToken,
}

impl<P> Pipeline<P>
where
    P: ErrorPolicy + 'static,
{
    /// Create a pipeline with the given configuration and error policy
    pub fn new(config: PipelineConfig, error_policy: P) -> Self {
        Self {
            config,
            error_policy: Arc::new(error_policy),
            streams: [None, None, None],
            cancel: CancellationToken::new(),
        }
    }

    /// Attach the event source for one stream kind
    pub fn with_stream<S>(mut self, kind: StreamKind, stream: S) -> Self
    where
        S: Stream<Item = Result<SensorEvent, IoError>> + Send + 'static,
    {
        self.streams[kind.index()] = Some(Box::pin(stream));
        self
    }

    /// Token that cancels the whole pipeline between events
    ///
    /// On cancellation, open accumulators and incomplete join slots are
    /// discarded; no partial-window output is ever emitted.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Consume all three streams to exhaustion and emit joined records
    ///
    /// Requires all three streams attached. Returns once every stream is
    /// drained (or the pipeline is cancelled) and the sink is flushed.
    pub async fn run<K>(mut self, sink: &mut K) -> Result<PipelineSummary, PipelineError>
    where
        K: MetricsSink,
    {
        self.config.validate()?;
        for kind in StreamKind::ALL {
            if self.streams[kind.index()].is_none() {
                return Err(PipelineError::MissingStream(kind));
            }
        }

        let (tx, rx) = mpsc::channel::<FinalizedAggregate>(self.config.channel_capacity);

        let mut handles = Vec::with_capacity(StreamKind::COUNT);
        for kind in StreamKind::ALL {
            let stream = self.streams[kind.index()]
                .take()
                .ok_or(PipelineError::MissingStream(kind))?;
            let aggregator = WindowAggregator::new(kind, &self.config);
            let worker = StreamWorker {
                kind,
                aggregator,
                policy: Arc::clone(&self.error_policy),
                cancel: self.cancel.clone(),
            };
            handles.push(tokio::spawn(worker.run(stream, tx.clone())));
        }
        // Workers hold the only senders; the channel closes when the
        // last one finishes.
        drop(tx);

        let join_outcome = self.run_join(rx, sink).await;

        let mut workers = Vec::with_capacity(handles.len());
        for handle in handles {
            workers.push(handle.await?);
        }
        let (records_emitted, join, slots_discarded) = join_outcome?;

        let summary = PipelineSummary {
            workers,
            records_emitted,
            join,
            slots_discarded,
            cancelled: self.cancel.is_cancelled(),
        };
        info!(
            records_emitted = summary.records_emitted,
            slots_discarded = summary.slots_discarded,
            cancelled = summary.cancelled,
            "Pipeline run finished"
        );
        Ok(summary)
    }

    /// Join task: single owner of the join buffer and the sink
    async fn run_join<K>(
        &self,
        mut rx: mpsc::Receiver<FinalizedAggregate>,
        sink: &mut K,
    ) -> Result<(u64, JoinStats, u64), PipelineError>
    where
        K: MetricsSink,
    {
        let mut buffer = JoinBuffer::new(self.config.grace_period());
        let mut records_emitted = 0u64;
        let mut sweep_tick = tokio::time::interval(self.config.sweep_every());
        sweep_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe = rx.recv() => match maybe {
                    Some(aggregate) => {
                        if let Some(record) = buffer.add(aggregate, Instant::now()) {
                            debug!(bridge_id = %record.bridge_id, "Emitting joined record");
                            if let Err(error) = sink.emit(&record).await {
                                self.cancel.cancel();
                                return Err(PipelineError::Sink(error));
                            }
                            records_emitted += 1;
                        }
                    }
                    None => break,
                },
                _ = sweep_tick.tick() => {
                    log_expired(buffer.sweep(Instant::now()));
                }
                _ = self.cancel.cancelled() => break,
            }
        }

        let slots_discarded = buffer.open_slots() as u64;
        sink.flush().await.map_err(PipelineError::Sink)?;
        Ok((records_emitted, buffer.stats(), slots_discarded))
    }
}

fn log_expired(expired: Vec<crate::join::ExpiredSlot>) {
    for slot in expired {
        warn!(
            window = %slot.key,
            missing = ?slot.missing,
            age_secs = slot.age.as_secs(),
            "Join slot timed out; dropping partial window"
        );
    }
}

/// One stream's worker: exclusive owner of its aggregator state
struct StreamWorker<P>
where
    P: ErrorPolicy,
{
    kind: StreamKind,
    aggregator: WindowAggregator,
    policy: Arc<P>,
    cancel: CancellationToken,
}

impl<P> StreamWorker<P>
where
    P: ErrorPolicy,
{
    async fn run(
        mut self,
        mut stream: EventStream,
        tx: mpsc::Sender<FinalizedAggregate>,
    ) -> WorkerReport {
        let mut io_errors = 0u64;
        let mut validation_errors = 0u64;

        loop {
            let item = tokio::select! {
                item = stream.next() => item,
                _ = self.cancel.cancelled() => break,
            };
            match item {
                Some(Ok(event)) => {
                    if let Err(error) = self.aggregator.ingest(event) {
                        validation_errors += 1;
                        if !self.policy.handle_validation_error(error) {
                            self.cancel.cancel();
                            break;
                        }
                        continue;
                    }
                    let mut closed = false;
                    for aggregate in self.aggregator.poll_finalized() {
                        if tx.send(aggregate).await.is_err() {
                            // Join task gone; nothing left to finalize for
                            closed = true;
                            break;
                        }
                    }
                    if closed {
                        break;
                    }
                }
                Some(Err(error)) => {
                    io_errors += 1;
                    if !self.policy.handle_io_error(error) {
                        self.cancel.cancel();
                        break;
                    }
                }
                None => break,
            }
        }

        debug!(
            stream = %self.kind,
            open_windows = self.aggregator.open_windows(),
            "Worker finished; discarding open accumulators"
        );
        WorkerReport {
            kind: self.kind,
            stats: self.aggregator.stats(),
            io_errors,
            validation_errors,
        }
    }
}
