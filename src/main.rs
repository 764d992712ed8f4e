use bridgeflow::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr; the metrics CSV owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    CliApp::new("bridgeflow").run(run_pipeline).await
}

/// Parse and validate command-line arguments
fn parse_args(args: Vec<String>) -> Result<(String, String, String), AppError> {
    if args.len() != 4 {
        return Err(AppError::InvalidArguments(
            "Usage: bridgeflow <temperature.csv> <vibration.csv> <tilt.csv>".to_string(),
        ));
    }
    Ok((args[1].clone(), args[2].clone(), args[3].clone()))
}

/// Replay the three sensor CSV files through the pipeline and write the
/// joined metrics CSV to stdout
async fn run_pipeline(writer: tokio::io::BufWriter<tokio::io::Stdout>) -> Result<(), AppError> {
    let (temp_path, vib_path, tilt_path) = parse_args(std::env::args().collect())?;

    let temperature = CsvEventStream::from_file(StreamKind::Temperature, &temp_path).await?;
    let vibration = CsvEventStream::from_file(StreamKind::Vibration, &vib_path).await?;
    let tilt = CsvEventStream::from_file(StreamKind::Tilt, &tilt_path).await?;

    let mut sink = CsvMetricsWriter::from_tokio(writer);
    let summary = Pipeline::new(PipelineConfig::default(), SkipErrors)
        .with_stream(StreamKind::Temperature, temperature)
        .with_stream(StreamKind::Vibration, vibration)
        .with_stream(StreamKind::Tilt, tilt)
        .run(&mut sink)
        .await?;

    for worker in &summary.workers {
        info!(
            stream = %worker.kind,
            accepted = worker.stats.events_accepted,
            late_dropped = worker.stats.late_dropped,
            finalized = worker.stats.windows_finalized,
            "Stream summary"
        );
    }
    info!(
        records = summary.records_emitted,
        discarded = summary.slots_discarded,
        "Replay complete"
    );
    Ok(())
}
