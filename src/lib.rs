//! Watermarked tumbling-window aggregation over three bridge sensor
//! streams, joined into one consolidated metrics stream.
//!
//! Temperature, vibration, and tilt readings arrive independently and
//! out of order, keyed by bridge. Each stream is bucketed into fixed
//! 10-minute event-time windows and reduced incrementally (average for
//! temperature, max for the others); a per-stream watermark decides when
//! a window is complete. Finalized window aggregates flow into an
//! inner-join buffer that emits one [`domain::BridgeMetrics`] row per
//! (bridge, window) once all three streams have reported it.

pub mod app;
pub mod domain;
pub mod engine;
pub mod io;
pub mod join;
pub mod prelude;
pub mod streaming;
