use std::fmt;
use std::time::Duration;

use super::time::Timestamp;

/// Compute the tumbling window containing `event_time`
///
/// Pure function: the same event time always maps to the same half-open
/// interval `[start, end)` for a fixed window size. Uses euclidean
/// division so pre-epoch event times still land in the correct bucket.
pub fn window_bounds(event_time: Timestamp, window_size: Duration) -> (Timestamp, Timestamp) {
    let size = window_size.as_millis() as i64;
    let start = event_time.millis().div_euclid(size) * size;
    (Timestamp::from_millis(start), Timestamp::from_millis(start + size))
}

/// Identity of one (bridge, window) bucket
///
/// Ordered by window start first so a sorted map of open windows can be
/// finalized from the front as the watermark advances.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowKey {
    pub window_start: Timestamp,
    pub window_end: Timestamp,
    pub bridge_id: String,
}

impl WindowKey {
    /// Assign an event to its tumbling window bucket
    pub fn for_event(bridge_id: &str, event_time: Timestamp, window_size: Duration) -> Self {
        let (window_start, window_end) = window_bounds(event_time, window_size);
        Self {
            window_start,
            window_end,
            bridge_id: bridge_id.to_string(),
        }
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@[{}, {})",
            self.bridge_id, self.window_start, self.window_end
        )
    }
}
