use thiserror::Error;

use super::event::StreamKind;

/// Validation errors for malformed sensor events
///
/// Each variant rejects a single event; no accumulator or window state
/// is touched when validation fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Bridge id is blank")]
    BlankBridgeId,

    #[error("Non-finite {kind} reading: {value}")]
    NonFiniteValue { kind: StreamKind, value: f64 },

    #[error("Event for {actual} stream routed to {expected} aggregator")]
    StreamMismatch {
        expected: StreamKind,
        actual: StreamKind,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            ValidationError::BlankBridgeId.to_string(),
            "Bridge id is blank"
        );
        assert_eq!(
            ValidationError::NonFiniteValue {
                kind: StreamKind::Vibration,
                value: f64::NAN,
            }
            .to_string(),
            "Non-finite vibration reading: NaN"
        );
        assert_eq!(
            ValidationError::StreamMismatch {
                expected: StreamKind::Temperature,
                actual: StreamKind::Tilt,
            }
            .to_string(),
            "Event for tilt stream routed to temperature aggregator"
        );
        assert_eq!(
            ValidationError::InvalidTimestamp("xyz".to_string()).to_string(),
            "Invalid timestamp: xyz"
        );
    }

    #[test]
    fn error_is_cloneable() {
        let err = ValidationError::BlankBridgeId;
        assert_eq!(err.clone(), err);
    }
}
