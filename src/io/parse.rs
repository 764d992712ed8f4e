use serde::Deserialize;

use super::error::IoError;
use crate::domain::{SensorEvent, StreamKind, Timestamp};

/// Raw CSV row as read from one of the three sensor table exports
///
/// The three schemas share bridge_id and event_time; the value column
/// differs per stream and name/location exist only in the temperature
/// export. Deserializing with every column optional lets one row type
/// cover all three files.
#[derive(Debug, Deserialize)]
pub struct RawSensorRow {
    pub bridge_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub event_time: String,
    #[serde(default)]
    pub temperature: Option<String>,
    #[serde(default)]
    pub vibration: Option<String>,
    #[serde(default)]
    pub tilt_angle: Option<String>,
}

impl RawSensorRow {
    /// Parse this raw row into a typed event for the given stream
    pub fn parse(self, kind: StreamKind) -> Result<SensorEvent, IoError> {
        let raw_value = match kind {
            StreamKind::Temperature => self.temperature,
            StreamKind::Vibration => self.vibration,
            StreamKind::Tilt => self.tilt_angle,
        }
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| IoError::MissingField(kind.value_column().to_string()))?;

        let value: f64 = raw_value
            .trim()
            .parse()
            .map_err(|_| IoError::InvalidValue(raw_value))?;
        let event_time = Timestamp::parse_rfc3339(&self.event_time)?;

        let mut event = SensorEvent::new(self.bridge_id, kind, event_time, value);
        if kind == StreamKind::Temperature
            && let (Some(name), Some(location)) = (self.name, self.location)
        {
            event = event.with_info(name, location);
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: StreamKind, value: &str) -> RawSensorRow {
        RawSensorRow {
            bridge_id: "BR-001".to_string(),
            name: Some("Golden Gate".to_string()),
            location: Some("San Francisco".to_string()),
            event_time: "2024-03-01T10:00:00Z".to_string(),
            temperature: (kind == StreamKind::Temperature).then(|| value.to_string()),
            vibration: (kind == StreamKind::Vibration).then(|| value.to_string()),
            tilt_angle: (kind == StreamKind::Tilt).then(|| value.to_string()),
        }
    }

    #[test]
    fn parse_temperature_row_with_info() {
        let event = row(StreamKind::Temperature, "21.5")
            .parse(StreamKind::Temperature)
            .unwrap();
        assert_eq!(event.bridge_id, "BR-001");
        assert_eq!(event.value, 21.5);
        assert_eq!(event.kind, StreamKind::Temperature);
        assert_eq!(event.info.unwrap().location, "San Francisco");
    }

    #[test]
    fn parse_vibration_row_has_no_info() {
        let event = row(StreamKind::Vibration, "0.4")
            .parse(StreamKind::Vibration)
            .unwrap();
        assert_eq!(event.value, 0.4);
        assert!(event.info.is_none());
    }

    #[test]
    fn parse_tilt_row() {
        let event = row(StreamKind::Tilt, "1.2").parse(StreamKind::Tilt).unwrap();
        assert_eq!(event.value, 1.2);
        assert_eq!(event.kind, StreamKind::Tilt);
    }

    #[test]
    fn missing_value_column_rejected() {
        let result = row(StreamKind::Vibration, "0.4").parse(StreamKind::Temperature);
        assert!(matches!(result, Err(IoError::MissingField(f)) if f == "temperature"));
    }

    #[test]
    fn empty_value_rejected_as_missing() {
        let result = row(StreamKind::Tilt, "  ").parse(StreamKind::Tilt);
        assert!(matches!(result, Err(IoError::MissingField(_))));
    }

    #[test]
    fn non_numeric_value_rejected() {
        let result = row(StreamKind::Temperature, "warm").parse(StreamKind::Temperature);
        assert!(matches!(result, Err(IoError::InvalidValue(v)) if v == "warm"));
    }

    #[test]
    fn bad_timestamp_rejected() {
        let mut raw = row(StreamKind::Tilt, "1.2");
        raw.event_time = "yesterday".to_string();
        assert!(matches!(
            raw.parse(StreamKind::Tilt),
            Err(IoError::Validation(_))
        ));
    }

    #[test]
    fn temperature_without_info_columns_parses() {
        let mut raw = row(StreamKind::Temperature, "21.0");
        raw.name = None;
        raw.location = None;
        let event = raw.parse(StreamKind::Temperature).unwrap();
        assert!(event.info.is_none());
    }
}
