use serde::Serialize;

use super::time::Timestamp;

/// One consolidated output row: all three streams joined for a single
/// (bridge, window) key
///
/// Column order matches the downstream metrics table schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeMetrics {
    pub bridge_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub window_start: Timestamp,
    pub window_end: Timestamp,
    pub avg_temperature: f64,
    pub max_vibration: f64,
    pub max_tilt_angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BridgeMetrics {
        BridgeMetrics {
            bridge_id: "BR-001".to_string(),
            name: Some("Golden Gate".to_string()),
            location: Some("San Francisco".to_string()),
            window_start: Timestamp::from_millis(0),
            window_end: Timestamp::from_millis(600_000),
            avg_temperature: 22.0,
            max_vibration: 0.4,
            max_tilt_angle: 1.2,
        }
    }

    #[test]
    fn serializes_with_expected_columns() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(sample()).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "bridge_id,name,location,window_start,window_end,avg_temperature,max_vibration,max_tilt_angle"
        );
        assert_eq!(
            lines.next().unwrap(),
            "BR-001,Golden Gate,San Francisco,1970-01-01T00:00:00Z,1970-01-01T00:10:00Z,22.0,0.4,1.2"
        );
    }

    #[test]
    fn missing_info_serializes_as_empty_fields() {
        let mut record = sample();
        record.name = None;
        record.location = None;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(record).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert!(output.lines().nth(1).unwrap().starts_with("BR-001,,,"));
    }
}
