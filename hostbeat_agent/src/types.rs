//! Data types published to the broker.
//! Keep this module minimal and stable — it defines the wire format.

use serde::{Deserialize, Serialize};

/// One point-in-time measurement of host resource usage.
///
/// Built fresh on every tick and discarded after the publish attempt.
/// Percentage fields are best-effort `[0, 100]`; a failed reading is
/// reported as `0.0` (or an empty string for `host`/`time`) rather than
/// an error, so a consumer cannot tell a degraded field from a true zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sample {
    pub cpu: f64,
    pub mem: f64,
    pub disk: f64,
    pub host: String,
    /// RFC 3339 capture time, UTC, second precision.
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_preserves_fields() {
        let sample = Sample {
            cpu: 12.5,
            mem: 40.1,
            disk: 55.0,
            host: "node1".into(),
            time: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn wire_object_has_exactly_the_expected_keys() {
        let sample = Sample {
            cpu: 0.0,
            mem: 0.0,
            disk: 0.0,
            host: String::new(),
            time: String::new(),
        };
        let value: serde_json::Value = serde_json::to_value(&sample).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["cpu", "disk", "host", "mem", "time"]);
        assert!(obj["cpu"].is_number());
        assert!(obj["host"].is_string());
    }
}
