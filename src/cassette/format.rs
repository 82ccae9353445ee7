//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`clock`, `fs` or `digits`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Crate version that produced the recording.
    pub version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_fallible_outputs_tagged() {
        let cassette = Cassette {
            name: "issuance".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "fs".into(),
                    method: "read_to_string".into(),
                    input: json!({"path": "/store/settings.yaml"}),
                    output: json!({"err": "not found"}),
                },
                Interaction {
                    seq: 1,
                    port: "digits".into(),
                    method: "next_digit".into(),
                    input: json!({}),
                    output: json!(4),
                },
            ],
        };
        let yaml = serde_yaml::to_string(&cassette).expect("serialize");
        assert!(yaml.contains("err: not found"));

        let parsed: Cassette = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(parsed, cassette);
    }
}
