//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output =
            self.replayer.lock().expect("replayer lock poisoned").next_output("clock", "now");
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    #[test]
    fn serves_recorded_times_in_order() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: ["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z"]
                .iter()
                .enumerate()
                .map(|(seq, ts)| Interaction {
                    seq: seq as u64,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!({}),
                    output: json!(ts),
                })
                .collect(),
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));

        assert_eq!(clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-01-01T00:01:00+00:00");
    }
}
