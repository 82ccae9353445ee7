//! Replaying adapter for the `DigitSource` port.

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::DigitSource;

/// Replays recorded digits from a cassette.
pub struct ReplayingDigitSource {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingDigitSource {
    /// Creates a new replaying digit source from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl DigitSource for ReplayingDigitSource {
    fn next_digit(&self) -> u8 {
        let output = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_output("digits", "next_digit");
        let digit = output.as_u64().expect("digits::next_digit: expected integer output");
        u8::try_from(digit % 10).expect("value below 10 fits in u8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn serves_recorded_digits() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "digits".into(),
                    method: "next_digit".into(),
                    input: json!({}),
                    output: json!(7),
                },
                Interaction {
                    seq: 1,
                    port: "digits".into(),
                    method: "next_digit".into(),
                    input: json!({}),
                    output: json!(0),
                },
            ],
        };
        let source = ReplayingDigitSource::new(CassetteReplayer::new(&cassette));
        assert_eq!(source.next_digit(), 7);
        assert_eq!(source.next_digit(), 0);
    }
}
