//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Return the output of the next interaction for the given port and
    /// method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination. Replay is only meaningful when the code
    /// under test makes exactly the recorded calls.
    pub fn next_output(&mut self, port: &str, method: &str) -> serde_json::Value {
        let key = PortMethodKey {
            port: port.to_string(),
            method: method.to_string(),
        };

        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        match queue.pop_front() {
            Some(interaction) => interaction.output,
            None => panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed."
            ),
        }
    }
}

/// Extracts a `Result` from a fallible cassette output.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
pub(crate) fn output_to_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value)
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input: json!({}),
            output,
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions,
        }
    }

    #[test]
    fn streams_are_independent_per_port_method() {
        let cassette = make_cassette(vec![
            interaction(0, "digits", "next_digit", json!(3)),
            interaction(1, "clock", "now", json!("2024-01-01T00:00:00Z")),
            interaction(2, "digits", "next_digit", json!(8)),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_output("digits", "next_digit"), json!(3));
        assert_eq!(replayer.next_output("digits", "next_digit"), json!(8));
        assert_eq!(replayer.next_output("clock", "now"), json!("2024-01-01T00:00:00Z"));
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_stream_panics() {
        let cassette = make_cassette(vec![interaction(0, "digits", "next_digit", json!(1))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_output("digits", "next_digit");
        let _ = replayer.next_output("digits", "next_digit");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_output("clock", "now");
    }

    #[test]
    fn fallible_outputs_map_to_results() {
        let ok: Result<String, _> = output_to_result(&json!({"ok": "text"}), "t");
        assert_eq!(ok.unwrap(), "text");

        let unit: Result<(), _> = output_to_result(&json!({"ok": null}), "t");
        assert!(unit.is_ok());

        let err: Result<String, _> = output_to_result(&json!({"err": "denied"}), "t");
        assert_eq!(err.unwrap_err().to_string(), "denied");
    }
}
