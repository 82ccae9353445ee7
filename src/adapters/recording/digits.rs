//! Recording adapter for the `DigitSource` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::DigitSource;

/// Records drawn digits while delegating to an inner source.
pub struct RecordingDigitSource {
    inner: Box<dyn DigitSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDigitSource {
    /// Creates a new recording digit source wrapping the given implementation.
    pub fn new(inner: Box<dyn DigitSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl DigitSource for RecordingDigitSource {
    fn next_digit(&self) -> u8 {
        let digit = self.inner.next_digit();
        record_interaction(&self.recorder, "digits", "next_digit", &(), &digit);
        digit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed::CyclingDigits;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_each_drawn_digit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digits.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "digits")));

        {
            let source = RecordingDigitSource::new(
                Box::new(CyclingDigits::new(vec![4, 9])),
                Arc::clone(&recorder),
            );
            assert_eq!(source.next_digit(), 4);
            assert_eq!(source.next_digit(), 9);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let outputs: Vec<_> = cassette.interactions.iter().map(|i| i.output.clone()).collect();
        assert_eq!(outputs, vec![serde_json::json!(4), serde_json::json!(9)]);
        assert!(cassette.interactions.iter().all(|i| i.method == "next_digit"));
    }
}
