//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::replayer::{output_to_result, CassetteReplayer};
use crate::ports::filesystem::{FileSystem, LockGuard};

/// Replays recorded filesystem operations from a cassette.
///
/// Paths are not checked against the recording; calls are matched purely
/// by order within each method.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next(&self, method: &str) -> serde_json::Value {
        self.replayer.lock().expect("replayer lock poisoned").next_output("fs", method)
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        output_to_result(&self.next("read_to_string"), "fs::read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        output_to_result(&self.next("write"), "fs::write")
    }

    fn append(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        output_to_result(&self.next("append"), "fs::append")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next("exists").as_bool().expect("fs::exists: expected boolean output")
    }

    fn lock(&self, _path: &Path) -> Result<LockGuard, Box<dyn std::error::Error + Send + Sync>> {
        output_to_result::<()>(&self.next("lock"), "fs::lock")?;
        Ok(LockGuard::released())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn replayer(entries: &[(&str, serde_json::Value)]) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions: entries
                .iter()
                .enumerate()
                .map(|(seq, (method, output))| Interaction {
                    seq: seq as u64,
                    port: "fs".into(),
                    method: (*method).into(),
                    input: json!({}),
                    output: output.clone(),
                })
                .collect(),
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_reads_writes_and_exists() {
        let fs = ReplayingFileSystem::new(replayer(&[
            ("exists", json!(true)),
            ("read_to_string", json!({"ok": "isrc: {}"})),
            ("write", json!({"ok": null})),
            ("write", json!({"err": "disk full"})),
            ("lock", json!({"ok": null})),
            ("append", json!({"ok": null})),
        ]));

        assert!(fs.exists(Path::new("/any")));
        assert_eq!(fs.read_to_string(Path::new("/any")).unwrap(), "isrc: {}");
        assert!(fs.write(Path::new("/any"), "x").is_ok());
        assert_eq!(fs.write(Path::new("/any"), "x").unwrap_err().to_string(), "disk full");
        assert!(fs.lock(Path::new("/any/.lock")).is_ok());
        assert!(fs.append(Path::new("/any"), "x").is_ok());
    }
}
