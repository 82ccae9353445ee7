//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::adapters::fixed::{CyclingDigits, FixedClock, MemFileSystem};
use crate::adapters::live::{LiveClock, LiveDigitSource, LiveFileSystem};
use crate::adapters::recording::{RecordingClock, RecordingDigitSource, RecordingFileSystem};
use crate::adapters::replaying::{ReplayingClock, ReplayingDigitSource, ReplayingFileSystem};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::{Clock, DigitSource, FileSystem, LockGuard};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying, fixed).
pub struct ServiceContext {
    /// Clock for issuance timestamps and default year digits.
    pub clock: Box<dyn Clock>,
    /// Filesystem backing the settings store.
    pub fs: Box<dyn FileSystem>,
    /// Source of the UPC filler digit.
    pub digits: Box<dyn DigitSource>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            digits: Box::new(LiveDigitSource::new()),
        }
    }

    /// Creates a live context whose interactions are captured by `session`.
    ///
    /// Drop the context before calling `RecordingSession::finish`.
    #[must_use]
    pub fn recording(session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&session.fs),
            )),
            digits: Box::new(RecordingDigitSource::new(
                Box::new(LiveDigitSource::new()),
                Arc::clone(&session.digits),
            )),
        }
    }

    /// Creates a deterministic in-memory context: a frozen clock, an empty
    /// in-memory filesystem and digits cycling through `digits`.
    #[must_use]
    pub fn fixed(now: DateTime<Utc>, digits: Vec<u8>) -> Self {
        Self {
            clock: Box::new(FixedClock(now)),
            fs: Box::new(MemFileSystem::new()),
            digits: Box::new(CyclingDigits::new(digits)),
        }
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            digits: match replayers.digits {
                Some(r) => Box::new(ReplayingDigitSource::new(r)),
                None => Box::new(PanickingDigitSource),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> DateTime<Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn append(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn lock(&self, _path: &Path) -> Result<LockGuard, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingDigitSource;
impl DigitSource for PanickingDigitSource {
    fn next_digit(&self) -> u8 {
        panic!("DigitSource port not configured in CassetteConfig: no cassette loaded for digits");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::TimeZone;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn replaying_context_from_session_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_cassette(
            &dir.path().join("clock.cassette.yaml"),
            vec![Interaction {
                seq: 0,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!("2024-06-15T10:30:00Z"),
            }],
        );
        write_cassette(
            &dir.path().join("digits.cassette.yaml"),
            vec![Interaction {
                seq: 0,
                port: "digits".into(),
                method: "next_digit".into(),
                input: json!({}),
                output: json!(6),
            }],
        );

        let config = CassetteConfig::from_session_dir(dir.path());
        assert!(config.fs.is_none());
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        assert_eq!(ctx.clock.now().to_rfc3339(), "2024-06-15T10:30:00+00:00");
        assert_eq!(ctx.digits.next_digit(), 6);
    }

    #[test]
    fn fixed_context_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap();
        let ctx = ServiceContext::fixed(now, vec![1, 2]);

        assert_eq!(ctx.clock.now(), now);
        assert_eq!(ctx.digits.next_digit(), 1);
        assert_eq!(ctx.digits.next_digit(), 2);
        assert!(!ctx.fs.exists(Path::new("/store")));
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified()).unwrap();
        let _ = ctx.digits.next_digit();
    }
}
