//! Deterministic adapters with canned values.
//!
//! Used by tests and by anyone embedding the issuer who needs exactly
//! reproducible output without going through a cassette.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::ports::{Clock, DigitSource, FileSystem, LockGuard};

/// Clock frozen at a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Digit source cycling through a fixed list of digits.
///
/// Values above 9 are reduced modulo 10. An empty list yields zeros.
pub struct CyclingDigits {
    digits: Vec<u8>,
    cursor: Mutex<usize>,
}

impl CyclingDigits {
    /// Creates a source that returns `digits` in order, wrapping around.
    #[must_use]
    pub fn new(digits: Vec<u8>) -> Self {
        Self {
            digits,
            cursor: Mutex::new(0),
        }
    }
}

impl DigitSource for CyclingDigits {
    fn next_digit(&self) -> u8 {
        if self.digits.is_empty() {
            return 0;
        }
        let mut cursor = self.cursor.lock().expect("digit cursor lock poisoned");
        let digit = self.digits[*cursor % self.digits.len()] % 10;
        *cursor += 1;
        digit
    }
}

/// In-memory filesystem keyed by path.
///
/// Locks behave like real advisory locks between threads sharing the
/// same instance.
#[derive(Default)]
pub struct MemFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    locks: Arc<HeldLocks>,
}

#[derive(Default)]
struct HeldLocks {
    paths: Mutex<HashSet<PathBuf>>,
    freed: Condvar,
}

struct MemLock {
    locks: Arc<HeldLocks>,
    path: PathBuf,
}

impl Drop for MemLock {
    fn drop(&mut self) {
        let mut paths = self.locks.paths.lock().unwrap_or_else(PoisonError::into_inner);
        paths.remove(&self.path);
        self.locks.freed.notify_all();
    }
}

impl MemFileSystem {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSystem for MemFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().expect("mem fs lock poisoned");
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("mem fs lock poisoned");
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().expect("mem fs lock poisoned");
        files.entry(path.to_path_buf()).or_default().push_str(contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().expect("mem fs lock poisoned");
        // A directory exists if any file lives beneath it.
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path))
    }

    fn lock(&self, path: &Path) -> Result<LockGuard, Box<dyn std::error::Error + Send + Sync>> {
        let paths = self.locks.paths.lock().expect("mem fs lock poisoned");
        let mut paths = self
            .locks
            .freed
            .wait_while(paths, |held| held.contains(path))
            .expect("mem fs lock poisoned");
        paths.insert(path.to_path_buf());
        Ok(LockGuard::new(MemLock {
            locks: Arc::clone(&self.locks),
            path: path.to_path_buf(),
        }))
    }
}
